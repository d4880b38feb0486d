//! Repository interfaces and their in-memory implementations for tests and
//! local development.

pub mod account;
pub mod code_store;

pub use account::{AccountDirectory, MockAccountDirectory};
pub use code_store::{CodeStore, MockCodeStore};
