//! Shared type definitions.

pub mod contact;

pub use contact::{Channel, Contact};
