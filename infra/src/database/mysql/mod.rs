//! MySQL repository implementations.

pub mod account_directory_impl;
pub mod code_store_impl;

pub use account_directory_impl::MySqlAccountDirectory;
pub use code_store_impl::MySqlCodeStore;
