//! Account projection of the external user store.

use serde::{Deserialize, Serialize};

use vf_shared::types::Contact;

/// Minimal view of a registered account, as exposed by the user store.
/// Accounts are consumed by the verification core, never created by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier
    pub id: u64,

    /// Primary contact the account is registered under
    pub contact: Contact,

    /// Display name, if the profile has one
    pub full_name: Option<String>,
}
