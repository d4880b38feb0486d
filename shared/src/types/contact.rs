//! Contact addresses that verification codes can be delivered to.
//!
//! A contact is either an email address or a phone number; the variant itself
//! records which one, so a record can never carry both or neither.

use serde::{Deserialize, Serialize};

/// Delivery medium for a verification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    /// Column value used by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An email address or phone number identifying where a code is delivered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl Contact {
    /// Build an email contact
    pub fn email(address: impl Into<String>) -> Self {
        Contact::Email(address.into())
    }

    /// Build a phone contact
    pub fn phone(number: impl Into<String>) -> Self {
        Contact::Phone(number.into())
    }

    /// The channel this contact is reachable on
    pub fn channel(&self) -> Channel {
        match self {
            Contact::Email(_) => Channel::Email,
            Contact::Phone(_) => Channel::Phone,
        }
    }

    /// The raw address value
    pub fn value(&self) -> &str {
        match self {
            Contact::Email(address) => address,
            Contact::Phone(number) => number,
        }
    }

    /// Redacted form safe for log output
    pub fn masked(&self) -> String {
        match self {
            Contact::Email(address) => match address.split_once('@') {
                Some((local, domain)) => {
                    let head: String = local.chars().take(1).collect();
                    format!("{}***@{}", head, domain)
                }
                None => "***".to_string(),
            },
            Contact::Phone(number) => {
                let tail: String = number
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("****{}", tail)
            }
        }
    }
}
