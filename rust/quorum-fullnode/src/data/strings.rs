use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};

/// A helper to stamp out trait implementations that promote coherence between
/// Rust strings and a given wrapper type
macro_rules! string_coherent {
    ($wrapper:ty) => {
        impl Deref for $wrapper {
            type Target = String;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<&str> for $wrapper {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $wrapper {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$wrapper> for String {
            fn from(value: $wrapper) -> Self {
                value.0
            }
        }

        impl PartialEq<String> for $wrapper {
            fn eq(&self, other: &String) -> bool {
                &self.0 == other
            }
        }

        impl PartialEq<$wrapper> for String {
            fn eq(&self, other: &$wrapper) -> bool {
                self == &other.0
            }
        }

        impl PartialEq<str> for $wrapper {
            fn eq(&self, other: &str) -> bool {
                &self.0 == other
            }
        }

        impl PartialEq<&str> for $wrapper {
            fn eq(&self, other: &&str) -> bool {
                &self.0 == *other
            }
        }

        impl Display for $wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl AsRef<str> for $wrapper {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// The UUID-shaped identifier the node assigns to every group
#[repr(transparent)]
#[derive(
    Default, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct GroupId(pub String);

string_coherent!(GroupId);

/// The identifier of a transaction on a group's chain
#[repr(transparent)]
#[derive(
    Default, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct TrxId(pub String);

string_coherent!(TrxId);

/// A base64-encoded public key as the node renders it, used both for user and
/// producer identities
#[repr(transparent)]
#[derive(
    Default, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct Pubkey(pub String);

string_coherent!(Pubkey);

/// A JWT, aka a JSON Web Token, is a specialized string-encoding of a
/// particular format of JSON and an associated signature. The node issues
/// these and expects one back as the bearer credential on authorized routes.
///
/// See: <https://jwt.io/>
#[repr(transparent)]
#[derive(
    Default, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct Jwt(pub String);

string_coherent!(Jwt);
