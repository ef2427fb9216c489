use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a string-backed identifier newtype.
///
/// Identifiers are opaque strings: records created by this service get a
/// random hex id, but references coming from clients (e.g. a logged work's
/// project) are kept verbatim and only compared for equality.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// A fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Project`](super::Project).
    ProjectId
);

string_id!(
    /// Identifier of a [`LoggedWork`](super::LoggedWork) entry.
    LoggedWorkId
);

string_id!(
    /// Identifier of an account in the user store.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_hex() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn blank_ids_are_empty() {
        assert!(UserId::new("").is_empty());
        assert!(UserId::new("  ").is_empty());
        assert!(!UserId::new("u1").is_empty());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = LoggedWorkId::new("w1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"w1\"");
    }
}
