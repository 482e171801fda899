use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a group member.
///
/// Identity is owned by the surrounding application (user accounts,
/// invitation workflow); the engine treats it as an opaque string and
/// guarantees nothing about its shape.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberId;
///
/// let alice = MemberId::new("alice");
/// let bob = MemberId::new("bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this member ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An accepted member of an expense-sharing group.
///
/// Only accepted members participate in the equal split; pending invitees are
/// filtered out by the membership collaborator before a snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_equality() {
        let a = MemberId::new("alice");
        let b = MemberId::new("alice");
        let c = MemberId::new("carol");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_member_id_display() {
        let id = MemberId::new("dave");
        assert_eq!(format!("{}", id), "dave");
    }

    #[test]
    fn test_member_construction() {
        let m = Member::new("alice", "Alice");
        assert_eq!(m.id.as_str(), "alice");
        assert_eq!(m.display_name, "Alice");
    }
}
