//! Public identity record.

use serde::{Deserialize, Serialize};

/// Public-facing user identity.
///
/// This is the only user representation that may be serialized back across an
/// API boundary: it carries no password or salt material.
///
/// Deserialization is strict and rejects unknown keys.
///
/// # Examples
/// ```
/// use user_credentials::Identity;
///
/// let identity = Identity::new("alice", false);
/// let json = serde_json::to_string(&identity).unwrap();
/// assert_eq!(json, r#"{"username":"alice","isAdmin":false}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Identity {
    username: String,
    #[serde(alias = "is_admin")]
    is_admin: bool,
}

impl Identity {
    /// Build an identity. Usernames are stored verbatim.
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// Username as supplied at registration.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Whether the user holds administrative rights.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn accessors_return_constructor_values() {
        let identity = Identity::new("alice", true);
        assert_eq!(identity.username(), "alice");
        assert!(identity.is_admin());
    }

    #[rstest]
    #[case(Identity::new("alice", false), Identity::new("alice", false), true)]
    #[case(Identity::new("alice", false), Identity::new("alice", true), false)]
    #[case(Identity::new("alice", false), Identity::new("bob", false), false)]
    fn equality_is_structural(
        #[case] left: Identity,
        #[case] right: Identity,
        #[case] expected: bool,
    ) {
        assert_eq!(left == right, expected);
    }

    #[rstest]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(Identity::new("alice", true)).expect("serialize");
        assert_eq!(value, json!({"username": "alice", "isAdmin": true}));
    }

    #[rstest]
    #[case(json!({"username": "bob", "isAdmin": false}))]
    #[case(json!({"username": "bob", "is_admin": false}))]
    fn deserializes_known_keys(#[case] payload: serde_json::Value) {
        let identity: Identity = serde_json::from_value(payload).expect("valid payload");
        assert_eq!(identity, Identity::new("bob", false));
    }

    #[rstest]
    #[case(json!({"username": "bob", "isAdmin": false, "role": "owner"}))]
    #[case(json!({"username": "bob", "isAdmin": false, "passwordHash": "x"}))]
    #[case(json!({"username": "bob"}))]
    #[case(json!({"username": "bob", "isAdmin": "yes"}))]
    fn rejects_payloads_outside_schema(#[case] payload: serde_json::Value) {
        let result = serde_json::from_value::<Identity>(payload);
        assert!(result.is_err());
    }
}
