//! Explicit session value threaded into the client.
//!
//! Lifecycle: `Anonymous -> Authenticated -> Anonymous`. Nothing global; the
//! caller owns the value and decides where (if anywhere) it is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User returned by login/register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        #[serde(default)]
        user: Option<UserInfo>,
    },
}

impl Session {
    pub fn authenticated(token: impl Into<String>, user: Option<UserInfo>) -> Self {
        Session::Authenticated {
            token: token.into(),
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Bearer token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            Session::Authenticated { user, .. } => user.as_ref(),
            Session::Anonymous => None,
        }
    }

    pub fn sign_out(&mut self) {
        *self = Session::Anonymous;
    }
}

// Keeps tokens out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Anonymous => f.write_str("Anonymous"),
            Session::Authenticated { user, .. } => f
                .debug_struct("Authenticated")
                .field("token", &"<redacted>")
                .field("user", &user.as_ref().map(|u| u.user_name.as_str()))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut s = Session::default();
        assert!(!s.is_authenticated());
        assert_eq!(s.token(), None);

        s = Session::authenticated("abc.def", None);
        assert!(s.is_authenticated());
        assert_eq!(s.token(), Some("abc.def"));

        s.sign_out();
        assert_eq!(s, Session::Anonymous);
    }

    #[test]
    fn test_debug_redacts_token() {
        let s = Session::authenticated(
            "secret-token",
            Some(UserInfo {
                id: "1".to_string(),
                user_name: "ana".to_string(),
                email: None,
            }),
        );
        let dbg = format!("{:?}", s);
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("ana"));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let s = Session::authenticated("t", None);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["token"], "t");

        let anon: Session = serde_json::from_str(r#"{"state":"anonymous"}"#).unwrap();
        assert_eq!(anon, Session::Anonymous);
    }
}
