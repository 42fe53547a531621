//! Stored entities

use serde::{Deserialize, Serialize};

use crate::assessment::CategoryScores;

/// A registered account (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    /// Milliseconds since epoch
    pub created_at: i64,
}

/// A user row together with its password hash, for login checks
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Bearer session issued at signup/login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: i64,
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

/// One completed assessment, as stored in `user_responses`
///
/// Field names follow the document shape `{ userId, answers, timestamp }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: String,
    pub user_id: String,
    /// Category index (1-5) → score
    pub answers: CategoryScores,
    /// Milliseconds since epoch
    pub timestamp: i64,
}

/// Row counts, reported by the health endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: u64,
    pub sessions: u64,
    pub responses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_document_field_names() {
        let record = ResponseRecord {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            answers: CategoryScores::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["answers"]["3"], 3.0);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            token: "t".to_string(),
            user_id: "u".to_string(),
            created_at: 0,
            expires_at: 100,
        };
        assert!(!session.is_expired(99));
        assert!(session.is_expired(100));
    }
}
