//! Mindu Storage
//!
//! Embedded SQLite persistence for the web app:
//!
//! - **types**: Stored entities (User, Session, ResponseRecord)
//! - **store**: The `Store` wrapping one SQLite connection
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! users ──< sessions
//!   │
//!   └──< user_responses { userId, answers: {"1".."5": score}, timestamp }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mindu::assessment::CategoryScores;
//! use mindu::storage::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! let user = store.create_user("ada@example.com", "ada", "<argon2 hash>").unwrap();
//!
//! let scores = CategoryScores::new([3.4, 4.0, 2.2, 5.0, 1.0]).unwrap();
//! store.save_response(&user.id, scores).unwrap();
//!
//! let history = store.user_responses(&user.id).unwrap();
//! assert_eq!(history.len(), 1);
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use store::{StorageConfig, Store};
pub use types::{ResponseRecord, Session, StoreStats, User, UserCredentials};
