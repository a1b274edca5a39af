//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const QUESTIONS: &str = "questions";
    /// Sub-collection under each question holding its AI summary
    pub const AI_SUMMARY: &str = "aiSummary";
}

/// Fixed document ID for the single summary slot under each question.
pub const SUMMARY_DOC_ID: &str = "latest";
