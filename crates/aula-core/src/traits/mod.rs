//! Trait seams between the grading engine and its backing store.
//!
//! Components receive these as injected `Arc<dyn …>`; there is no global
//! connection pool or process-wide singleton.

pub mod storage;

pub use storage::{IGradeStorage, IScoreLedger, ScoreUpsert};
