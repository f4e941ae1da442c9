//! Pathos domain core.
//!
//! Pure, persistence-free logic for the project tree: progress
//! aggregation, milestone reparenting rules, slug generation, time-entry
//! duration rules, and the onboarding import plan. The HTTP and database
//! layers orchestrate these functions; nothing here performs I/O.

pub mod error;
pub mod onboarding;
pub mod patch;
pub mod progress;
pub mod slug;
pub mod timelog;
pub mod tree;
pub mod types;
