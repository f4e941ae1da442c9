//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches, using [`pathos_core::patch::Patch`]
//!   for nullable fields so "omitted" and "set to null" stay distinct

pub mod entry;
pub mod enums;
pub mod milestone;
pub mod passion;
pub mod project;
pub mod session;
pub mod task;
pub mod time_entry;
pub mod user;
