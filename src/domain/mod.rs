//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep wire formats and report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — URF, encrypted payload, converted rule sets, reports.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.

pub mod models;
