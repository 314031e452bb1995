//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `canon.rs` — raw dialect text → Universal Rule Format.
//! - `render.rs` — Universal Rule Format → target dialect file set.
//! - `crypto.rs` — password-based authenticated encryption.
//! - `codes.rs` — share code and password generation/validation.
//! - `relay.rs` — contract with the hosted share relay + HTTP client.
//! - `writer.rs` — rule-file persistence with pre-write backups.
//! - `share.rs` — share/import orchestration.
//! - `storage.rs` — config dir, audit log, clock helpers.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod canon;
pub mod codes;
pub mod crypto;
pub mod output;
pub mod relay;
pub mod render;
pub mod share;
pub mod storage;
pub mod writer;
