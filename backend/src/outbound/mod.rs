//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **postgrest**: repositories over the hosted PostgREST-compatible backend
//! - **backup**: filesystem sink for snapshots of failed roster saves
//!
//! Adapters are thin translators between domain types and wire or file
//! representations. They contain no business logic.

pub mod backup;
pub mod postgrest;
