//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **reqres**: HTTP client for the remote user directory
//! - **storage**: in-memory and JSON-file key-value stores
//!
//! Adapters translate between domain types and wire or file representations.
//! They contain no business logic.

pub mod reqres;
pub mod storage;
