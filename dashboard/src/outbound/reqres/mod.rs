//! Reqres outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `UserDirectory`
//! port against the reqres REST API.

mod dto;
mod http_directory;

pub use http_directory::{ReqresClientError, ReqresUserDirectory};
