//! User-management dashboard library modules.
//!
//! Hexagonal layout: [`domain`] holds behaviour and ports, [`outbound`]
//! implements the ports over HTTP and local storage, [`inbound`] drives the
//! domain from the command line, and [`config`] resolves settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::DashboardSettings;
