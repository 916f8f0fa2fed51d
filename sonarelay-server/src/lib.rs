//! HTTP intake surface for the sonarelay webhook relay.
//!
//! The binary wires CLI flags into [`sonarelay_core::RelaySettings`] and
//! serves the router built in [`routes`]; integration tests drive the same
//! router in-process.

pub mod errors;
pub mod routes;
