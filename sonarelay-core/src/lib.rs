//! # sonarelay-core
//!
//! Aggregation and delivery pipeline for the sonarelay webhook relay.
//!
//! Inbound episode events land in the [`store::AggregationStore`], keyed by
//! (series, season). The first event of a burst arms a one-shot flush timer
//! on the [`relay::Relay`]; when it fires, the key is drained and the burst
//! flows through [`compose::compose`] and [`payload::build_payload`] before
//! a [`dispatch::Dispatch`] implementation posts it downstream.
//!
//! Everything between drain and delivery operates on owned data, so the
//! composer and payload builder are plain functions with no locking.

pub mod compose;
pub mod dispatch;
pub mod error;
pub mod payload;
pub mod relay;
pub mod settings;
pub mod store;
pub mod template;

pub use compose::compose;
pub use dispatch::{DeliveryError, Dispatch, HttpDispatcher};
pub use error::{ConfigError, FlushError};
pub use payload::{PayloadError, build_payload, validate_params_template};
pub use relay::Relay;
pub use settings::RelaySettings;
pub use store::AggregationStore;
pub use template::{Template, TemplateError};
