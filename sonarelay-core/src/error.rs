use thiserror::Error;

use crate::dispatch::DeliveryError;
use crate::payload::PayloadError;
use crate::template::TemplateError;

/// Fatal configuration problems, caught before the listener starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target-url is required")]
    MissingTargetUrl,

    #[error("invalid JSON in additional-params: {0}")]
    InvalidAdditionalParams(#[source] serde_json::Error),
}

/// Any failure along the flush pipeline for a single key.
///
/// The affected flush is abandoned: logged, never retried, never reported
/// back to the event producer. Other keys and later bursts of the same key
/// are unaffected.
#[derive(Debug, Error)]
pub enum FlushError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}
