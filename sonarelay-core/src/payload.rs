use serde_json::{Map, Value};
use sonarelay_model::SeriesId;
use thiserror::Error;

use crate::error::{ConfigError, FlushError};
use crate::template::Template;

/// Rendered additional-params that no longer parse as a JSON object.
///
/// Substitution happens on the raw JSON text, so a series id containing a
/// quote or backslash can corrupt the document at flush time even though the
/// template itself validated at startup.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("rendered additional-params is not a JSON object: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Startup precondition: the configured additional-params string must parse
/// as a JSON object before any substitution has happened.
///
/// Per-flush validation of the rendered string is separate; this check only
/// rules out configurations that could never produce a payload.
pub fn validate_params_template(additional_params: &str) -> Result<(), ConfigError> {
    serde_json::from_str::<Map<String, Value>>(additional_params)
        .map(drop)
        .map_err(ConfigError::InvalidAdditionalParams)
}

/// Builds the outbound JSON body for one flush.
///
/// The additional-params template is rendered with {SeriesId}, the result is
/// reparsed as a JSON object, and the composed text is inserted under
/// `text_key`, overwriting any value the template put there. Key order in
/// the serialized output carries no meaning.
pub fn build_payload(
    additional_params: &str,
    text_key: &str,
    series_id: &SeriesId,
    text: &str,
) -> Result<Vec<u8>, FlushError> {
    let rendered =
        Template::parse(additional_params)?.render(&[("SeriesId", series_id.to_string())])?;

    let mut params: Map<String, Value> =
        serde_json::from_str(&rendered).map_err(PayloadError::InvalidJson)?;
    params.insert(text_key.to_owned(), Value::String(text.to_owned()));

    serde_json::to_vec(&params).map_err(|err| PayloadError::Serialize(err).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str) -> SeriesId {
        SeriesId::new(id)
    }

    #[test]
    fn merges_rendered_params_with_composed_text() {
        let body = build_payload(
            r#"{"chat_id": "{{.SeriesId}}"}"#,
            "text",
            &series("42"),
            "hello",
        )
        .unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"chat_id": "42", "text": "hello"}));
    }

    #[test]
    fn empty_params_object_yields_text_only() {
        let body = build_payload("{}", "text", &series("42"), "hello").unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"text": "hello"}));
    }

    #[test]
    fn composed_text_overwrites_existing_key() {
        let body = build_payload(
            r#"{"text": "template value", "chat_id": "7"}"#,
            "text",
            &series("1"),
            "composed",
        )
        .unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["text"], "composed");
        assert_eq!(value["chat_id"], "7");
    }

    #[test]
    fn custom_text_key_is_honored() {
        let body = build_payload("{}", "message", &series("1"), "hi").unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"message": "hi"}));
    }

    #[test]
    fn substitution_can_break_json_validity() {
        // A quote in the series id corrupts the rendered document. This is
        // the documented sharp edge: values are substituted literally, not
        // JSON-escaped.
        let err = build_payload(
            r#"{"chat_id": "{{.SeriesId}}"}"#,
            "text",
            &series("4\"2"),
            "hello",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FlushError::Payload(PayloadError::InvalidJson(_))
        ));
    }

    #[test]
    fn unknown_placeholder_in_params_is_a_template_error() {
        let err = build_payload(
            r#"{"chat_id": "{{.ChatId}}"}"#,
            "text",
            &series("42"),
            "hello",
        )
        .unwrap_err();

        assert!(matches!(err, FlushError::Template(_)));
    }

    #[test]
    fn validate_accepts_object_rejects_everything_else() {
        validate_params_template("{}").unwrap();
        validate_params_template(r#"{"a": 1, "b": {"c": []}}"#).unwrap();

        assert!(validate_params_template("{not json").is_err());
        assert!(validate_params_template("[1, 2]").is_err());
        assert!(validate_params_template("\"string\"").is_err());
    }
}
