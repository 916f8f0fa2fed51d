use thiserror::Error;

/// Template parse or render failure.
///
/// Either aborts the whole flush for the affected key; nothing partial is
/// ever delivered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {at}")]
    Unterminated { at: usize },

    #[error("malformed placeholder {placeholder:?}: expected {{{{.Field}}}}")]
    Malformed { placeholder: String },

    #[error("unknown field {name:?} in template")]
    UnknownField { name: String },
}

/// Minimal renderer for the `{{.Field}}` placeholder syntax used by the
/// relay's message templates.
///
/// Placeholders name a single field with a leading dot; whitespace inside
/// the braces is tolerated. Everything else passes through literally, with
/// no escaping. Parsing is cheap enough to happen per flush, which also
/// keeps parse failures scoped to the flush that hit them rather than
/// failing startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut cursor = 0usize;

        while let Some(open) = source[cursor..].find("{{") {
            let open = cursor + open;
            if open > cursor {
                segments.push(Segment::Literal(source[cursor..open].to_owned()));
            }

            let Some(close) = source[open + 2..].find("}}") else {
                return Err(TemplateError::Unterminated { at: open });
            };
            let close = open + 2 + close;

            let body = source[open + 2..close].trim();
            let field = body
                .strip_prefix('.')
                .filter(|name| {
                    !name.is_empty()
                        && name
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '_')
                })
                .ok_or_else(|| TemplateError::Malformed {
                    placeholder: body.to_owned(),
                })?;
            segments.push(Segment::Field(field.to_owned()));

            cursor = close + 2;
        }

        if cursor < source.len() {
            segments.push(Segment::Literal(source[cursor..].to_owned()));
        }

        Ok(Template { segments })
    }

    /// Substitutes every field segment from `bindings`.
    ///
    /// Values are inserted literally. Referencing a field not present in the
    /// bindings is an error, matching the abort-the-flush contract.
    pub fn render(&self, bindings: &[(&str, String)]) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = bindings
                        .iter()
                        .find(|(field, _)| *field == name.as_str())
                        .map(|(_, value)| value.as_str())
                        .ok_or_else(|| TemplateError::UnknownField { name: name.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, bindings: &[(&str, String)]) -> Result<String, TemplateError> {
        Template::parse(source)?.render(bindings)
    }

    #[test]
    fn literal_text_passes_through() {
        assert_eq!(render("plain text", &[]).unwrap(), "plain text");
    }

    #[test]
    fn substitutes_fields() {
        let out = render(
            "{{.SeriesName}} S{{.SeasonNumber}}",
            &[
                ("SeriesName", "X".to_owned()),
                ("SeasonNumber", "1".to_owned()),
            ],
        )
        .unwrap();
        assert_eq!(out, "X S1");
    }

    #[test]
    fn tolerates_whitespace_inside_braces() {
        let out = render("{{ .Name }}", &[("Name", "x".to_owned())]).unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn adjacent_placeholders() {
        let out = render(
            "{{.A}}{{.B}}",
            &[("A", "1".to_owned()), ("B", "2".to_owned())],
        )
        .unwrap();
        assert_eq!(out, "12");
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = render("{{.Nope}}", &[("Name", "x".to_owned())]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownField {
                name: "Nope".to_owned()
            }
        );
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let err = Template::parse("before {{.Name").unwrap_err();
        assert_eq!(err, TemplateError::Unterminated { at: 7 });
    }

    #[test]
    fn placeholder_without_dot_is_malformed() {
        let err = Template::parse("{{Name}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::Malformed {
                placeholder: "Name".to_owned()
            }
        );
    }

    #[test]
    fn empty_placeholder_is_malformed() {
        assert!(matches!(
            Template::parse("{{.}}"),
            Err(TemplateError::Malformed { .. })
        ));
    }

    #[test]
    fn values_are_not_escaped() {
        let out = render(
            "{{.Name}}",
            &[("Name", "a \"quoted\" value".to_owned())],
        )
        .unwrap();
        assert_eq!(out, "a \"quoted\" value");
    }
}
