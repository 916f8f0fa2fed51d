/// Strongly typed identifier for a series.
///
/// The upstream notifier owns the format (Sonarr sends a decimal id, other
/// producers may not), so the value is carried as an opaque string and never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesId(pub String);

impl SeriesId {
    pub fn new(id: impl Into<String>) -> Self {
        SeriesId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SeriesId {
    fn from(id: String) -> Self {
        SeriesId(id)
    }
}

impl From<&str> for SeriesId {
    fn from(id: &str) -> Self {
        SeriesId(id.to_owned())
    }
}
