use std::time::Duration;

use crate::error::ConfigError;
use crate::payload;

/// Default header template, rendered with {SeriesName, SeasonNumber}.
pub const DEFAULT_TEXT_CONTENT: &str = "📺 <b>Episode update reminder:</b> <b>{{.SeriesName}}</b> <b>Season {{.SeasonNumber}}</b>\n";

/// Default per-episode template, rendered with {EpisodeNumber, EpisodeName}.
pub const DEFAULT_EPISODE_FORMAT: &str = "\nEpisode {{.EpisodeNumber}} {{.EpisodeName}}";

/// Default JSON key the composed text is injected under.
pub const DEFAULT_TEXT_KEY: &str = "text";

/// Default outbound Content-Type header value.
///
/// `text` is not a real media type. Kept as the shipped default because
/// existing deployments configure around it; override with
/// `--content-header` for strict targets.
pub const DEFAULT_CONTENT_HEADER: &str = "text";

/// Default additional-params template.
pub const DEFAULT_ADDITIONAL_PARAMS: &str = "{}";

/// Default idle window in seconds between the first event of a burst and its
/// flush.
pub const DEFAULT_WAIT_SECONDS: u64 = 300;

/// Process-wide relay settings.
///
/// Resolved once at startup, then shared read-only (behind an `Arc`) across
/// every request task and flush task. Nothing mutates these after
/// [`RelaySettings::validate`] has passed.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Delay between the first event of a burst and its flush. Later events
    /// in the same burst do not extend it.
    pub idle_window: Duration,
    /// Header template, rendered with {SeriesName, SeasonNumber}.
    pub text_content: String,
    /// Per-episode template, rendered with {EpisodeNumber, EpisodeName}.
    pub episode_format: String,
    /// Downstream URL the composed payload is POSTed to.
    pub target_url: String,
    /// JSON object template merged into the outbound payload, rendered with
    /// {SeriesId}.
    pub additional_params: String,
    /// JSON key the composed text is injected under.
    pub text_key: String,
    /// Content-Type header value for the outbound request.
    pub content_header: String,
}

impl RelaySettings {
    /// Fail-fast startup checks.
    ///
    /// A relay with no target, or with an additional-params string that is
    /// not a JSON object, must never reach the listener. Template strings
    /// are deliberately not checked here; a template that fails to parse
    /// surfaces per flush, matching the per-flush abandon policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_url.is_empty() {
            return Err(ConfigError::MissingTargetUrl);
        }
        payload::validate_params_template(&self.additional_params)?;
        Ok(())
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        RelaySettings {
            idle_window: Duration::from_secs(DEFAULT_WAIT_SECONDS),
            text_content: DEFAULT_TEXT_CONTENT.to_owned(),
            episode_format: DEFAULT_EPISODE_FORMAT.to_owned(),
            target_url: String::new(),
            additional_params: DEFAULT_ADDITIONAL_PARAMS.to_owned(),
            text_key: DEFAULT_TEXT_KEY.to_owned(),
            content_header: DEFAULT_CONTENT_HEADER.to_owned(),
        }
    }
}
