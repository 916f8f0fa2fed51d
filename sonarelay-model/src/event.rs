use crate::ids::SeriesId;
use crate::numbers::{EpisodeNumber, SeasonNumber};
use crate::pending::{Episode, SeasonKey};

/// Inbound webhook record for one episode update.
///
/// Field names mirror the upstream notifier's PascalCase payload verbatim,
/// so the serde derives rename rather than the producer adapting to us.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "PascalCase")
)]
pub struct EpisodeEvent {
    pub series_id: SeriesId,
    pub series_name: String,
    pub season_number: SeasonNumber,
    pub episode_number: EpisodeNumber,
    pub episode_name: String,
}

impl EpisodeEvent {
    /// The accumulation bucket this event lands in.
    pub fn key(&self) -> SeasonKey {
        SeasonKey::new(self.series_id.clone(), self.season_number)
    }

    /// The episode value carried by this event.
    pub fn episode(&self) -> Episode {
        Episode::new(self.episode_number, self.episode_name.clone())
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn decodes_pascal_case_payload() {
        let event: EpisodeEvent = serde_json::from_str(
            r#"{
                "SeriesId": "42",
                "SeriesName": "X",
                "SeasonNumber": 1,
                "EpisodeNumber": 3,
                "EpisodeName": "Pilot"
            }"#,
        )
        .unwrap();

        assert_eq!(event.series_id.as_str(), "42");
        assert_eq!(event.series_name, "X");
        assert_eq!(event.season_number.value(), 1);
        assert_eq!(event.episode_number.value(), 3);
        assert_eq!(event.episode_name, "Pilot");
        assert_eq!(event.key(), SeasonKey::new("42", 1u16));
    }
}
