use crate::ids::SeriesId;
use crate::numbers::{EpisodeNumber, SeasonNumber};

/// A single episode as reported by the upstream notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub number: EpisodeNumber,
    pub name: String,
}

impl Episode {
    pub fn new(number: impl Into<EpisodeNumber>, name: impl Into<String>) -> Self {
        Episode {
            number: number.into(),
            name: name.into(),
        }
    }
}

/// Identity of one accumulation bucket: a single season of a single series.
///
/// Equality is by value; two events agree on the bucket exactly when they
/// agree on both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    pub series: SeriesId,
    pub season: SeasonNumber,
}

impl SeasonKey {
    pub fn new(series: impl Into<SeriesId>, season: impl Into<SeasonNumber>) -> Self {
        SeasonKey {
            series: series.into(),
            season: season.into(),
        }
    }
}

impl std::fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/S{}", self.series, self.season)
    }
}

/// Episodes accumulated for one season while its flush timer is pending.
///
/// The series name is captured from the first event of the burst and kept
/// for its lifetime. Episodes stay in arrival order here; sorting by episode
/// number happens at compose time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSeason {
    pub series_name: String,
    pub episodes: Vec<Episode>,
}

impl PendingSeason {
    pub fn new(series_name: impl Into<String>, first: Episode) -> Self {
        PendingSeason {
            series_name: series_name.into(),
            episodes: vec![first],
        }
    }
}
