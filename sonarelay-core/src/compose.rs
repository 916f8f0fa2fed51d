use sonarelay_model::{Episode, SeasonNumber};

use crate::template::{Template, TemplateError};

/// Renders the final notification text for one flushed burst.
///
/// The header template sees {SeriesName, SeasonNumber}; the episode template
/// sees {EpisodeNumber, EpisodeName} and is rendered once per episode in
/// ascending episode order, ties keeping arrival order. After concatenation,
/// every literal backslash-n pair becomes a real newline so multi-line
/// messages survive flag values that cannot carry raw newlines.
///
/// Pure function of its arguments; a [`TemplateError`] aborts the whole
/// flush with nothing delivered.
pub fn compose(
    text_content: &str,
    episode_format: &str,
    series_name: &str,
    season: SeasonNumber,
    mut episodes: Vec<Episode>,
) -> Result<String, TemplateError> {
    let mut text = Template::parse(text_content)?.render(&[
        ("SeriesName", series_name.to_owned()),
        ("SeasonNumber", season.to_string()),
    ])?;

    // sort_by_key is stable: duplicate episode numbers keep arrival order
    episodes.sort_by_key(|episode| episode.number);

    let fragment = Template::parse(episode_format)?;
    for episode in &episodes {
        text.push_str(&fragment.render(&[
            ("EpisodeNumber", episode.number.to_string()),
            ("EpisodeName", episode.name.clone()),
        ])?);
    }

    Ok(text.replace("\\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "{{.SeriesName}} S{{.SeasonNumber}}";
    const FRAGMENT: &str = "\\nE{{.EpisodeNumber}} {{.EpisodeName}}";

    #[test]
    fn sorts_episodes_and_normalizes_escaped_newlines() {
        let text = compose(
            HEADER,
            FRAGMENT,
            "X",
            SeasonNumber::new(1),
            vec![Episode::new(2u16, "B"), Episode::new(1u16, "A")],
        )
        .unwrap();

        assert_eq!(text, "X S1\nE1 A\nE2 B");
    }

    #[test]
    fn duplicate_episode_numbers_keep_arrival_order() {
        let text = compose(
            HEADER,
            FRAGMENT,
            "X",
            SeasonNumber::new(1),
            vec![
                Episode::new(1u16, "first"),
                Episode::new(1u16, "second"),
            ],
        )
        .unwrap();

        assert_eq!(text, "X S1\nE1 first\nE1 second");
    }

    #[test]
    fn header_alone_when_no_episode_renders() {
        // The store never yields an empty list, but compose itself does not
        // care.
        let text = compose(HEADER, FRAGMENT, "X", SeasonNumber::new(3), vec![]).unwrap();
        assert_eq!(text, "X S3");
    }

    #[test]
    fn unknown_header_field_aborts() {
        let err = compose(
            "{{.Nope}}",
            FRAGMENT,
            "X",
            SeasonNumber::new(1),
            vec![Episode::new(1u16, "A")],
        )
        .unwrap_err();

        assert_eq!(
            err,
            TemplateError::UnknownField {
                name: "Nope".to_owned()
            }
        );
    }

    #[test]
    fn default_templates_render() {
        let text = compose(
            crate::settings::DEFAULT_TEXT_CONTENT,
            crate::settings::DEFAULT_EPISODE_FORMAT,
            "Dark",
            SeasonNumber::new(2),
            vec![Episode::new(5u16, "Lost and Found")],
        )
        .unwrap();

        assert!(text.contains("<b>Dark</b>"));
        assert!(text.contains("<b>Season 2</b>"));
        assert!(text.ends_with("\nEpisode 5 Lost and Found"));
    }
}
