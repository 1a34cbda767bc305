//! Terminal presenter: renders published states as a one-line card.
//!
//! Pure consumer of `PublishedState`; it never retries or reinterprets a
//! failure. A `Playing` state without a freshly resolved artwork path
//! keeps showing the previously resolved cover.

use std::path::PathBuf;

use hud_mpris::PublishedState;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;

const PLACEHOLDER: &str = "-";

/// Remembers the last resolved cover and the last printed line so the
/// terminal is only touched when something changes.
#[derive(Default)]
pub struct Card {
    last_art: Option<PathBuf>,
    last_line: Option<String>,
}

impl Card {
    /// Fold one state into the card, returning the line to print if it
    /// differs from the previous one.
    pub fn update(&mut self, state: PublishedState) -> Option<String> {
        let line = match state {
            PublishedState::Playing { snapshot, art_path } => {
                if art_path.is_some() {
                    self.last_art = art_path;
                }
                let title = snapshot.title.as_deref().unwrap_or(PLACEHOLDER);
                let artist = snapshot.artist.as_deref().unwrap_or(PLACEHOLDER);
                match &self.last_art {
                    Some(cover) => format!("{title} / {artist} [cover: {}]", cover.display()),
                    None => format!("{title} / {artist}"),
                }
            }
            PublishedState::Unavailable(reason) => format!("[{reason}]"),
        };

        if self.last_line.as_deref() == Some(line.as_str()) {
            return None;
        }
        self.last_line = Some(line.clone());
        Some(line)
    }
}

/// Drain the event bus until it closes.
pub async fn run(mut rx: Receiver<PublishedState>) {
    let mut card = Card::default();
    loop {
        match rx.recv().await {
            Ok(state) => {
                if let Some(line) = card.update(state) {
                    println!("{line}");
                }
            }
            // Skipped states are stale anyway.
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_mpris::{MetadataSnapshot, UnavailableReason};

    fn playing(title: &str, artist: &str, art: Option<&str>) -> PublishedState {
        PublishedState::Playing {
            snapshot: MetadataSnapshot {
                title: Some(title.to_string()),
                artist: Some(artist.to_string()),
                art_ref: None,
            },
            art_path: art.map(PathBuf::from),
        }
    }

    #[test]
    fn keeps_last_cover_when_cycle_resolves_none() {
        let mut card = Card::default();
        let first = card.update(playing("Song", "A", Some("/tmp/cover"))).unwrap();
        assert!(first.contains("/tmp/cover"));

        let second = card.update(playing("Next", "A", None)).unwrap();
        assert!(second.contains("/tmp/cover"));
    }

    #[test]
    fn repeated_state_prints_nothing() {
        let mut card = Card::default();
        assert!(card.update(playing("Song", "A", None)).is_some());
        assert!(card.update(playing("Song", "A", None)).is_none());
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let mut card = Card::default();
        let line = card
            .update(PublishedState::Playing {
                snapshot: MetadataSnapshot::default(),
                art_path: None,
            })
            .unwrap();
        assert_eq!(line, "- / -");
    }

    #[test]
    fn unavailable_renders_reason() {
        let mut card = Card::default();
        let line = card
            .update(PublishedState::Unavailable(UnavailableReason::NoPlayer))
            .unwrap();
        assert_eq!(line, "[no player]");
    }
}
