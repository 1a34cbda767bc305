//! Metadata blob normalization
//!
//! Turns the `a{sv}` mapping a player reports into a [`MetadataSnapshot`].
//! Normalization never fails: a missing, empty or wrong-typed entry just
//! leaves its snapshot field at `None`, every other key is ignored.

use std::collections::HashMap;

use zbus::zvariant::OwnedValue;

use crate::types::MetadataSnapshot;

/// The key/variant mapping transported over the bus.
pub type MetadataBlob = HashMap<String, OwnedValue>;

const TITLE_KEY: &str = "xesam:title";
const ARTIST_KEY: &str = "xesam:artist";
const ART_URL_KEY: &str = "mpris:artUrl";

/// Extract the three well-known fields from a metadata blob.
pub fn normalize(blob: &MetadataBlob) -> MetadataSnapshot {
    MetadataSnapshot {
        title: string_entry(blob, TITLE_KEY),
        artist: first_string_entry(blob, ARTIST_KEY),
        art_ref: string_entry(blob, ART_URL_KEY),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn string_entry(map: &MetadataBlob, key: &str) -> Option<String> {
    use std::ops::Deref;
    use zbus::zvariant::Value;

    map.get(key).and_then(|v| match v.deref() {
        Value::Str(s) => non_empty(s.to_string()),
        _ => None,
    })
}

/// First entry of a string-array entry. Later entries are never consulted,
/// even when the first one is empty.
fn first_string_entry(map: &MetadataBlob, key: &str) -> Option<String> {
    use std::ops::Deref;
    use zbus::zvariant::Value;

    map.get(key).and_then(|v| match v.deref() {
        Value::Array(arr) => arr.iter().next().and_then(|item| match item {
            Value::Str(s) => non_empty(s.to_string()),
            _ => None,
        }),
        // Some players ship a plain string where MPRIS says `as`.
        Value::Str(s) => non_empty(s.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbus::zvariant::Value;

    fn insert(blob: &mut MetadataBlob, key: &str, value: Value<'_>) {
        blob.insert(key.to_string(), value.try_into().unwrap());
    }

    fn blob(entries: Vec<(&str, Value<'_>)>) -> MetadataBlob {
        let mut blob = MetadataBlob::new();
        for (key, value) in entries {
            insert(&mut blob, key, value);
        }
        blob
    }

    #[test]
    fn empty_blob_yields_empty_snapshot() {
        let snapshot = normalize(&MetadataBlob::new());
        assert_eq!(snapshot, MetadataSnapshot::default());
    }

    #[test]
    fn full_blob_extracts_all_fields() {
        let snapshot = normalize(&blob(vec![
            ("xesam:title", Value::from("Song")),
            ("xesam:artist", Value::from(vec!["A", "B"])),
            ("mpris:artUrl", Value::from("file:///tmp/a.jpg")),
        ]));
        assert_eq!(snapshot.title.as_deref(), Some("Song"));
        assert_eq!(snapshot.artist.as_deref(), Some("A"));
        assert_eq!(snapshot.art_ref.as_deref(), Some("file:///tmp/a.jpg"));
    }

    #[test]
    fn only_first_artist_is_used() {
        let snapshot = normalize(&blob(vec![(
            "xesam:artist",
            Value::from(vec!["First", "Second", "Third"]),
        )]));
        assert_eq!(snapshot.artist.as_deref(), Some("First"));
    }

    #[test]
    fn plain_string_artist_is_tolerated() {
        let snapshot = normalize(&blob(vec![("xesam:artist", Value::from("Solo"))]));
        assert_eq!(snapshot.artist.as_deref(), Some("Solo"));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let snapshot = normalize(&blob(vec![
            ("xesam:title", Value::from("")),
            ("xesam:artist", Value::from(Vec::<&str>::new())),
            ("mpris:artUrl", Value::from("")),
        ]));
        assert_eq!(snapshot, MetadataSnapshot::default());
    }

    #[test]
    fn empty_first_artist_does_not_fall_through() {
        let snapshot = normalize(&blob(vec![(
            "xesam:artist",
            Value::from(vec!["", "Second"]),
        )]));
        assert_eq!(snapshot.artist, None);
    }

    #[test]
    fn wrong_types_are_ignored() {
        let snapshot = normalize(&blob(vec![
            ("xesam:title", Value::from(42i64)),
            ("xesam:artist", Value::from(vec![1i32, 2])),
            ("mpris:artUrl", Value::from(false)),
        ]));
        assert_eq!(snapshot, MetadataSnapshot::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let snapshot = normalize(&blob(vec![
            ("xesam:title", Value::from("Song")),
            ("mpris:length", Value::from(180_000_000i64)),
            ("xesam:album", Value::from(vec!["Album"])),
        ]));
        assert_eq!(snapshot.title.as_deref(), Some("Song"));
        assert_eq!(snapshot.artist, None);
        assert_eq!(snapshot.art_ref, None);
    }
}
