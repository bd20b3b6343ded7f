use super::TrackRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of lowercase genre labels attached to a performer.
pub type GenreSet = HashSet<String>;

/// Opaque catalog identifier of a performer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl ArtistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One entry of the listener's recently-played history
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPlay {
    pub track: TrackRef,
    pub artist: ArtistRef,
}

/// Album descriptor from the new-release listing
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelease {
    pub album_id: String,
    pub name: String,
    pub artist: ArtistRef,
}

/// Builds a genre set, normalizing labels so membership tests are exact
/// but case-insensitive.
pub fn genre_set<I, S>(labels: I) -> GenreSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|g| g.as_ref().trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect()
}
