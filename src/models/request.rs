use crate::error::AppError;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_NUM_TRACKS: i64 = 10;

/// Upper bound on one request; collections are filled in a single append
/// and the catalog accepts at most this many tracks per append.
pub const MAX_NUM_TRACKS: i64 = 100;

pub const DEFAULT_COLLECTION_NAME: &str = "Curator's Playlist";

/// Keywords marking collection intent in free-form action text
const COLLECTION_KEYWORDS: &[&str] = &["playlist", "collection"];

/// Request payload as produced by the intent-interpretation layer.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RawSelectionRequest {
    pub num_tracks: Option<i64>,
    #[validate(length(min = 1))]
    pub artists: Option<Vec<String>>,
    #[validate(length(min = 1, max = 200))]
    pub genre: Option<String>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub action_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputAction {
    Recommend,
    CreateCollection,
}

impl OutputAction {
    /// Maps free-form action text onto one of the two actions.
    pub fn classify(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if COLLECTION_KEYWORDS.iter().any(|k| text.contains(k)) {
            OutputAction::CreateCollection
        } else {
            OutputAction::Recommend
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    Artists { artist_names: Vec<String> },
    Genre { genre: String },
}

/// Canonical request; immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub num_tracks: usize,
    pub mode: SelectionMode,
    pub output_action: OutputAction,
    pub collection_name: String,
}

impl TryFrom<RawSelectionRequest> for SelectionRequest {
    type Error = AppError;

    fn try_from(raw: RawSelectionRequest) -> Result<Self, Self::Error> {
        raw.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let num_tracks = raw.num_tracks.unwrap_or(DEFAULT_NUM_TRACKS);
        if !(1..=MAX_NUM_TRACKS).contains(&num_tracks) {
            return Err(AppError::Validation(format!(
                "num_tracks must be between 1 and {}, got {}",
                MAX_NUM_TRACKS, num_tracks
            )));
        }

        let mode = match (raw.artists, raw.genre) {
            (Some(_), Some(_)) => {
                return Err(AppError::Validation(
                    "Specify either artists or genre, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "One of artists or genre is required".to_string(),
                ))
            }
            (Some(artists), None) => {
                let artist_names: Vec<String> =
                    artists.iter().map(|a| a.trim().to_string()).collect();
                if artist_names.is_empty() || artist_names.iter().any(|a| a.is_empty()) {
                    return Err(AppError::Validation(
                        "Artist names must not be blank".to_string(),
                    ));
                }
                SelectionMode::Artists { artist_names }
            }
            (None, Some(genre)) => {
                let genre = genre.trim().to_lowercase();
                if genre.is_empty() {
                    return Err(AppError::Validation("Genre must not be blank".to_string()));
                }
                SelectionMode::Genre { genre }
            }
        };

        let collection_name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());

        Ok(SelectionRequest {
            num_tracks: num_tracks as usize,
            mode,
            output_action: raw
                .action_type
                .as_deref()
                .map(OutputAction::classify)
                .unwrap_or(OutputAction::Recommend),
            collection_name,
        })
    }
}
