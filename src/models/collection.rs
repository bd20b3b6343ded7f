use super::{TrackDetails, TrackRef};
use serde::{Deserialize, Serialize};

/// A named, owned, ordered grouping of tracks persisted by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub track_refs: Vec<TrackRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

/// What a curation request produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurationOutcome {
    Recommendations { tracks: Vec<TrackDetails> },
    Collection { collection: Collection },
}

impl CurationOutcome {
    pub fn track_count(&self) -> usize {
        match self {
            CurationOutcome::Recommendations { tracks } => tracks.len(),
            CurationOutcome::Collection { collection } => collection.track_refs.len(),
        }
    }
}
