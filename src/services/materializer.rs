use crate::error::Result;
use crate::models::{CurationOutcome, OutputAction, TrackRef};
use crate::services::CatalogGateway;
use std::sync::Arc;

/// Turns a final selection into either track metadata or a saved collection.
pub struct OutputMaterializer {
    catalog: Arc<dyn CatalogGateway>,
    market: String,
}

impl OutputMaterializer {
    pub fn new(catalog: Arc<dyn CatalogGateway>, market: String) -> Self {
        Self { catalog, market }
    }

    pub async fn materialize(
        &self,
        tracks: Vec<TrackRef>,
        action: OutputAction,
        collection_name: &str,
    ) -> Result<CurationOutcome> {
        match action {
            OutputAction::Recommend => self.recommend(&tracks).await,
            OutputAction::CreateCollection => self.create_collection(tracks, collection_name).await,
        }
    }

    /// Read-only
    async fn recommend(&self, tracks: &[TrackRef]) -> Result<CurationOutcome> {
        if tracks.is_empty() {
            return Ok(CurationOutcome::Recommendations { tracks: Vec::new() });
        }

        let details = self.catalog.get_track_details(tracks, &self.market).await?;
        Ok(CurationOutcome::Recommendations { tracks: details })
    }

    async fn create_collection(&self, tracks: Vec<TrackRef>, name: &str) -> Result<CurationOutcome> {
        let owner_id = self.catalog.current_user_id().await?;
        let mut collection = self.catalog.create_collection(&owner_id, name).await?;

        if tracks.is_empty() {
            tracing::warn!("Collection '{}' created with no tracks", collection.name);
        } else {
            collection.snapshot_id = self
                .catalog
                .append_tracks_to_collection(&collection.id, &tracks)
                .await?;
            tracing::info!(
                "Added {} tracks to collection '{}' ({})",
                tracks.len(),
                collection.name,
                collection.id
            );
        }

        collection.track_refs = tracks;
        Ok(CurationOutcome::Collection { collection })
    }
}
