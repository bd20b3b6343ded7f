use crate::error::{AppError, Result};
use crate::models::{ArtistRef, TrackRef};
use crate::services::CatalogGateway;
use crate::services::sampling::sample_without_replacement;
use futures::future::try_join_all;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Draws tracks from the combined top tracks of named artists.
pub struct ArtistSelector {
    catalog: Arc<dyn CatalogGateway>,
}

impl ArtistSelector {
    pub fn new(catalog: Arc<dyn CatalogGateway>) -> Self {
        Self { catalog }
    }

    /// Returns exactly `num_tracks` tracks, or fails. Never returns a partial list.
    pub async fn select(
        &self,
        artist_names: &[String],
        num_tracks: usize,
        rng: &Mutex<StdRng>,
    ) -> Result<Vec<TrackRef>> {
        let pool = self.build_pool(artist_names).await?;
        tracing::debug!(
            "Aggregate pool of {} tracks from {} artists",
            pool.len(),
            artist_names.len()
        );

        let mut rng = rng.lock().await;
        sample_without_replacement(pool, num_tracks, &mut *rng).map_err(|e| {
            AppError::PoolExhausted {
                requested: e.requested,
                available: e.available,
            }
        })
    }

    /// Concatenates every artist's top tracks in input order. Tracks shared
    /// between artists stay duplicated.
    pub async fn build_pool(&self, artist_names: &[String]) -> Result<Vec<TrackRef>> {
        let artists = try_join_all(artist_names.iter().map(|name| self.resolve(name))).await?;
        let track_lists = try_join_all(artists.iter().map(|artist| self.top_tracks(artist))).await?;

        Ok(track_lists.into_iter().flatten().collect())
    }

    async fn resolve(&self, name: &str) -> Result<ArtistRef> {
        let artist = self
            .catalog
            .search_artist_by_name(name)
            .await?
            .ok_or_else(|| AppError::ArtistNotFound(name.to_string()))?;

        tracing::debug!("Resolved artist '{}' to {}", name, artist.id);
        Ok(artist)
    }

    async fn top_tracks(&self, artist: &ArtistRef) -> Result<Vec<TrackRef>> {
        let tracks = self.catalog.get_artist_top_tracks(artist).await?;
        if tracks.is_empty() {
            let name = if artist.name.is_empty() { &artist.id } else { &artist.name };
            return Err(AppError::NoTracksFound(name.clone()));
        }
        Ok(tracks)
    }
}
