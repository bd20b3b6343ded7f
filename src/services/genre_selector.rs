//! Genre-driven selection.
//!
//! Two independent signals feed one candidate pool:
//! 1. Artists from the listener's recent history whose genres include the
//!    target genre contribute all of their top tracks.
//! 2. One randomly picked new release contributes `num_tracks` draws (with
//!    replacement) from its track listing if its artist carries the genre.
//!
//! The pool is de-duplicated and truncated. An empty result is valid.

use crate::error::Result;
use crate::models::{ArtistRef, TrackRef};
use crate::services::CatalogGateway;
use crate::services::sampling::{dedup_preserving_order, sample_with_replacement};
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct GenreSelector {
    catalog: Arc<dyn CatalogGateway>,
    market: String,
    new_release_limit: usize,
}

impl GenreSelector {
    pub fn new(catalog: Arc<dyn CatalogGateway>, market: String, new_release_limit: usize) -> Self {
        Self {
            catalog,
            market,
            new_release_limit,
        }
    }

    /// Best effort: returns at most `num_tracks` distinct tracks.
    pub async fn select(
        &self,
        genre: &str,
        num_tracks: usize,
        rng: &Mutex<StdRng>,
    ) -> Result<Vec<TrackRef>> {
        let genre = genre.trim().to_lowercase();

        let mut pool = self.from_recent_history(&genre).await?;
        let history_count = pool.len();
        let release_draws = self.from_new_release(&genre, num_tracks, rng).await?;
        let release_count = release_draws.len();
        pool.extend(release_draws);

        let mut tracks = dedup_preserving_order(pool);
        tracks.truncate(num_tracks);

        tracing::info!(
            "Genre '{}': {} history candidates, {} new-release draws, {} selected",
            genre,
            history_count,
            release_count,
            tracks.len()
        );

        Ok(tracks)
    }

    async fn from_recent_history(&self, genre: &str) -> Result<Vec<TrackRef>> {
        let plays = self.catalog.get_recently_played().await?;

        let mut seen = HashSet::new();
        let artists: Vec<ArtistRef> = plays
            .into_iter()
            .map(|play| play.artist)
            .filter(|artist| seen.insert(artist.id.clone()))
            .collect();

        tracing::debug!("{} distinct artists in recent history", artists.len());

        let genre_sets =
            try_join_all(artists.iter().map(|artist| self.catalog.get_artist_genres(artist))).await?;

        let matching: Vec<&ArtistRef> = artists
            .iter()
            .zip(genre_sets.iter())
            .filter(|(artist, genres)| {
                if genres.is_empty() {
                    tracing::debug!("No genres listed for {}, skipping", artist.id);
                }
                genres.contains(genre)
            })
            .map(|(artist, _)| artist)
            .collect();

        tracing::debug!("{} recent artists tagged '{}'", matching.len(), genre);

        let track_lists =
            try_join_all(matching.iter().map(|artist| self.catalog.get_artist_top_tracks(artist)))
                .await?;

        Ok(track_lists.into_iter().flatten().collect())
    }

    async fn from_new_release(
        &self,
        genre: &str,
        num_tracks: usize,
        rng: &Mutex<StdRng>,
    ) -> Result<Vec<TrackRef>> {
        let releases = self
            .catalog
            .get_new_releases(&self.market, self.new_release_limit)
            .await?;

        if releases.is_empty() {
            tracing::warn!("New-release listing for {} is empty", self.market);
            return Ok(Vec::new());
        }

        let release = {
            let mut rng = rng.lock().await;
            &releases[rng.gen_range(0..releases.len())]
        };

        let genres = self.catalog.get_artist_genres(&release.artist).await?;
        if !genres.contains(genre) {
            tracing::debug!(
                "New release '{}' by {} is not tagged '{}'",
                release.name,
                release.artist.id,
                genre
            );
            return Ok(Vec::new());
        }

        let album_tracks = self.catalog.get_album_tracks(&release.album_id).await?;
        if album_tracks.is_empty() {
            tracing::warn!("New release '{}' has no tracks", release.name);
            return Ok(Vec::new());
        }

        let mut rng = rng.lock().await;
        Ok(sample_with_replacement(&album_tracks, num_tracks, &mut *rng))
    }
}
