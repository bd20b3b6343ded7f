//! Capability boundary to the remote music catalog.
//!
//! Selectors only ever talk to the catalog through this trait so the
//! selection rules can run against the real service or an in-memory fake.

use crate::error::Result;
use crate::models::{ArtistRef, Collection, GenreSet, NewRelease, RecentPlay, TrackDetails, TrackRef};
use async_trait::async_trait;

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Exact-name artist search; `None` when the catalog has no match.
    async fn search_artist_by_name(&self, name: &str) -> Result<Option<ArtistRef>>;

    async fn get_artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<TrackRef>>;

    /// Possibly empty.
    async fn get_artist_genres(&self, artist: &ArtistRef) -> Result<GenreSet>;

    async fn get_recently_played(&self) -> Result<Vec<RecentPlay>>;

    async fn get_new_releases(&self, market: &str, limit: usize) -> Result<Vec<NewRelease>>;

    async fn get_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>>;

    async fn get_track_details(&self, tracks: &[TrackRef], market: &str) -> Result<Vec<TrackDetails>>;

    /// Id of the account that will own created collections
    async fn current_user_id(&self) -> Result<String>;

    async fn create_collection(&self, owner_id: &str, name: &str) -> Result<Collection>;

    /// Appends in one batch; returns the catalog's snapshot id if it reports one.
    async fn append_tracks_to_collection(
        &self,
        collection_id: &str,
        tracks: &[TrackRef],
    ) -> Result<Option<String>>;
}
