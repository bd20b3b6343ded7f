//! In-memory catalog for exercising selectors without the network.

use crate::error::{AppError, Result};
use crate::models::{
    genre_set, ArtistRef, Collection, GenreSet, NewRelease, RecentPlay, TrackDetails, TrackRef,
};
use crate::services::CatalogGateway;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeCatalog {
    artists: HashMap<String, ArtistRef>,
    top_tracks: HashMap<String, Vec<TrackRef>>,
    genres: HashMap<String, GenreSet>,
    recent: Vec<RecentPlay>,
    new_releases: Vec<NewRelease>,
    album_tracks: HashMap<String, Vec<TrackRef>>,
    fail_searches: bool,
    fail_recent: bool,
    pub calls: Mutex<Vec<String>>,
    pub appended: Mutex<Vec<(String, Vec<TrackRef>)>>,
}

pub fn refs(ids: &[&str]) -> Vec<TrackRef> {
    ids.iter().map(|id| TrackRef::from(*id)).collect()
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artist searchable by `name`, keyed by a derived id.
    pub fn with_artist(mut self, name: &str, genres: &[&str], tracks: &[&str]) -> Self {
        let artist = ArtistRef::new(artist_id(name), name);
        self.genres.insert(artist.id.clone(), genre_set(genres));
        self.top_tracks.insert(artist.id.clone(), refs(tracks));
        self.artists.insert(name.to_string(), artist);
        self
    }

    pub fn with_recent_play(mut self, artist_name: &str, track: &str) -> Self {
        self.recent.push(RecentPlay {
            track: TrackRef::from(track),
            artist: ArtistRef::new(artist_id(artist_name), artist_name),
        });
        self
    }

    pub fn with_new_release(mut self, album_id: &str, artist_name: &str, tracks: &[&str]) -> Self {
        self.new_releases.push(NewRelease {
            album_id: album_id.to_string(),
            name: format!("{} LP", artist_name),
            artist: ArtistRef::new(artist_id(artist_name), artist_name),
        });
        self.album_tracks.insert(album_id.to_string(), refs(tracks));
        self
    }

    pub fn failing_searches(mut self) -> Self {
        self.fail_searches = true;
        self
    }

    pub fn failing_recent(mut self) -> Self {
        self.fail_recent = true;
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

fn artist_id(name: &str) -> String {
    format!("id-{}", name.to_lowercase().replace(' ', "-"))
}

#[async_trait]
impl CatalogGateway for FakeCatalog {
    async fn search_artist_by_name(&self, name: &str) -> Result<Option<ArtistRef>> {
        self.record(format!("search:{}", name));
        if self.fail_searches {
            return Err(AppError::Gateway("/search returned status: 429".to_string()));
        }
        Ok(self.artists.get(name).cloned())
    }

    async fn get_artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<TrackRef>> {
        self.record(format!("top_tracks:{}", artist.id));
        Ok(self.top_tracks.get(&artist.id).cloned().unwrap_or_default())
    }

    async fn get_artist_genres(&self, artist: &ArtistRef) -> Result<GenreSet> {
        self.record(format!("genres:{}", artist.id));
        Ok(self.genres.get(&artist.id).cloned().unwrap_or_default())
    }

    async fn get_recently_played(&self) -> Result<Vec<RecentPlay>> {
        self.record("recently_played".to_string());
        if self.fail_recent {
            return Err(AppError::Gateway(
                "/me/player/recently-played returned status: 401".to_string(),
            ));
        }
        Ok(self.recent.clone())
    }

    async fn get_new_releases(&self, _market: &str, limit: usize) -> Result<Vec<NewRelease>> {
        self.record(format!("new_releases:{}", limit));
        Ok(self.new_releases.iter().take(limit).cloned().collect())
    }

    async fn get_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>> {
        self.record(format!("album_tracks:{}", album_id));
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn get_track_details(&self, tracks: &[TrackRef], _market: &str) -> Result<Vec<TrackDetails>> {
        self.record(format!("track_details:{}", tracks.len()));
        Ok(tracks
            .iter()
            .map(|t| TrackDetails {
                id: t.clone(),
                name: format!("Track {}", t),
                artists: vec!["Someone".to_string()],
                album: "Somewhere".to_string(),
                duration_ms: 180_000,
                uri: format!("spotify:track:{}", t),
            })
            .collect())
    }

    async fn current_user_id(&self) -> Result<String> {
        self.record("current_user".to_string());
        Ok("listener".to_string())
    }

    async fn create_collection(&self, owner_id: &str, name: &str) -> Result<Collection> {
        self.record(format!("create_collection:{}:{}", owner_id, name));
        Ok(Collection {
            id: "pl-1".to_string(),
            name: name.to_string(),
            track_refs: Vec::new(),
            snapshot_id: None,
        })
    }

    async fn append_tracks_to_collection(
        &self,
        collection_id: &str,
        tracks: &[TrackRef],
    ) -> Result<Option<String>> {
        self.record(format!("append:{}", collection_id));
        self.appended
            .lock()
            .unwrap()
            .push((collection_id.to_string(), tracks.to_vec()));
        Ok(Some("snap-1".to_string()))
    }
}
