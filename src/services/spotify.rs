use crate::error::{AppError, Result};
use crate::models::{
    genre_set, ArtistRef, Collection, GenreSet, NewRelease, RecentPlay, TrackDetails, TrackRef,
};
use crate::services::CatalogGateway;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum ids accepted by one bulk track lookup
const TRACK_DETAILS_CHUNK: usize = 50;

const RECENTLY_PLAYED_LIMIT: &str = "50";

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: String,
    access_token: String,
    market: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    artists: Paging<ArtistObject>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SimpleArtist {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumObject {
    // Null for the album of a local file
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<SimpleArtist>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    // Local files in a listener's history have no catalog id
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<SimpleArtist>,
    album: Option<AlbumObject>,
    #[serde(default)]
    duration_ms: u32,
    #[serde(default)]
    uri: String,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    tracks: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct PlayHistoryObject {
    track: TrackObject,
}

#[derive(Debug, Deserialize)]
struct NewReleasesResponse {
    albums: Paging<AlbumObject>,
}

#[derive(Debug, Deserialize)]
struct TracksResponse {
    tracks: Vec<Option<TrackObject>>,
}

#[derive(Debug, Deserialize)]
struct UserObject {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    public: bool,
}

#[derive(Debug, Deserialize)]
struct PlaylistObject {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct AddItemsBody {
    uris: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    snapshot_id: Option<String>,
}

impl SpotifyClient {
    pub fn new(
        base_url: String,
        access_token: String,
        market: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Gateway(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            market,
            client,
        })
    }

    pub fn track_uri(track: &TrackRef) -> String {
        format!("spotify:track:{}", track.as_str())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Catalog GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Request to {} failed: {}", path, e)))?;

        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Catalog POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Request to {} failed: {}", path, e)))?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Catalog API error on {}: {} - {}", path, status, body);
            return Err(AppError::Gateway(format!(
                "{} returned status: {} - {}",
                path,
                status,
                preview(&body, 200)
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to read {} response: {}", path, e)))?;

        parse_body(path, &text)
    }
}

fn parse_body<T: DeserializeOwned>(path: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        AppError::Gateway(format!(
            "Failed to parse {} response: {} - Response: {}",
            path,
            e,
            preview(text, 200)
        ))
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn artist_ref(artist: &SimpleArtist) -> Option<ArtistRef> {
    artist
        .id
        .as_ref()
        .map(|id| ArtistRef::new(id.clone(), artist.name.clone()))
}

/// Attributes a play to the album's lead artist, falling back to the
/// track's lead artist.
fn recent_play(item: PlayHistoryObject) -> Option<RecentPlay> {
    let track = TrackRef::new(item.track.id?);
    let artist = item
        .track
        .album
        .as_ref()
        .and_then(|album| album.artists.first())
        .and_then(artist_ref)
        .or_else(|| item.track.artists.first().and_then(artist_ref))?;

    Some(RecentPlay { track, artist })
}

fn new_release(album: AlbumObject) -> Option<NewRelease> {
    let artist = album.artists.first().and_then(artist_ref)?;
    Some(NewRelease {
        album_id: album.id?,
        name: album.name,
        artist,
    })
}

fn track_details(track: TrackObject) -> Option<TrackDetails> {
    Some(TrackDetails {
        id: TrackRef::new(track.id?),
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
        album: track.album.map(|a| a.name).unwrap_or_default(),
        duration_ms: track.duration_ms,
        uri: track.uri,
    })
}

#[async_trait]
impl CatalogGateway for SpotifyClient {
    async fn search_artist_by_name(&self, name: &str) -> Result<Option<ArtistRef>> {
        let query = format!("artist:{}", name);
        let data: SearchResponse = self
            .get_json("/search", &[("q", query.as_str()), ("type", "artist"), ("limit", "1")])
            .await?;

        Ok(data
            .artists
            .items
            .into_iter()
            .next()
            .map(|a| ArtistRef::new(a.id, a.name)))
    }

    async fn get_artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<TrackRef>> {
        let path = format!("/artists/{}/top-tracks", artist.id);
        let data: TopTracksResponse = self
            .get_json(&path, &[("market", self.market.as_str())])
            .await?;

        Ok(data
            .tracks
            .into_iter()
            .filter_map(|t| t.id.map(TrackRef::new))
            .collect())
    }

    async fn get_artist_genres(&self, artist: &ArtistRef) -> Result<GenreSet> {
        let path = format!("/artists/{}", artist.id);
        let data: ArtistObject = self.get_json(&path, &[]).await?;
        Ok(genre_set(&data.genres))
    }

    async fn get_recently_played(&self) -> Result<Vec<RecentPlay>> {
        let data: Paging<PlayHistoryObject> = self
            .get_json("/me/player/recently-played", &[("limit", RECENTLY_PLAYED_LIMIT)])
            .await?;

        Ok(data.items.into_iter().filter_map(recent_play).collect())
    }

    async fn get_new_releases(&self, market: &str, limit: usize) -> Result<Vec<NewRelease>> {
        let limit = limit.to_string();
        let data: NewReleasesResponse = self
            .get_json("/browse/new-releases", &[("country", market), ("limit", limit.as_str())])
            .await?;

        Ok(data.albums.items.into_iter().filter_map(new_release).collect())
    }

    async fn get_album_tracks(&self, album_id: &str) -> Result<Vec<TrackRef>> {
        let path = format!("/albums/{}/tracks", album_id);
        let data: Paging<TrackObject> = self.get_json(&path, &[("limit", "50")]).await?;

        Ok(data
            .items
            .into_iter()
            .filter_map(|t| t.id.map(TrackRef::new))
            .collect())
    }

    async fn get_track_details(&self, tracks: &[TrackRef], market: &str) -> Result<Vec<TrackDetails>> {
        let mut details = Vec::with_capacity(tracks.len());

        for chunk in tracks.chunks(TRACK_DETAILS_CHUNK) {
            let ids = chunk
                .iter()
                .map(TrackRef::as_str)
                .collect::<Vec<_>>()
                .join(",");
            let data: TracksResponse = self
                .get_json("/tracks", &[("ids", ids.as_str()), ("market", market)])
                .await?;

            details.extend(data.tracks.into_iter().flatten().filter_map(track_details));
        }

        Ok(details)
    }

    async fn current_user_id(&self) -> Result<String> {
        let user: UserObject = self.get_json("/me", &[]).await?;
        Ok(user.id)
    }

    async fn create_collection(&self, owner_id: &str, name: &str) -> Result<Collection> {
        let path = format!("/users/{}/playlists", owner_id);
        let playlist: PlaylistObject = self
            .post_json(&path, &CreatePlaylistBody { name, public: true })
            .await?;

        tracing::info!("Created playlist '{}' ({})", playlist.name, playlist.id);

        Ok(Collection {
            id: playlist.id,
            name: playlist.name,
            track_refs: Vec::new(),
            snapshot_id: None,
        })
    }

    async fn append_tracks_to_collection(
        &self,
        collection_id: &str,
        tracks: &[TrackRef],
    ) -> Result<Option<String>> {
        let path = format!("/playlists/{}/tracks", collection_id);
        let body = AddItemsBody {
            uris: tracks.iter().map(Self::track_uri).collect(),
        };
        let data: SnapshotResponse = self.post_json(&path, &body).await?;
        Ok(data.snapshot_id)
    }
}
