use crate::config::Config;
use crate::error::Result;
use crate::models::{CurationOutcome, RawSelectionRequest, SelectionMode, SelectionRequest};
use crate::services::artist_selector::ArtistSelector;
use crate::services::CatalogGateway;
use crate::services::genre_selector::GenreSelector;
use crate::services::materializer::OutputMaterializer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Validates a request, runs the matching selector and materializes the result.
///
/// Built once at startup and shared across requests; requests do not
/// coordinate beyond drawing from the shared RNG.
pub struct CurationEngine {
    artist_selector: ArtistSelector,
    genre_selector: GenreSelector,
    materializer: OutputMaterializer,
    rng: Mutex<StdRng>,
}

impl CurationEngine {
    pub fn new(catalog: Arc<dyn CatalogGateway>, config: &Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                tracing::info!("Sampling with fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self::with_rng(catalog, config.market.clone(), config.new_release_limit, rng)
    }

    pub fn with_rng(
        catalog: Arc<dyn CatalogGateway>,
        market: String,
        new_release_limit: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            artist_selector: ArtistSelector::new(catalog.clone()),
            genre_selector: GenreSelector::new(catalog.clone(), market.clone(), new_release_limit),
            materializer: OutputMaterializer::new(catalog, market),
            rng: Mutex::new(rng),
        }
    }

    pub async fn curate(&self, raw: RawSelectionRequest) -> Result<CurationOutcome> {
        let request = SelectionRequest::try_from(raw)?;
        self.execute(&request).await
    }

    pub async fn execute(&self, request: &SelectionRequest) -> Result<CurationOutcome> {
        tracing::info!(
            "Curating {} tracks ({:?}, {:?})",
            request.num_tracks,
            request.mode,
            request.output_action
        );

        let tracks = match &request.mode {
            SelectionMode::Artists { artist_names } => {
                self.artist_selector
                    .select(artist_names, request.num_tracks, &self.rng)
                    .await?
            }
            SelectionMode::Genre { genre } => {
                self.genre_selector
                    .select(genre, request.num_tracks, &self.rng)
                    .await?
            }
        };

        self.materializer
            .materialize(tracks, request.output_action, &request.collection_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::fake_catalog::FakeCatalog;

    fn engine(catalog: Arc<FakeCatalog>, seed: u64) -> CurationEngine {
        CurationEngine::with_rng(catalog, "US".to_string(), 5, StdRng::seed_from_u64(seed))
    }

    fn catalog() -> Arc<FakeCatalog> {
        Arc::new(
            FakeCatalog::new()
                .with_artist("Charlie Puth", &["pop"], &["c1", "c2", "c3"])
                .with_artist("Pitbull", &["pop", "dance pop"], &["p1", "p2"])
                .with_recent_play("Pitbull", "p1"),
        )
    }

    #[tokio::test]
    async fn test_artist_request_recommends_by_default() {
        let catalog = catalog();
        let raw = RawSelectionRequest {
            num_tracks: Some(4),
            artists: Some(vec!["Charlie Puth".to_string(), "Pitbull".to_string()]),
            ..Default::default()
        };

        let outcome = engine(catalog.clone(), 3).curate(raw).await.unwrap();

        assert!(matches!(outcome, CurationOutcome::Recommendations { ref tracks } if tracks.len() == 4));
        assert_eq!(catalog.count_calls("create_collection"), 0);
        assert_eq!(catalog.count_calls("recently_played"), 0);
    }

    #[tokio::test]
    async fn test_genre_request_creates_collection() {
        let catalog = catalog();
        let raw = RawSelectionRequest {
            num_tracks: Some(15),
            genre: Some("pop".to_string()),
            name: Some("Pop Party".to_string()),
            action_type: Some("create playlist".to_string()),
            ..Default::default()
        };

        let outcome = engine(catalog.clone(), 3).curate(raw).await.unwrap();

        match outcome {
            CurationOutcome::Collection { collection } => {
                assert_eq!(collection.name, "Pop Party");
                assert_eq!(collection.track_refs.len(), 2);
            }
            other => panic!("expected collection, got {:?}", other),
        }
        assert_eq!(catalog.count_calls("create_collection"), 1);
        assert_eq!(catalog.count_calls("append"), 1);
        assert_eq!(catalog.count_calls("search:"), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_catalog_calls() {
        let catalog = catalog();
        let raw = RawSelectionRequest {
            num_tracks: Some(0),
            genre: Some("pop".to_string()),
            ..Default::default()
        };

        let err = engine(catalog.clone(), 1).curate(raw).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(catalog.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fatal_error_returns_no_tracks_and_no_collection() {
        let catalog = catalog();
        let raw = RawSelectionRequest {
            num_tracks: Some(6),
            artists: Some(vec!["Charlie Puth".to_string(), "Pitbull".to_string()]),
            action_type: Some("playlist".to_string()),
            ..Default::default()
        };

        let err = engine(catalog.clone(), 1).curate(raw).await.unwrap_err();

        assert!(matches!(err, AppError::PoolExhausted { requested: 6, available: 5 }));
        assert_eq!(catalog.count_calls("create_collection"), 0);
    }

    #[tokio::test]
    async fn test_same_seed_same_selection() {
        let raw = RawSelectionRequest {
            num_tracks: Some(3),
            artists: Some(vec!["Charlie Puth".to_string(), "Pitbull".to_string()]),
            ..Default::default()
        };

        let first = engine(catalog(), 11).curate(raw.clone()).await.unwrap();
        let second = engine(catalog(), 11).curate(raw).await.unwrap();
        assert_eq!(first, second);
    }
}
