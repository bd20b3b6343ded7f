pub mod artist_selector;
pub mod catalog;
pub mod curation;
pub mod genre_selector;
pub mod materializer;
pub mod sampling;
pub mod spotify;

#[cfg(test)]
pub mod fake_catalog;

pub use catalog::CatalogGateway;
pub use curation::CurationEngine;
pub use spotify::SpotifyClient;
