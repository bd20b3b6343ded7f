pub mod artist;
pub mod collection;
pub mod request;
pub mod track;

pub use artist::{genre_set, ArtistRef, GenreSet, NewRelease, RecentPlay};
pub use collection::{Collection, CurationOutcome};
pub use request::{OutputAction, RawSelectionRequest, SelectionMode, SelectionRequest};
pub use track::{TrackDetails, TrackRef};
