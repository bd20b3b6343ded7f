pub mod curate;

pub use curate::{curate_routes, AppState};
