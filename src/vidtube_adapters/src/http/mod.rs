pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::{optional_auth, require_auth};
pub use state::AppState;
