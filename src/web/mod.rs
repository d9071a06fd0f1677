//! Web module
//!
//! Templates for the HTML fragments, plus the demo search page server.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
