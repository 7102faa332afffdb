pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Environment, LoggingSettings, ModelSettings, ServerSettings, Settings};
pub use router::create_router;
pub use state::AppState;
