mod analyze;
mod debug;
mod error;
mod health;

pub use analyze::{analyze_file_handler, analyze_text_handler};
pub use debug::{categories_handler, top_terms_handler};
pub use error::{ErrorResponse, NO_TEXT_PROVIDED, UNSUPPORTED_FILE};
pub use health::health_handler;
