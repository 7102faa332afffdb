pub mod ml;
pub mod observability;
pub mod text_processing;
