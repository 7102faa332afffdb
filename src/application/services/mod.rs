mod analysis_service;
mod mention_analyzer;
mod text_cleaner;
mod top_terms;

pub use analysis_service::{AnalysisError, AnalysisService, CategoryBreakdown};
pub use mention_analyzer::{MentionAnalyzer, split_sentences};
pub use text_cleaner::clean_text;
pub use top_terms::{DEFAULT_TOP_TERMS, top_terms};
