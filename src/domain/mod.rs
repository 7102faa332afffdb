mod analysis_payload;
mod document;
mod feature_vector;
mod mention;
mod percentage;
mod religious_category;
mod sentiment;

pub use analysis_payload::AnalysisPayload;
pub use document::{Document, DocumentFormat, DocumentId};
pub use feature_vector::FeatureVector;
pub use mention::{MAX_MENTION_EXAMPLES, MentionRecord};
pub use percentage::{PercentageMap, argmax, round_to, to_percentage_map};
pub use religious_category::{
    FilteredDistribution, NO_RELIGION_DETECTED, filter_distribution, is_religious,
};
pub use sentiment::SentimentLabel;
