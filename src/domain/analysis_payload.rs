use serde::Serialize;

use super::{MentionRecord, PercentageMap};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub filename: String,
    pub upload_time: String,
    pub total_words: usize,
    pub analysis_time: f64,
    pub overall_sentiment: String,
    pub predicted_religion: String,
    pub religions_detected: usize,
    pub religion_probabilities: PercentageMap,
    pub sentiment_probabilities: PercentageMap,
    pub results: Vec<MentionRecord>,
}
