use serde::Serialize;

pub const MAX_MENTION_EXAMPLES: usize = 3;

/// Averaged sentiment for the sentences that name one religious category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionRecord {
    pub religion: String,
    pub negativity: f64,
    pub positivity: f64,
    pub neutral: f64,
    pub total_mentions: usize,
    pub examples: Vec<String>,
}
