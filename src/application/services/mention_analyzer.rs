use std::sync::Arc;

use crate::application::ports::{Classifier, Vectorizer};
use crate::domain::{MAX_MENTION_EXAMPLES, MentionRecord, is_religious, to_percentage_map};

use super::analysis_service::AnalysisError;
use super::text_cleaner::clean_text;

const SENTENCE_DELIMITERS: [char; 3] = ['.', '!', '?'];

/// Re-scores the sentences that name each religious category with the
/// sentiment classifier.
pub struct MentionAnalyzer {
    vectorizer: Arc<dyn Vectorizer>,
    sentiment_classifier: Arc<dyn Classifier>,
}

impl MentionAnalyzer {
    pub fn new(
        vectorizer: Arc<dyn Vectorizer>,
        sentiment_classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            vectorizer,
            sentiment_classifier,
        }
    }

    /// Labels that are not religious, or that no sentence mentions, or whose
    /// mentions all clean down to nothing, produce no record.
    pub fn analyze(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<MentionRecord>, AnalysisError> {
        let sentences = split_sentences(text);
        let mut records = Vec::new();

        for label in labels.iter().filter(|l| is_religious(l)) {
            let mentions = find_mentions(&sentences, label);
            if mentions.is_empty() {
                continue;
            }

            let Some(averaged) = self.average_sentiment(&mentions)? else {
                tracing::debug!(religion = %label, "Mentions cleaned to empty text, skipping");
                continue;
            };

            let percentages = to_percentage_map(self.sentiment_classifier.classes(), &averaged);

            records.push(MentionRecord {
                religion: label.clone(),
                negativity: percentages.get("negative").unwrap_or(0.0),
                positivity: percentages.get("positive").unwrap_or(0.0),
                neutral: percentages.get("neutral").unwrap_or(0.0),
                total_mentions: mentions.len(),
                examples: mentions
                    .iter()
                    .take(MAX_MENTION_EXAMPLES)
                    .map(|m| m.to_string())
                    .collect(),
            });
        }

        Ok(records)
    }

    fn average_sentiment(&self, mentions: &[&str]) -> Result<Option<Vec<f64>>, AnalysisError> {
        let mut sum: Vec<f64> = Vec::new();
        let mut scored = 0usize;

        for mention in mentions {
            let cleaned = clean_text(mention);
            if cleaned.is_empty() {
                continue;
            }

            let features = self.vectorizer.transform(&cleaned)?;
            let prediction = self.sentiment_classifier.predict(&features)?;

            if sum.is_empty() {
                sum = vec![0.0; prediction.probabilities.len()];
            }
            for (total, p) in sum.iter_mut().zip(&prediction.probabilities) {
                *total += p;
            }
            scored += 1;
        }

        if scored == 0 {
            return Ok(None);
        }

        Ok(Some(sum.into_iter().map(|s| s / scored as f64).collect()))
    }
}

pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_DELIMITERS).collect()
}

fn find_mentions<'a>(sentences: &[&'a str], label: &str) -> Vec<&'a str> {
    let needle = label.to_lowercase();
    sentences
        .iter()
        .filter(|s| s.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_delimiters_when_splitting_then_keeps_every_fragment() {
        let sentences = split_sentences("One. Two! Three? Four");
        assert_eq!(sentences, vec!["One", " Two", " Three", " Four"]);
    }

    #[test]
    fn given_label_in_different_case_when_finding_mentions_then_matches() {
        let sentences = split_sentences("I love ISLAM. I hate rain. islam is peaceful.");
        let mentions = find_mentions(&sentences, "Islam");
        assert_eq!(mentions, vec!["I love ISLAM", " islam is peaceful"]);
    }
}
