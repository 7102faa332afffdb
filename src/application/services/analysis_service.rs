use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::application::ports::{
    Classifier, ClassifierError, FileLoader, FileLoaderError, Vectorizer, VectorizerError,
};
use crate::domain::{
    AnalysisPayload, Document, DocumentFormat, NO_RELIGION_DETECTED, SentimentLabel, argmax,
    filter_distribution, is_religious, round_to, to_percentage_map,
};

use super::mention_analyzer::MentionAnalyzer;
use super::text_cleaner::clean_text;
use super::top_terms::top_terms;

const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builds the analysis payload for one document from the shared, read-only
/// vectorizer and the two classifiers.
pub struct AnalysisService {
    file_loader: Arc<dyn FileLoader>,
    vectorizer: Arc<dyn Vectorizer>,
    sentiment_classifier: Arc<dyn Classifier>,
    religion_classifier: Arc<dyn Classifier>,
    mention_analyzer: MentionAnalyzer,
}

impl AnalysisService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        vectorizer: Arc<dyn Vectorizer>,
        sentiment_classifier: Arc<dyn Classifier>,
        religion_classifier: Arc<dyn Classifier>,
    ) -> Self {
        let mention_analyzer =
            MentionAnalyzer::new(Arc::clone(&vectorizer), Arc::clone(&sentiment_classifier));

        Self {
            file_loader,
            vectorizer,
            sentiment_classifier,
            religion_classifier,
            mention_analyzer,
        }
    }

    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub fn analyze(&self, source_name: &str, text: &str) -> Result<AnalysisPayload, AnalysisError> {
        let started = Instant::now();

        let cleaned = clean_text(text);
        let total_words = cleaned.split_whitespace().count();
        let features = self.vectorizer.transform(&cleaned)?;

        let sentiment = self.sentiment_classifier.predict(&features)?;
        let sentiment_classes = self.sentiment_classifier.classes();
        let sentiment_probabilities = to_percentage_map(sentiment_classes, &sentiment.probabilities);

        let overall_sentiment = match SentimentLabel::parse(&sentiment.label) {
            Some(label) => label.as_str().to_string(),
            None => argmax(&sentiment.probabilities)
                .map(|index| sentiment_classes[index].to_lowercase())
                .unwrap_or_else(|| sentiment.label.to_lowercase()),
        };

        let religion = self.religion_classifier.predict(&features)?;
        let religion_classes = self.religion_classifier.classes();
        let filtered = filter_distribution(religion_classes, &religion.probabilities);
        let religion_probabilities = to_percentage_map(&filtered.labels, &filtered.probabilities);

        let predicted_religion = if !filtered.religious_only {
            NO_RELIGION_DETECTED.to_string()
        } else if is_religious(&religion.label) {
            religion.label.clone()
        } else {
            filtered
                .top_label()
                .unwrap_or(NO_RELIGION_DETECTED)
                .to_string()
        };

        let results = self.mention_analyzer.analyze(text, religion_classes)?;
        let religions_detected = results.iter().filter(|r| r.total_mentions > 0).count();

        let analysis_time = round_to(started.elapsed().as_secs_f64(), 3);

        tracing::info!(
            total_words,
            overall_sentiment = %overall_sentiment,
            raw_religion = %religion.label,
            predicted_religion = %predicted_religion,
            religions_detected,
            analysis_time,
            "Analysis complete"
        );

        Ok(AnalysisPayload {
            filename: source_name.to_string(),
            upload_time: Utc::now().format(UPLOAD_TIME_FORMAT).to_string(),
            total_words,
            analysis_time,
            overall_sentiment,
            predicted_religion,
            religions_detected,
            religion_probabilities,
            sentiment_probabilities,
            results,
        })
    }

    /// Runs [`Self::analyze`] on the blocking pool so the runtime keeps serving.
    pub async fn analyze_blocking(
        self: Arc<Self>,
        source_name: String,
        text: String,
    ) -> Result<AnalysisPayload, AnalysisError> {
        tokio::task::spawn_blocking(move || self.analyze(&source_name, &text))
            .await
            .map_err(|e| AnalysisError::TaskFailed(e.to_string()))?
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract_text(&self, data: &[u8], filename: &str) -> Result<String, AnalysisError> {
        let format = DocumentFormat::from_filename(filename)
            .ok_or_else(|| AnalysisError::UnsupportedFormat(filename.to_string()))?;
        let document = Document::new(filename.to_string(), format, data.len() as u64);

        let text = self.file_loader.extract_text(data, &document).await?;
        tracing::debug!(
            document_id = %document.id.as_uuid(),
            chars = text.len(),
            "Text extracted"
        );

        Ok(text)
    }

    pub fn categories(&self) -> CategoryBreakdown {
        let all: Vec<String> = self.religion_classifier.classes().to_vec();
        let (religious, non_religious): (Vec<String>, Vec<String>) =
            all.iter().cloned().partition(|c| is_religious(c));

        CategoryBreakdown {
            all,
            religious,
            non_religious,
        }
    }

    pub fn top_terms(&self, text: &str, top_k: usize) -> Result<Vec<String>, AnalysisError> {
        Ok(top_terms(self.vectorizer.as_ref(), text, top_k)?)
    }
}

/// Category classifier labels split by the religious allow-list.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub all: Vec<String>,
    pub religious: Vec<String>,
    pub non_religious: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("unsupported file: {0}")]
    UnsupportedFormat(String),
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("vectorization: {0}")]
    Vectorization(#[from] VectorizerError),
    #[error("classification: {0}")]
    Classification(#[from] ClassifierError),
    #[error("analysis task failed: {0}")]
    TaskFailed(String),
}
