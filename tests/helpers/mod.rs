#![allow(dead_code)]

use std::sync::Arc;

use bias_detector::application::ports::{
    Classifier, ClassifierError, ClassifierOutput, Vectorizer, VectorizerError,
};
use bias_detector::application::services::AnalysisService;
use bias_detector::domain::FeatureVector;
use bias_detector::infrastructure::text_processing::CompositeFileLoader;

pub const VOCABULARY: &[&str] = &[
    "love",
    "hate",
    "peaceful",
    "rain",
    "islam",
    "christianity",
    "prayer",
];

/// Bag-of-words counts over a fixed vocabulary, split on whitespace.
pub struct WordCountVectorizer {
    names: Vec<String>,
}

impl WordCountVectorizer {
    pub fn new(words: &[&str]) -> Self {
        Self {
            names: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Vectorizer for WordCountVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, VectorizerError> {
        let entries = text
            .split_whitespace()
            .filter_map(|token| self.names.iter().position(|n| n == token))
            .map(|index| (index, 1.0))
            .collect();
        Ok(FeatureVector::new(self.names.len(), entries))
    }

    fn feature_names(&self) -> &[String] {
        &self.names
    }
}

/// Returns the same distribution whatever the input.
pub struct FixedClassifier {
    classes: Vec<String>,
    probabilities: Vec<f64>,
}

impl FixedClassifier {
    pub fn new(classes: &[&str], probabilities: &[f64]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            probabilities: probabilities.to_vec(),
        }
    }
}

impl Classifier for FixedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierOutput, ClassifierError> {
        Ok(ClassifierOutput::Distribution(self.probabilities.clone()))
    }
}

/// Only ever reports a single label.
pub struct LabelOnlyClassifier {
    classes: Vec<String>,
    label: String,
}

impl LabelOnlyClassifier {
    pub fn new(classes: &[&str], label: &str) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            label: label.to_string(),
        }
    }
}

impl Classifier for LabelOnlyClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, _features: &FeatureVector) -> Result<ClassifierOutput, ClassifierError> {
        Ok(ClassifierOutput::Label(self.label.clone()))
    }
}

pub const POSITIVE: [f64; 3] = [0.1, 0.2, 0.7];
pub const NEGATIVE: [f64; 3] = [0.7, 0.2, 0.1];
pub const NEUTRAL: [f64; 3] = [0.2, 0.6, 0.2];

/// Sentiment over [`VOCABULARY`]: "love" and "peaceful" are positive, "hate" negative.
pub struct LexiconSentimentClassifier {
    classes: Vec<String>,
}

impl LexiconSentimentClassifier {
    pub fn new() -> Self {
        Self {
            classes: vec![
                "negative".to_string(),
                "neutral".to_string(),
                "positive".to_string(),
            ],
        }
    }
}

impl Classifier for LexiconSentimentClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, ClassifierError> {
        let positive = weight_of(features, &[0, 2]);
        let negative = weight_of(features, &[1]);

        let probabilities = if positive > negative {
            POSITIVE
        } else if negative > positive {
            NEGATIVE
        } else {
            NEUTRAL
        };
        Ok(ClassifierOutput::Distribution(probabilities.to_vec()))
    }
}

fn weight_of(features: &FeatureVector, wanted: &[usize]) -> f64 {
    features
        .entries()
        .iter()
        .filter(|(index, _)| wanted.contains(index))
        .map(|(_, w)| w)
        .sum()
}

pub fn analysis_service(religion_classifier: Arc<dyn Classifier>) -> AnalysisService {
    analysis_service_with_sentiment(Arc::new(LexiconSentimentClassifier::new()), religion_classifier)
}

pub fn analysis_service_with_sentiment(
    sentiment_classifier: Arc<dyn Classifier>,
    religion_classifier: Arc<dyn Classifier>,
) -> AnalysisService {
    AnalysisService::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        Arc::new(WordCountVectorizer::new(VOCABULARY)),
        sentiment_classifier,
        religion_classifier,
    )
}
