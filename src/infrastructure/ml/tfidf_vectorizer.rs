use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::application::ports::{Vectorizer, VectorizerError};
use crate::domain::FeatureVector;

use super::model_loader::ModelLoadError;

// Tokens are runs of two or more word characters.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Exported state of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    feature_names: Vec<String>,
    ngram_range: (usize, usize),
    lowercase: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, ModelLoadError> {
        let TfidfArtifact {
            vocabulary,
            idf,
            ngram_range,
            lowercase,
            sublinear_tf,
            norm,
        } = artifact;

        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelLoadError::Invalid(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let mut feature_names = vec![String::new(); idf.len()];
        for (term, &index) in &vocabulary {
            let slot = feature_names.get_mut(index).ok_or_else(|| {
                ModelLoadError::Invalid(format!(
                    "vocabulary term {term:?} has index {index} but idf has {} entries",
                    idf.len()
                ))
            })?;
            *slot = term.clone();
        }

        Ok(Self {
            vocabulary,
            idf,
            feature_names,
            ngram_range,
            lowercase,
            sublinear_tf,
            norm,
        })
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn count_terms(&self, tokens: &[&str]) -> HashMap<usize, f64> {
        let (min_n, max_n) = self.ngram_range;
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, VectorizerError> {
        let prepared = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens = self.tokenize(&prepared);
        let counts = self.count_terms(&tokens);

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (index, tf * self.idf[index])
            })
            .collect();

        let magnitude = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if magnitude > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= magnitude;
            }
        }

        Ok(FeatureVector::new(self.idf.len(), entries))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}
