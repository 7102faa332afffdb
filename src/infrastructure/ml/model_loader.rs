use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{Classifier, Vectorizer};
use crate::presentation::config::ModelSettings;

use super::linear_classifier::{LinearArtifact, LinearClassifier, LinearOutput};
use super::naive_bayes_classifier::{NaiveBayesArtifact, NaiveBayesClassifier};
use super::tfidf_vectorizer::{TfidfArtifact, TfidfVectorizer};

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LinearArtifact),
    LinearSvc(LinearArtifact),
    MultinomialNb(NaiveBayesArtifact),
}

/// The vectorizer and both classifiers, loaded once at startup and shared read-only.
#[derive(Clone)]
pub struct ModelBundle {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub sentiment_classifier: Arc<dyn Classifier>,
    pub religion_classifier: Arc<dyn Classifier>,
}

pub struct ModelLoader;

impl ModelLoader {
    pub fn load_bundle(settings: &ModelSettings) -> Result<ModelBundle, ModelLoadError> {
        let vectorizer = Self::load_vectorizer(&settings.vectorizer_path)?;
        let n_features = vectorizer.dimension();

        let sentiment_classifier =
            Self::load_classifier(&settings.sentiment_model_path, n_features)?;
        let religion_classifier = Self::load_classifier(&settings.religion_model_path, n_features)?;

        tracing::info!(
            n_features,
            sentiment_classes = sentiment_classifier.classes().len(),
            religion_classes = religion_classifier.classes().len(),
            "Model artifacts loaded"
        );

        Ok(ModelBundle {
            vectorizer,
            sentiment_classifier,
            religion_classifier,
        })
    }

    pub fn load_vectorizer(path: &Path) -> Result<Arc<dyn Vectorizer>, ModelLoadError> {
        let artifact: TfidfArtifact = read_artifact(path)?;
        tracing::info!(path = %path.display(), terms = artifact.vocabulary.len(), "Loading TF-IDF vectorizer");
        Ok(Arc::new(TfidfVectorizer::from_artifact(artifact)?))
    }

    pub fn load_classifier(
        path: &Path,
        n_features: usize,
    ) -> Result<Arc<dyn Classifier>, ModelLoadError> {
        let artifact: ClassifierArtifact = read_artifact(path)?;
        tracing::info!(path = %path.display(), "Loading classifier");
        Self::classifier_from_artifact(artifact, n_features)
    }

    pub fn classifier_from_artifact(
        artifact: ClassifierArtifact,
        n_features: usize,
    ) -> Result<Arc<dyn Classifier>, ModelLoadError> {
        match artifact {
            ClassifierArtifact::LogisticRegression(linear) => Ok(Arc::new(
                LinearClassifier::from_artifact(linear, LinearOutput::Probabilities, n_features)?,
            )),
            ClassifierArtifact::LinearSvc(linear) => Ok(Arc::new(
                LinearClassifier::from_artifact(linear, LinearOutput::DecisionOnly, n_features)?,
            )),
            ClassifierArtifact::MultinomialNb(bayes) => Ok(Arc::new(
                NaiveBayesClassifier::from_artifact(bayes, n_features)?,
            )),
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ModelLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
