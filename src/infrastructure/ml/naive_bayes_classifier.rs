use serde::Deserialize;

use crate::application::ports::{Classifier, ClassifierError, ClassifierOutput};
use crate::domain::FeatureVector;

use super::linear_classifier::softmax;
use super::model_loader::ModelLoadError;

/// Exported log-parameters of a fitted multinomial naive Bayes model.
#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesArtifact {
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug)]
pub struct NaiveBayesClassifier {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl NaiveBayesClassifier {
    pub fn from_artifact(
        artifact: NaiveBayesArtifact,
        n_features: usize,
    ) -> Result<Self, ModelLoadError> {
        let NaiveBayesArtifact {
            classes,
            class_log_prior,
            feature_log_prob,
        } = artifact;

        if classes.is_empty() {
            return Err(ModelLoadError::Invalid(
                "naive Bayes model has no classes".to_string(),
            ));
        }

        if class_log_prior.len() != classes.len() || feature_log_prob.len() != classes.len() {
            return Err(ModelLoadError::Invalid(format!(
                "expected {} priors and likelihood rows, got {} and {}",
                classes.len(),
                class_log_prior.len(),
                feature_log_prob.len()
            )));
        }

        if let Some(row) = feature_log_prob.iter().find(|row| row.len() != n_features) {
            return Err(ModelLoadError::Invalid(format!(
                "likelihood row has {} entries, vectorizer produces {n_features} features",
                row.len()
            )));
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    fn joint_log_likelihood(&self, features: &FeatureVector) -> Vec<f64> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(row, prior)| features.dot(row) + prior)
            .collect()
    }
}

impl Classifier for NaiveBayesClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, ClassifierError> {
        if features.dimension() != self.n_features {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features,
                actual: features.dimension(),
            });
        }

        // Normalizing the joint log-likelihood is a softmax over it.
        Ok(ClassifierOutput::Distribution(softmax(
            &self.joint_log_likelihood(features),
        )))
    }
}
