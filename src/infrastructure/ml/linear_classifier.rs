use serde::Deserialize;

use crate::application::ports::{Classifier, ClassifierError, ClassifierOutput};
use crate::domain::{FeatureVector, argmax};

use super::model_loader::ModelLoadError;

/// Exported weights of a fitted linear model. Binary models carry a single
/// row whose positive side is the second class.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearArtifact {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearOutput {
    /// Logistic regression: calibrated probabilities.
    Probabilities,
    /// Linear SVM: only the winning label.
    DecisionOnly,
}

#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    multi_class: MultiClass,
    output: LinearOutput,
    n_features: usize,
}

impl LinearClassifier {
    pub fn from_artifact(
        artifact: LinearArtifact,
        output: LinearOutput,
        n_features: usize,
    ) -> Result<Self, ModelLoadError> {
        let LinearArtifact {
            classes,
            coef,
            intercept,
            multi_class,
        } = artifact;

        if classes.len() < 2 {
            return Err(ModelLoadError::Invalid(format!(
                "linear model needs at least two classes, got {}",
                classes.len()
            )));
        }

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows || intercept.len() != expected_rows {
            return Err(ModelLoadError::Invalid(format!(
                "expected {expected_rows} coefficient rows and intercepts for {} classes, got {} and {}",
                classes.len(),
                coef.len(),
                intercept.len()
            )));
        }

        if let Some(row) = coef.iter().find(|row| row.len() != n_features) {
            return Err(ModelLoadError::Invalid(format!(
                "coefficient row has {} weights, vectorizer produces {n_features} features",
                row.len()
            )));
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            multi_class,
            output,
            n_features,
        })
    }

    fn decision_function(&self, features: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot(row) + bias)
            .collect()
    }

    fn probabilities(&self, scores: &[f64]) -> Vec<f64> {
        if let [score] = scores {
            let positive = sigmoid(*score);
            return vec![1.0 - positive, positive];
        }

        match self.multi_class {
            MultiClass::Multinomial => softmax(scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
                let total: f64 = raw.iter().sum();
                if total > 0.0 {
                    raw.into_iter().map(|p| p / total).collect()
                } else {
                    vec![1.0 / raw.len() as f64; raw.len()]
                }
            }
        }
    }

    fn winning_label(&self, scores: &[f64]) -> String {
        let index = match scores {
            [score] => usize::from(*score > 0.0),
            _ => argmax(scores).unwrap_or(0),
        };
        self.classes[index].clone()
    }
}

impl Classifier for LinearClassifier {
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

        let scores = self.decision_function(features);

        Ok(match self.output {
            LinearOutput::Probabilities => {
                ClassifierOutput::Distribution(self.probabilities(&scores))
            }
            LinearOutput::DecisionOnly => ClassifierOutput::Label(self.winning_label(&scores)),
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
