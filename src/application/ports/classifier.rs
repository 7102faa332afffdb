use crate::domain::{FeatureVector, argmax};

/// Raw answer of a classifier for one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutput {
    /// One probability per entry of [`Classifier::classes`], same order.
    Distribution(Vec<f64>),
    /// Only the winning label is known.
    Label(String),
}

/// Winning label together with a full distribution over the classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probabilities: Vec<f64>,
}

pub trait Classifier: Send + Sync {
    fn classes(&self) -> &[String];

    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, ClassifierError>;

    /// Label-only outputs are widened to a one-hot distribution.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let classes = self.classes();

        match self.classify(features)? {
            ClassifierOutput::Distribution(probabilities) => {
                if probabilities.len() != classes.len() {
                    return Err(ClassifierError::InvalidOutput(format!(
                        "expected {} probabilities, got {}",
                        classes.len(),
                        probabilities.len()
                    )));
                }
                let label = argmax(&probabilities)
                    .map(|index| classes[index].clone())
                    .ok_or(ClassifierError::NoClasses)?;
                Ok(Prediction {
                    label,
                    probabilities,
                })
            }
            ClassifierOutput::Label(label) => {
                let index = classes
                    .iter()
                    .position(|c| *c == label)
                    .ok_or_else(|| ClassifierError::UnknownLabel(label.clone()))?;
                let mut probabilities = vec![0.0; classes.len()];
                probabilities[index] = 1.0;
                Ok(Prediction {
                    label,
                    probabilities,
                })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier has no classes")]
    NoClasses,
    #[error("predicted label is not a known class: {0}")]
    UnknownLabel(String),
    #[error("invalid classifier output: {0}")]
    InvalidOutput(String),
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
