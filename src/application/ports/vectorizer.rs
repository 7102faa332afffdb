use crate::domain::FeatureVector;

/// Fitted text-to-features transform shared by every classifier.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<FeatureVector, VectorizerError>;

    /// Feature names indexed by feature position.
    fn feature_names(&self) -> &[String];

    fn dimension(&self) -> usize {
        self.feature_names().len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VectorizerError {
    #[error("transform failed: {0}")]
    TransformFailed(String),
}
