mod linear_classifier;
mod model_loader;
mod naive_bayes_classifier;
mod tfidf_vectorizer;

pub use linear_classifier::{LinearArtifact, LinearClassifier, LinearOutput, MultiClass};
pub use model_loader::{ClassifierArtifact, ModelBundle, ModelLoadError, ModelLoader};
pub use naive_bayes_classifier::{NaiveBayesArtifact, NaiveBayesClassifier};
pub use tfidf_vectorizer::{Norm, TfidfArtifact, TfidfVectorizer};
