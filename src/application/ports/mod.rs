mod classifier;
mod file_loader;
mod vectorizer;

pub use classifier::{Classifier, ClassifierError, ClassifierOutput, Prediction};
pub use file_loader::{FileLoader, FileLoaderError};
pub use vectorizer::{Vectorizer, VectorizerError};
