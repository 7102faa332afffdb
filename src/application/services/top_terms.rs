use crate::application::ports::{Vectorizer, VectorizerError};

pub const DEFAULT_TOP_TERMS: usize = 6;

/// Names of the `top_k` highest-weighted features of `text`, heaviest first.
/// An all-zero vector yields no terms.
pub fn top_terms(
    vectorizer: &dyn Vectorizer,
    text: &str,
    top_k: usize,
) -> Result<Vec<String>, VectorizerError> {
    let features = vectorizer.transform(text)?;
    if features.is_zero() || features.sum() == 0.0 {
        return Ok(Vec::new());
    }

    let mut weighted: Vec<(usize, f64)> = features.entries().to_vec();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let names = vectorizer.feature_names();
    Ok(weighted
        .into_iter()
        .take(top_k)
        .filter_map(|(index, _)| names.get(index))
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .collect())
}
