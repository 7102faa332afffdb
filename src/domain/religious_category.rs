//! Allow-list predicate that separates religious category labels from the
//! noise labels a category model may have been trained on, plus the
//! filter-and-renormalize step applied to its output distribution.

use super::argmax;

const RELIGIOUS_LABELS: &[&str] = &[
    "christianity",
    "islam",
    "hinduism",
    "buddhism",
    "judaism",
    "sikhism",
    "jainism",
    "zoroastrianism",
    "bahai",
    "shinto",
    "taoism",
    "confucianism",
    "paganism",
    "wicca",
    "atheism",
    "agnosticism",
    "spirituality",
    "catholic",
    "protestant",
    "orthodox",
    "sunni",
    "shia",
    "sufi",
    "zen",
    "theravada",
    "mahayana",
    "vajrayana",
    "reform",
    "conservative",
    "orthodox judaism",
];

// Roots cover stemmed and prefixed variants ("christ" -> "christian", "exchristian").
const RELIGIOUS_KEYWORDS: &[&str] = &[
    "relig", "christ", "islam", "hindu", "buddh", "jew", "sikh", "jain", "zoroast", "bahai",
    "shinto", "tao", "confuc", "pagan", "wicca", "athei", "agnost", "spirit", "faith", "god",
    "divine", "sacred", "holy", "temple", "church", "mosque",
];

pub const NO_RELIGION_DETECTED: &str = "None detected";

pub fn is_religious(label: &str) -> bool {
    let normalized = label.trim().to_lowercase();

    RELIGIOUS_LABELS.contains(&normalized.as_str())
        || RELIGIOUS_KEYWORDS
            .iter()
            .any(|keyword| normalized.contains(keyword))
}

/// Result of restricting a class distribution to religious labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredDistribution {
    pub labels: Vec<String>,
    pub probabilities: Vec<f64>,
    /// False when nothing religious survived and the input was passed through.
    pub religious_only: bool,
}

impl FilteredDistribution {
    /// Highest-probability label; the first one wins ties.
    pub fn top_label(&self) -> Option<&str> {
        argmax(&self.probabilities)
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
    }
}

/// Keeps only religious `(label, probability)` pairs and renormalizes them to
/// sum to one. When no religious label survives, or the survivors carry no
/// probability mass, the input is returned unchanged.
pub fn filter_distribution(labels: &[String], probabilities: &[f64]) -> FilteredDistribution {
    let (kept_labels, kept_probabilities): (Vec<String>, Vec<f64>) = labels
        .iter()
        .zip(probabilities)
        .filter(|(label, _)| is_religious(label))
        .map(|(label, &probability)| (label.clone(), probability))
        .unzip();

    let total: f64 = kept_probabilities.iter().sum();

    if kept_labels.is_empty() || !total.is_finite() || total <= 0.0 {
        return FilteredDistribution {
            labels: labels.to_vec(),
            probabilities: probabilities.to_vec(),
            religious_only: false,
        };
    }

    FilteredDistribution {
        labels: kept_labels,
        probabilities: kept_probabilities.into_iter().map(|p| p / total).collect(),
        religious_only: true,
    }
}
