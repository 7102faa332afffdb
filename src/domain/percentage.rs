use serde::ser::{Serialize, SerializeMap, Serializer};

/// Label to percentage mapping, kept in classifier order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentageMap {
    entries: Vec<(String, f64)>,
}

impl PercentageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `label`, keeping the original position on replace.
    pub fn insert(&mut self, label: String, percentage: f64) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = percentage,
            None => self.entries.push((label, percentage)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }
}

impl Serialize for PercentageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, percentage) in &self.entries {
            map.serialize_entry(label, percentage)?;
        }
        map.end()
    }
}

/// Converts parallel label/probability slices (0–1 scale) into lowercased
/// label → percentage rounded to two decimals. No renormalization happens here.
pub fn to_percentage_map<S: AsRef<str>>(labels: &[S], probabilities: &[f64]) -> PercentageMap {
    let mut map = PercentageMap::new();
    for (label, probability) in labels.iter().zip(probabilities) {
        map.insert(label.as_ref().to_lowercase(), round_to(probability * 100.0, 2));
    }
    map
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Index of the largest value; the first one wins ties and NaN never wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, b)| value > b) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}
