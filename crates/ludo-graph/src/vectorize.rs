//! Feature vectorizer: presence rows → fixed-order bit vectors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

// ─────────────────────────────────────────────
// Vocabulary
// ─────────────────────────────────────────────

/// Sorted, deduplicated set of feature names (mechanics or designers).
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    names: Vec<String>,
    position: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        let position = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, position }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.position.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

// ─────────────────────────────────────────────
// FeatureVector
// ─────────────────────────────────────────────

/// 0/1 vector aligned with a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    bits: Vec<u8>,
}

impl FeatureVector {
    pub fn zeros(dim: usize) -> Self {
        Self { bits: vec![0; dim] }
    }

    pub fn dim(&self) -> usize {
        self.bits.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        self.bits.get(idx).is_some_and(|&b| b != 0)
    }

    /// Number of set positions.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }

    /// Indices of positions set in both vectors.
    pub fn shared_indices<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = usize> + 'a {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .enumerate()
            .filter(|(_, (a, b))| **a != 0 && **b != 0)
            .map(|(i, _)| i)
    }

    /// Names of the present features, in vocabulary order.
    pub fn present<'v>(&self, vocab: &'v Vocabulary) -> Vec<&'v str> {
        (0..self.bits.len().min(vocab.len()))
            .filter(|&i| self.bits[i] != 0)
            .map(|i| vocab.name(i))
            .collect()
    }
}

/// Vectorize a presence row that is already aligned with `vocab`.
///
/// Any nonzero flag counts as present.
pub fn vectorize_flags(vocab: &Vocabulary, flags: &[u8]) -> Result<FeatureVector, GraphError> {
    if flags.len() != vocab.len() {
        return Err(GraphError::DimensionMismatch { expected: vocab.len(), got: flags.len() });
    }
    Ok(FeatureVector {
        bits: flags.iter().map(|&f| u8::from(f != 0)).collect(),
    })
}

/// Vectorize a list of feature names. Names outside the vocabulary are ignored.
pub fn vectorize_names<I, S>(vocab: &Vocabulary, names: I) -> FeatureVector
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vec = FeatureVector::zeros(vocab.len());
    for name in names {
        if let Some(i) = vocab.index_of(name.as_ref()) {
            vec.bits[i] = 1;
        }
    }
    vec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mechanics() -> Vocabulary {
        Vocabulary::new(["Worker Placement", "Dice Rolling", "Hand Management", "Dice Rolling"])
    }

    #[test]
    fn vocabulary_is_sorted_and_deduplicated() {
        let v = mechanics();
        assert_eq!(v.names(), &["Dice Rolling", "Hand Management", "Worker Placement"]);
        assert_eq!(v.index_of("Worker Placement"), Some(2));
        assert_eq!(v.index_of("Deck Building"), None);
    }

    #[test]
    fn flags_map_position_by_position() {
        let v = mechanics();
        let fv = vectorize_flags(&v, &[1, 0, 3]).unwrap();
        assert_eq!(fv.as_slice(), &[1, 0, 1]);
        assert_eq!(fv.present(&v), vec!["Dice Rolling", "Worker Placement"]);
    }

    #[test]
    fn flag_width_must_match_vocabulary() {
        let v = mechanics();
        let err = vectorize_flags(&v, &[1, 0]).unwrap_err();
        assert_eq!(err, GraphError::DimensionMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn unknown_names_are_ignored() {
        let v = mechanics();
        let fv = vectorize_names(&v, ["Hand Management", "Legacy Game"]);
        assert_eq!(fv.as_slice(), &[0, 1, 0]);
        assert_eq!(fv.count_ones(), 1);
    }

    #[test]
    fn shared_indices_intersects() {
        let v = mechanics();
        let a = vectorize_flags(&v, &[1, 1, 0]).unwrap();
        let b = vectorize_flags(&v, &[0, 1, 1]).unwrap();
        assert_eq!(a.shared_indices(&b).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn empty_vocabulary_yields_empty_vectors() {
        let v = Vocabulary::new(Vec::<String>::new());
        assert!(v.is_empty());
        assert_eq!(vectorize_flags(&v, &[]).unwrap().dim(), 0);
    }
}
