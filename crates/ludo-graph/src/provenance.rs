use std::collections::HashMap;

use crate::model::canonical_pair;

/// Which source items produced (or reinforced) each edge.
///
/// Keyed by canonical node-index pair; labels are kept in the order they
/// were encountered. Append-only.
#[derive(Debug, Clone, Default)]
pub struct EdgeProvenance {
    sources: HashMap<(usize, usize), Vec<String>>,
}

impl EdgeProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: usize, y: usize, label: impl Into<String>) {
        self.sources
            .entry(canonical_pair(x, y))
            .or_default()
            .push(label.into());
    }

    /// Labels for the pair `{x, y}`; empty if the pair was never recorded.
    pub fn get(&self, x: usize, y: usize) -> &[String] {
        self.sources
            .get(&canonical_pair(x, y))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of annotated pairs.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_orientation_independent() {
        let mut p = EdgeProvenance::new();
        p.record(3, 1, "Agricola");
        p.record(1, 3, "Caverna");
        assert_eq!(p.get(1, 3), &["Agricola".to_string(), "Caverna".to_string()]);
        assert_eq!(p.get(3, 1).len(), 2);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn unknown_pair_is_empty() {
        let p = EdgeProvenance::new();
        assert!(p.get(0, 1).is_empty());
        assert!(p.is_empty());
    }
}
