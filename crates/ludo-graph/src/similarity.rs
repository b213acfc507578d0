//! Pairwise similarity between feature vectors: cosine, Jaccard.

use crate::vectorize::FeatureVector;

/// Cosine similarity `a·b / (‖a‖‖b‖)`.
///
/// A zero vector on either side yields 0.0 rather than NaN.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in a.as_slice().iter().zip(b.as_slice()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

/// Jaccard similarity of the present-feature sets: `|A ∩ B| / |A ∪ B|`.
pub fn jaccard_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let intersection = a.shared_indices(b).count();
    let union_size = a.count_ones() + b.count_ones() - intersection;
    if union_size == 0 {
        return 0.0;
    }
    intersection as f64 / union_size as f64
}
