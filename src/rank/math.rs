//! BM25 math for the context scorer

// =============================================================================
// IDF Calculation
// =============================================================================

/// Inverse Document Frequency
///
/// IDF = ln(1 + max(0, (N - df + 0.5) / (df + 0.5)))
#[inline]
pub fn calculate_idf(total_documents: f64, doc_frequency: usize) -> f64 {
    if doc_frequency == 0 {
        return 0.0;
    }

    let df = doc_frequency as f64;
    let ratio = (total_documents - df + 0.5) / (df + 0.5);
    (1.0 + ratio.max(0.0)).ln()
}

// =============================================================================
// Term Frequency Normalization
// =============================================================================

/// tf / (1 - b + b * (docLength / avgDocLength))
///
/// `tf` is fractional because context weighting removes occurrences.
#[inline]
pub fn normalized_term_frequency(tf: f64, doc_length: usize, average_doc_length: f64, b: f64) -> f64 {
    if average_doc_length <= 0.0 || tf <= 0.0 {
        return 0.0;
    }

    let denominator = 1.0 - b + b * (doc_length as f64 / average_doc_length);
    if denominator > 0.0 {
        tf / denominator
    } else {
        0.0
    }
}

// =============================================================================
// Saturation
// =============================================================================

/// ((k1 + 1) * x) / (k1 + x)
#[inline]
pub fn saturate(normalized_tf: f64, k1: f64) -> f64 {
    if !normalized_tf.is_finite() || normalized_tf <= 0.0 {
        return 0.0;
    }
    if k1 <= 0.0 {
        return normalized_tf;
    }
    ((k1 + 1.0) * normalized_tf) / (k1 + normalized_tf)
}

/// Base relevance of one term in one document
#[inline]
pub fn bm25_term_score(idf: f64, tf: f64, doc_length: usize, average_doc_length: f64, k1: f64, b: f64) -> f64 {
    idf * saturate(normalized_term_frequency(tf, doc_length, average_doc_length, b), k1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_is_non_negative() {
        assert_eq!(calculate_idf(10.0, 0), 0.0);
        assert!(calculate_idf(3.0, 3) > 0.0);
        assert!(calculate_idf(100.0, 1) > calculate_idf(100.0, 50));
    }

    #[test]
    fn test_longer_documents_score_lower() {
        let short = bm25_term_score(1.0, 1.0, 10, 20.0, 1.2, 0.75);
        let long = bm25_term_score(1.0, 1.0, 30, 20.0, 1.2, 0.75);
        assert!(short > long);
    }

    #[test]
    fn test_saturation_bounded_by_k1_plus_one() {
        assert!(saturate(1e6, 1.2) < 2.2);
        assert_eq!(saturate(0.0, 1.2), 0.0);
        assert_eq!(saturate(3.0, 0.0), 3.0);
    }
}
