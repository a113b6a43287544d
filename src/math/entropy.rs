/// Weighted Shannon entropy over a set of positive weights
///
/// Computes `H = ln(Σw) − (Σ w·ln w) / Σw`, the entropy of the normalized
/// distribution without materializing the normalization. Weights that are
/// zero or negative contribute nothing; a set with no positive weight has
/// zero entropy by convention.
pub fn weighted_shannon<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0.0;
    let mut weighted_log_sum = 0.0;

    for w in weights {
        if w > 0.0 {
            total += w;
            weighted_log_sum += w * w.ln();
        }
    }

    if total > 0.0 {
        total.ln() - weighted_log_sum / total
    } else {
        0.0
    }
}
