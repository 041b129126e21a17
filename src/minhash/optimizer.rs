//! Band/row parameter selection for a target Jaccard threshold.
//!
//! Under LSH banding with `B` bands of `R` rows, a pair with Jaccard
//! similarity `s` becomes a candidate with probability `1 - (1 - s^R)^B`.
//! [`optimal_param`] picks `(B, R)` by exhaustively scoring every pair with
//! `B * R <= num_perm` against a weighted sum of the false-positive area
//! below the threshold and the false-negative area above it.

/// Probability that a pair with similarity `s` shares at least one band.
fn candidate_probability(s: f64, b: usize, r: usize) -> f64 {
    1.0 - (1.0 - s.powi(r as i32)).powi(b as i32)
}

/// Midpoint-rule integral of `f` over `[lo, hi]`.
fn integrate(f: impl Fn(f64) -> f64, lo: f64, hi: f64) -> f64 {
    const STEPS: usize = 1024;
    let dx = (hi - lo) / STEPS as f64;
    let mut area = 0.0;
    for i in 0..STEPS {
        let x = lo + (i as f64 + 0.5) * dx;
        area += f(x) * dx;
    }
    area
}

/// Area under the candidate curve below the threshold (false positives).
fn false_positive_area(threshold: f64, b: usize, r: usize) -> f64 {
    integrate(|s| candidate_probability(s, b, r), 0.0, threshold)
}

/// Area above the threshold where pairs are missed (false negatives).
fn false_negative_area(threshold: f64, b: usize, r: usize) -> f64 {
    integrate(|s| 1.0 - candidate_probability(s, b, r), threshold, 1.0)
}

/// Pick `(B, R)` with `B * R <= num_perm` minimizing the weighted error
/// `fp_weight * FP + fn_weight * FN`. Ties prefer larger `B` (finer
/// banding).
pub fn optimal_param(
    threshold: f64,
    num_perm: usize,
    fp_weight: f64,
    fn_weight: f64,
) -> (usize, usize) {
    let mut best = (1, 1);
    let mut best_error = f64::INFINITY;

    for b in 1..=num_perm {
        let max_r = num_perm / b;
        for r in 1..=max_r {
            let error = fp_weight * false_positive_area(threshold, b, r)
                + fn_weight * false_negative_area(threshold, b, r);
            if error <= best_error {
                best_error = error;
                best = (b, r);
            }
        }
    }
    best
}
