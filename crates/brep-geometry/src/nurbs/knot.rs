//! Knot vector utilities.

/// Expand a knot vector given per-knot multiplicities.
///
/// `knots` and `multiplicities` must have equal length; each knot value
/// is repeated `multiplicities[i]` times.
pub fn expand_knots(knots: &[f64], multiplicities: &[usize]) -> Vec<f64> {
    let mut expanded = Vec::with_capacity(multiplicities.iter().sum());
    for (&k, &m) in knots.iter().zip(multiplicities) {
        expanded.extend(std::iter::repeat(k).take(m));
    }
    expanded
}

/// Find the knot span index for parameter `t`.
///
/// Returns `i` such that `knots[i] <= t < knots[i + 1]`, with the upper
/// domain boundary folded into the last non-empty span. `n` is the
/// number of control points minus one.
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Non-vanishing basis functions `N_{span-degree..=span, degree}` at `t`.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;
    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}
