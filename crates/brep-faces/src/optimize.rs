//! Bounded derivative-free minimization.

/// Minimize `f` over a box-bounded domain with the Nelder-Mead simplex
/// method; every trial point is clamped into `[lower, upper]`.
///
/// Returns the best parameter vector and its objective value. The
/// result is a local minimum; callers wanting a global answer restart
/// from several seeds and keep the best.
pub fn minimize_bounded<F>(
    f: F,
    x0: &[f64],
    lower: &[f64],
    upper: &[f64],
    max_iter: usize,
) -> (Vec<f64>, f64)
where
    F: Fn(&[f64]) -> f64,
{
    let n = x0.len();
    debug_assert_eq!(lower.len(), n);
    debug_assert_eq!(upper.len(), n);

    let clamp = |x: &mut [f64]| {
        for i in 0..n {
            x[i] = x[i].clamp(lower[i], upper[i]);
        }
    };

    // Initial simplex: the seed plus one vertex per axis offset by 5%
    // of that axis's range.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    let mut seed = x0.to_vec();
    clamp(&mut seed);
    let seed_val = f(&seed);
    simplex.push((seed.clone(), seed_val));
    for i in 0..n {
        let mut v = seed.clone();
        let span = upper[i] - lower[i];
        let step = if span > 0.0 { 0.05 * span } else { 0.05 };
        v[i] += if v[i] + step <= upper[i] { step } else { -step };
        clamp(&mut v);
        let val = f(&v);
        simplex.push((v, val));
    }

    for _ in 0..max_iter {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let spread = simplex[n].1 - simplex[0].1;
        let size: f64 = (0..n)
            .map(|i| (simplex[n].0[i] - simplex[0].0[i]).abs())
            .fold(0.0, f64::max);
        if spread < 1e-12 && size < 1e-10 {
            break;
        }

        // Centroid of all but the worst vertex
        let mut centroid = vec![0.0; n];
        for (v, _) in &simplex[..n] {
            for i in 0..n {
                centroid[i] += v[i] / n as f64;
            }
        }
        let worst = simplex[n].clone();

        let mut reflected = vec![0.0; n];
        for i in 0..n {
            reflected[i] = centroid[i] + (centroid[i] - worst.0[i]);
        }
        clamp(&mut reflected);
        let refl_val = f(&reflected);

        if refl_val < simplex[0].1 {
            // Try expanding past the reflection
            let mut expanded = vec![0.0; n];
            for i in 0..n {
                expanded[i] = centroid[i] + 2.0 * (centroid[i] - worst.0[i]);
            }
            clamp(&mut expanded);
            let exp_val = f(&expanded);
            simplex[n] = if exp_val < refl_val {
                (expanded, exp_val)
            } else {
                (reflected, refl_val)
            };
        } else if refl_val < simplex[n - 1].1 {
            simplex[n] = (reflected, refl_val);
        } else {
            let mut contracted = vec![0.0; n];
            for i in 0..n {
                contracted[i] = centroid[i] + 0.5 * (worst.0[i] - centroid[i]);
            }
            clamp(&mut contracted);
            let con_val = f(&contracted);
            if con_val < worst.1 {
                simplex[n] = (contracted, con_val);
            } else {
                // Shrink toward the best vertex
                let best = simplex[0].0.clone();
                for (v, val) in &mut simplex[1..] {
                    for i in 0..n {
                        v[i] = best[i] + 0.5 * (v[i] - best[i]);
                    }
                    *val = f(v);
                }
            }
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (best, val) = simplex.swap_remove(0);
    (best, val)
}
