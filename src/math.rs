//! Numeric helpers shared by the generators and the reward allocator

/// Piecewise-linear interpolation of `y` over breakpoints `x` at `xp`.
///
/// Values left of the first breakpoint take `y[0]`, values right of the last
/// take the last `y`. Returns `None` for empty or mismatched tables.
pub fn interp1(xp: f64, x: &[f64], y: &[f64]) -> Option<f64> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }

    let last = x.len() - 1;
    if xp >= x[last] {
        return Some(y[last]);
    }
    if xp <= x[0] {
        return Some(y[0]);
    }

    for (xs, ys) in x.windows(2).zip(y.windows(2)) {
        if xp >= xs[0] && xp <= xs[1] {
            let span = xs[1] - xs[0];
            if span <= 0.0 {
                return Some(ys[1]);
            }
            return Some(ys[0] + (xp - xs[0]) * (ys[1] - ys[0]) / span);
        }
    }

    None
}

/// Linearly map `value` from `[min_in, max_in]` onto `[min_out, max_out]`,
/// clamping to the output range.
///
/// A degenerate input range maps everything at or above `max_in` to
/// `max_out` and the rest to `min_out`.
pub fn map_to_range(value: f64, min_in: f64, max_in: f64, min_out: f64, max_out: f64) -> f64 {
    let delta_in = max_in - min_in;
    if delta_in <= 0.0 {
        return if value >= max_in { max_out } else { min_out };
    }

    let scale = (value - min_in) / delta_in;
    let mapped = min_out + scale * (max_out - min_out);
    mapped.clamp(min_out.min(max_out), max_out.max(min_out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_inside_range() {
        let levels = [1.0, 10.0, 20.0];
        let values = [1000.0, 10000.0, 30000.0];
        assert_eq!(interp1(5.5, &levels, &values), Some(5500.0));
        assert_eq!(interp1(15.0, &levels, &values), Some(20000.0));
        assert_eq!(interp1(10.0, &levels, &values), Some(10000.0));
    }

    #[test]
    fn test_interp_clamps_outside_range() {
        let levels = [5.0, 10.0];
        let values = [100.0, 200.0];
        assert_eq!(interp1(1.0, &levels, &values), Some(100.0));
        assert_eq!(interp1(70.0, &levels, &values), Some(200.0));
    }

    #[test]
    fn test_interp_rejects_bad_tables() {
        assert_eq!(interp1(1.0, &[], &[]), None);
        assert_eq!(interp1(1.0, &[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_map_to_range() {
        let d = map_to_range(3.0, 1.0, 5.0, 0.2, 1.0);
        assert!((d - 0.6).abs() < 1e-9);
        assert_eq!(map_to_range(0.0, 1.0, 5.0, 0.2, 1.0), 0.2);
        assert_eq!(map_to_range(9.0, 1.0, 5.0, 0.2, 1.0), 1.0);
    }

    #[test]
    fn test_map_to_range_degenerate() {
        assert_eq!(map_to_range(1.0, 1.0, 1.0, 0.2, 1.0), 1.0);
        assert_eq!(map_to_range(0.0, 1.0, 1.0, 0.2, 1.0), 0.2);
    }
}
