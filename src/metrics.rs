//! Performance metrics for the benchmark report
//!
//! Pure functions over worker counts and measured timings — no state, no
//! I/O. Degenerate inputs (zero workers, zero elapsed time) return sentinel
//! values instead of errors so a report row can always be rendered.

/// Fixed non-parallelizable fraction assumed by the Amdahl prediction
pub const SEQUENTIAL_FRACTION: f64 = 0.05;

/// Amdahl's Law: `1 / (f + (1 - f) / workers)`. Returns 0 for zero workers.
pub fn theoretical_speedup(workers: usize, f: f64) -> f64 {
    if workers == 0 {
        return 0.0;
    }
    1.0 / (f + (1.0 - f) / workers as f64)
}

/// Measured speedup against the sequential baseline. Returns 0 when the
/// parallel time is zero (unmeasured or degenerate run).
pub fn actual_speedup(t_sequential: f64, t_parallel: f64) -> f64 {
    if t_parallel == 0.0 {
        return 0.0;
    }
    t_sequential / t_parallel
}

/// Back-calculate the empirical parallelizable fraction from a measured
/// speedup: `((1/S) - 1) / ((1/N) - 1)`.
///
/// With one worker (or none) the formula is undefined; by convention the
/// fraction is 1.0 there. A zero speedup yields 0.
pub fn parallel_fraction(actual_speedup: f64, workers: usize) -> f64 {
    if workers <= 1 {
        return 1.0;
    }
    if actual_speedup == 0.0 {
        return 0.0;
    }
    ((1.0 / actual_speedup) - 1.0) / ((1.0 / workers as f64) - 1.0)
}

/// How well added workers are utilized: speedup per worker.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers == 0 {
        return 0.0;
    }
    speedup / workers as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_theoretical_speedup_single_worker_is_one() {
        assert!((theoretical_speedup(1, 0.1) - 1.0).abs() < EPS);
        assert!((theoretical_speedup(1, SEQUENTIAL_FRACTION) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_theoretical_speedup_zero_workers_sentinel() {
        assert_eq!(theoretical_speedup(0, 0.1), 0.0);
        assert_eq!(theoretical_speedup(0, SEQUENTIAL_FRACTION), 0.0);
    }

    #[test]
    fn test_theoretical_speedup_bounded_by_amdahl_limit() {
        // Limit as workers -> inf is 1/f
        let s = theoretical_speedup(1_000_000, 0.05);
        assert!(s < 20.0);
        assert!(s > 19.9);
    }

    #[test]
    fn test_actual_speedup() {
        assert!((actual_speedup(10.0, 2.5) - 4.0).abs() < EPS);
        assert_eq!(actual_speedup(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_parallel_fraction_single_worker_is_one() {
        assert_eq!(parallel_fraction(3.7, 1), 1.0);
        assert_eq!(parallel_fraction(0.0, 1), 1.0);
        assert_eq!(parallel_fraction(100.0, 0), 1.0);
    }

    #[test]
    fn test_parallel_fraction_zero_speedup_is_zero() {
        assert_eq!(parallel_fraction(0.0, 4), 0.0);
    }

    #[test]
    fn test_parallel_fraction_inverts_amdahl() {
        // Feeding a theoretical speedup back in recovers the parallel share
        let f = 0.05;
        let s = theoretical_speedup(4, f);
        let recovered = parallel_fraction(s, 4);
        assert!((recovered - (1.0 - f)).abs() < EPS);
    }

    #[test]
    fn test_efficiency() {
        assert!((efficiency(4.0, 4) - 1.0).abs() < EPS);
        assert!((efficiency(3.0, 4) - 0.75).abs() < EPS);
        assert_eq!(efficiency(3.0, 0), 0.0);
    }
}
