//! Synthetic price walk used when live history is unavailable.

use rand::Rng;

use crate::model::PricePoint;

pub const SYNTHETIC_POINTS: usize = 30;
const BASE_VALUE: f64 = 100.0;
/// Subtracted from a uniform [0, 1) draw; below 0.5 biases the walk upward.
const DRIFT: f64 = 0.45;
const STEP_SCALE: f64 = 5.0;

/// A fresh 30-point walk from the thread-local RNG. Every call differs.
pub fn synthetic_series() -> Vec<PricePoint> {
    synthetic_series_with(&mut rand::thread_rng())
}

/// A 30-point walk starting at 100, each step adding `(u - 0.45) * 5`.
///
/// Values are not clamped and may go negative in principle.
pub fn synthetic_series_with<R: Rng>(rng: &mut R) -> Vec<PricePoint> {
    let mut value = BASE_VALUE;
    (0..SYNTHETIC_POINTS)
        .map(|index| {
            value += (rng.gen::<f64>() - DRIFT) * STEP_SCALE;
            PricePoint {
                date: index.to_string(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_thirty_indexed_points() {
        let series = synthetic_series();
        assert_eq!(series.len(), SYNTHETIC_POINTS);
        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.date, i.to_string());
            assert!(point.value.is_finite());
        }
    }

    #[test]
    fn steps_stay_within_drift_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = synthetic_series_with(&mut rng);
        let mut previous = BASE_VALUE;
        for point in &series {
            let step = point.value - previous;
            assert!(step >= -DRIFT * STEP_SCALE - 1e-9, "step {} too low", step);
            assert!(step < (1.0 - DRIFT) * STEP_SCALE + 1e-9, "step {} too high", step);
            previous = point.value;
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let a = synthetic_series_with(&mut StdRng::seed_from_u64(42));
        let b = synthetic_series_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_walks_differ() {
        assert_ne!(synthetic_series(), synthetic_series());
    }
}
