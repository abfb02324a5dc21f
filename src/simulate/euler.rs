//! Counting-process approximation of Euler's number.
//!
//! Euler's number is the expected value of the function that counts how
//! many uniform random numbers in [0, 1) must be drawn before their sum
//! strictly exceeds one. Each iteration performs one count; the trajectory
//! is the running average of the counts so far, which converges to e.

use crate::error::{McError, McResult};
use crate::rng::SimRng;

use super::Simulator;

/// Simulator for Euler's number via the counting process.
#[derive(Debug, Clone)]
pub struct EulerSimulator {
    rng: SimRng,
}

impl EulerSimulator {
    /// Create a simulator with the given random source.
    #[must_use]
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }

    /// Draw uniforms until their sum strictly exceeds one, returning the
    /// number of draws.
    fn count_to_one(&mut self) -> u32 {
        let mut sum = 0.0;
        let mut count = 0u32;
        while sum <= 1.0 {
            sum += self.rng.gen_f64();
            count += 1;
        }
        count
    }
}

impl Simulator for EulerSimulator {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn simulate(&mut self, n_iterations: usize) -> McResult<Vec<f64>> {
        if n_iterations == 0 {
            return Err(McError::simulator("n_iterations must be positive"));
        }

        let mut means = Vec::with_capacity(n_iterations);
        let mut total = 0u64;
        for i in 0..n_iterations {
            total += u64::from(self.count_to_one());
            means.push(total as f64 / (i + 1) as f64);
        }
        Ok(means)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_length_matches_request() {
        let mut sim = EulerSimulator::new(SimRng::new(42));
        let means = sim.simulate(1000).unwrap();
        assert_eq!(means.len(), 1000);
    }

    #[test]
    fn test_count_is_at_least_two() {
        // A single uniform in [0, 1) can never exceed one by itself.
        let mut sim = EulerSimulator::new(SimRng::new(42));
        for _ in 0..1000 {
            assert!(sim.count_to_one() >= 2);
        }
    }

    #[test]
    fn test_running_average_is_prefix_mean() {
        let mut sim = EulerSimulator::new(SimRng::new(42));
        let means = sim.simulate(100).unwrap();

        // means[i] * (i+1) must be a whole number of draws, and the
        // cumulative totals must be non-decreasing.
        let mut prev_total = 0.0;
        for (i, m) in means.iter().enumerate() {
            let total = m * (i + 1) as f64;
            assert!((total - total.round()).abs() < 1e-6);
            assert!(total >= prev_total);
            prev_total = total;
        }
    }

    #[test]
    fn test_converges_toward_e() {
        let mut sim = EulerSimulator::new(SimRng::new(42));
        let means = sim.simulate(200_000).unwrap();
        let last = means[means.len() - 1];
        assert!(
            (last - std::f64::consts::E).abs() < 0.01,
            "Final estimate {last} too far from e"
        );
    }

    #[test]
    fn test_zero_iterations_is_error() {
        let mut sim = EulerSimulator::new(SimRng::new(42));
        assert!(matches!(sim.simulate(0), Err(McError::Simulator(_))));
    }

    #[test]
    fn test_reproducible_from_seed() {
        let mut sim1 = EulerSimulator::new(SimRng::new(7));
        let mut sim2 = EulerSimulator::new(SimRng::new(7));
        assert_eq!(sim1.simulate(500).unwrap(), sim2.simulate(500).unwrap());
    }

    #[test]
    fn test_name() {
        let sim = EulerSimulator::new(SimRng::new(1));
        assert_eq!(sim.name(), "counting");
    }
}
