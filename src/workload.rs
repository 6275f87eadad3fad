//! Synthetic workload generation.
//!
//! Generates random process sets for experiments and property tests.
//!
//! # Model
//!
//! At every tick in `[0, ticks)` a process arrives with probability
//! `p_arrival` (Bernoulli arrivals). Each arrival is short with probability
//! `p_short`, long otherwise, and gets a uniform priority in
//! `[0, max_priority]`. IDs are assigned from 1 in arrival order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ProcessId, ProcessSpec, Time};

/// Random process-set generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    ticks: Time,
    p_arrival: f64,
    p_short: f64,
    short_burst: Time,
    long_burst: Time,
    max_priority: i32,
}

impl WorkloadGenerator {
    /// Creates a generator spanning `ticks` arrival slots with default mix
    /// (30% arrival rate, 30% short jobs of 2 ticks, long jobs of 6 ticks,
    /// priorities 0..=5).
    pub fn new(ticks: Time) -> Self {
        Self {
            ticks,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 5,
        }
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.p_arrival = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the probability that an arrival is a short job.
    pub fn with_short_probability(mut self, p: f64) -> Self {
        self.p_short = p.clamp(0.0, 1.0);
        self
    }

    /// Sets short and long burst lengths (each at least 1).
    pub fn with_bursts(mut self, short_burst: Time, long_burst: Time) -> Self {
        self.short_burst = short_burst.max(1);
        self.long_burst = long_burst.max(1);
        self
    }

    /// Sets the highest priority value drawn.
    pub fn with_max_priority(mut self, max_priority: i32) -> Self {
        self.max_priority = max_priority.max(0);
        self
    }

    /// Generates a process set.
    ///
    /// Never returns an empty set: if no process arrived, a single short
    /// job arriving at t=0 is emitted.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        let mut specs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let priority = rng.random_range(0..=self.max_priority);

                specs.push(
                    ProcessSpec::new(specs.len() as ProcessId + 1, t, burst).with_priority(priority),
                );
            }
        }

        if specs.is_empty() {
            specs.push(ProcessSpec::new(1, 0, self.short_burst).with_priority(0));
        }

        specs
    }

    /// Generates a reproducible process set from a seed.
    pub fn generate_seeded(&self, seed: u64) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}
