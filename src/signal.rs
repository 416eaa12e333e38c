use log::*;

use crate::processor::{Cycle, CycleObserver, Register};

/// First cycle at which the signal is sampled
pub const FIRST_SAMPLE: Cycle = 20;
/// Number of cycles between two samples
pub const SAMPLE_INTERVAL: Cycle = 40;

/// Whether the signal strength is sampled during `cycle` (20, 60, 100, ...)
pub fn is_relevant_cycle(cycle: Cycle) -> bool {
    cycle >= FIRST_SAMPLE && (cycle - FIRST_SAMPLE) % SAMPLE_INTERVAL == 0
}

/// Signal strength of a single cycle
pub fn signal_strength(cycle: Cycle, x: Register) -> i64 {
    i64::from(cycle) * i64::from(x)
}

/// Sums up the signal strength of every relevant cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignalAccumulator {
    sum: i64,
}

impl SignalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sum of all samples taken so far
    pub fn sum(&self) -> i64 {
        self.sum
    }
}

impl CycleObserver for SignalAccumulator {
    fn observe(&mut self, cycle: Cycle, x: Register) {
        if is_relevant_cycle(cycle) {
            let strength = signal_strength(cycle, x);
            self.sum += strength;

            debug!("Sampled cycle {}: {} * {} = {}", cycle, cycle, x, strength);
        }
    }
}
