//! Run results and observability types.
//!
//! [`SimulationReport`] is what a completed [`Simulation`] hands back:
//! everything a presentation layer needs to render summary tiles and a
//! "burst index → packet count" chart.
//!
//! [`Simulation`]: crate::Simulation

use crate::{assembly::Burst, config::SimConfiguration, metrics::Metrics};

/// Results of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// The configuration the run executed with, reservation label included.
    pub configuration: SimConfiguration,
    /// Aggregate counters and derived figures.
    pub metrics: Metrics,
    /// The burst log: one entry per completed burst, in emission order.
    pub bursts: Vec<Burst>,
}

impl SimulationReport {
    /// `(burst index, packet count)` pairs, 1-based, in emission order.
    pub fn burst_sizes(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.bursts
            .iter()
            .enumerate()
            .map(|(index, burst)| (index + 1, burst.size()))
    }
}
