use crate::sample;
use rand_core::Rng;
use std::ops::RangeInclusive;

/// Range of the cosmetic average-delay figure, in milliseconds.
pub const AVG_DELAY_MS: RangeInclusive<f64> = 0.2..=2.0;

/// Aggregate counters and derived figures for one run.
///
/// The four counters are monotonically incremented while the clock advances.
/// `throughput` and `avg_delay_ms` stay at zero until the run completes and
/// the metrics are finalised.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Packets produced by the traffic generator.
    pub packets_total: u64,
    /// Bursts recorded by the assembler; one burst-log entry each.
    pub bursts_total: u64,
    /// Contention events counted against packets (OPS, OTDM).
    pub packet_loss: u64,
    /// Contention events counted against bursts (OBS).
    pub burst_loss: u64,
    /// Delivered packets per simulated second, computed on completion.
    pub throughput: f64,
    /// Cosmetic average-delay figure in milliseconds, drawn uniformly from
    /// [`AVG_DELAY_MS`] on completion.
    ///
    /// Not derived from any queueing computation: this is the only output
    /// field that is not a function of the counters.
    pub avg_delay_ms: f64,
}

impl Metrics {
    /// Derived throughput for the given counters: delivered packets per
    /// simulated second, rounded to 2 decimals.
    ///
    /// Deterministic in its inputs — recomputing from the same counters
    /// yields the same figure. The subtraction is signed: the loss counter
    /// is decoupled from the generator, so nothing forbids it from
    /// exceeding `packets_total`.
    ///
    /// ```
    /// # use optinetsim_core::Metrics;
    /// assert_eq!(Metrics::compute_throughput(100, 1, 3), 33.0);
    /// assert_eq!(Metrics::compute_throughput(10, 0, 3), 3.33);
    /// ```
    pub fn compute_throughput(packets_total: u64, packet_loss: u64, simulation_time: u32) -> f64 {
        let delivered = packets_total as f64 - packet_loss as f64;
        round_to(delivered / f64::from(simulation_time.max(1)), 2)
    }

    /// Fill in the derived figures once the clock has reached its bound.
    pub(crate) fn finalise<R: Rng>(&mut self, simulation_time: u32, rng: &mut R) {
        self.throughput =
            Self::compute_throughput(self.packets_total, self.packet_loss, simulation_time);
        self.avg_delay_ms = round_to(
            sample::range_f64(rng, *AVG_DELAY_MS.start(), *AVG_DELAY_MS.end()),
            3,
        );
    }
}

/// Round to `decimals` places, half away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng as _;

    #[test]
    fn throughput_is_idempotent() {
        let first = Metrics::compute_throughput(321, 17, 7);
        let second = Metrics::compute_throughput(321, 17, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn throughput_rounds_to_two_decimals() {
        assert_eq!(Metrics::compute_throughput(10, 0, 3), 3.33);
        assert_eq!(Metrics::compute_throughput(20, 0, 3), 6.67);
    }

    #[test]
    fn throughput_survives_loss_exceeding_packets() {
        assert_eq!(Metrics::compute_throughput(0, 3, 5), -0.6);
    }

    #[test]
    fn throughput_guards_the_divisor() {
        // a zero duration divides by one instead
        assert_eq!(Metrics::compute_throughput(42, 0, 0), 42.0);
    }

    #[test]
    fn finalise_draws_delay_in_range() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let mut metrics = Metrics::default();
            metrics.finalise(5, &mut rng);
            assert!(
                AVG_DELAY_MS.contains(&metrics.avg_delay_ms),
                "avg delay was {}",
                metrics.avg_delay_ms
            );
            // already rounded: rounding again must not move it
            assert_eq!(round_to(metrics.avg_delay_ms, 3), metrics.avg_delay_ms);
        }
    }

    #[test]
    fn finalise_uses_the_counters() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let mut metrics = Metrics {
            packets_total: 100,
            packet_loss: 10,
            ..Metrics::default()
        };
        metrics.finalise(5, &mut rng);
        assert_eq!(metrics.throughput, 18.0);
    }

    #[test]
    fn round_to_examples() {
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(3.3333333, 2), 3.33);
        assert_eq!(round_to(-0.666, 2), -0.67);
    }
}
