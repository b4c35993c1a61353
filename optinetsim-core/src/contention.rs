use crate::sample;
use anyhow::bail;
use rand_core::Rng;
use std::{fmt, str::FromStr};

/// Gate divisor of the contention model: a run at `traffic_rate` packets/sec
/// contends on any given tick with probability `traffic_rate / 300`.
pub const CONTENTION_RATE_DIVISOR: f64 = 300.0;

/// The optical switching technique under simulation.
///
/// The technique selects how likely a contention event is to become a counted
/// loss, and which loss counter it lands on. Everything else in the model is
/// technique-agnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SwitchingTechnique {
    /// Optical Packet Switching: per-packet switching, losses counted
    /// against packets.
    #[default]
    Ops,
    /// Optical Burst Switching: assembled bursts traverse the fabric,
    /// losses counted against bursts.
    Obs,
    /// Optical Time Division Multiplexing: slotted sharing of one carrier,
    /// losses counted against packets.
    Otdm,
}

impl SwitchingTechnique {
    /// The draw threshold above which a contention event is counted as loss.
    pub(crate) fn loss_threshold(self) -> f64 {
        match self {
            Self::Ops => 0.6,
            Self::Obs => 0.7,
            Self::Otdm => 0.75,
        }
    }

    /// Which counter a counted loss increments.
    pub fn loss_event(self) -> LossEvent {
        match self {
            Self::Ops | Self::Otdm => LossEvent::Packet,
            Self::Obs => LossEvent::Burst,
        }
    }
}

impl fmt::Display for SwitchingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ops => "OPS".fmt(f),
            Self::Obs => "OBS".fmt(f),
            Self::Otdm => "OTDM".fmt(f),
        }
    }
}

impl FromStr for SwitchingTechnique {
    type Err = anyhow::Error;

    /// Accepts the short form (`"OPS"`) and the long control-panel label
    /// (`"Optical Packet Switching (OPS)"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OPS" | "ops" | "Optical Packet Switching (OPS)" => Ok(Self::Ops),
            "OBS" | "obs" | "Optical Burst Switching (OBS)" => Ok(Self::Obs),
            "OTDM" | "otdm" | "Optical Time Division Multiplexing (OTDM)" => Ok(Self::Otdm),
            other => bail!("Unknown switching technique `{other}', expecting OPS, OBS or OTDM"),
        }
    }
}

/// A counted loss from a contention event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossEvent {
    /// Count against [`Metrics::packet_loss`].
    ///
    /// [`Metrics::packet_loss`]: crate::Metrics::packet_loss
    Packet,
    /// Count against [`Metrics::burst_loss`].
    ///
    /// [`Metrics::burst_loss`]: crate::Metrics::burst_loss
    Burst,
}

/// Per-tick probabilistic contention model.
///
/// A two-stage Bernoulli process layered on the tick clock, deliberately
/// independent of the actual queue and burst state: first a gate draw decides
/// whether the switch fabric contends at all this tick, then a
/// technique-specific draw decides whether the contention becomes a counted
/// loss. It is a standalone stochastic process, not a collision simulation.
///
/// # Example
///
/// ```
/// use optinetsim_core::{ContentionResolver, SwitchingTechnique};
/// use rand_chacha::ChaChaRng;
/// use rand_core::SeedableRng as _;
///
/// let resolver = ContentionResolver::new(200);
/// assert!((resolver.gate_probability() - 200.0 / 300.0).abs() < 1e-12);
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let _loss = resolver.resolve(SwitchingTechnique::Obs, &mut rng);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentionResolver {
    gate: f64,
}

impl ContentionResolver {
    /// Build the resolver for a given traffic rate in packets per second.
    ///
    /// The gate probability is `traffic_rate / `[`CONTENTION_RATE_DIVISOR`],
    /// clamped to `1.0`.
    pub fn new(traffic_rate: u32) -> Self {
        Self {
            gate: (f64::from(traffic_rate) / CONTENTION_RATE_DIVISOR).min(1.0),
        }
    }

    /// Probability that any given tick sees a contention event.
    pub fn gate_probability(&self) -> f64 {
        self.gate
    }

    /// Resolve one tick.
    ///
    /// At most two draws are taken from `rng`: the gate draw, then — only
    /// when the gate passes — the loss draw against the technique's
    /// threshold.
    pub fn resolve<R: Rng>(
        &self,
        technique: SwitchingTechnique,
        rng: &mut R,
    ) -> Option<LossEvent> {
        if sample::unit_f64(rng) < self.gate
            && sample::unit_f64(rng) > technique.loss_threshold()
        {
            return Some(technique.loss_event());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaChaRng;
    use rand_core::{Infallible, SeedableRng as _, TryRng};

    /// Scripted source replaying one constant 64-bit word.
    struct ConstRng(u64);

    impl TryRng for ConstRng {
        type Error = Infallible;
        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Ok(self.0 as u32)
        }
        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Ok(self.0)
        }
        fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
            dst.fill(self.0 as u8);
            Ok(())
        }
    }

    /// A generator whose unit-interval draws land on `value`.
    fn const_rng(value: f64) -> ConstRng {
        ConstRng((value * (u64::MAX as f64 + 1.0)) as u64)
    }

    fn rng() -> ChaChaRng {
        ChaChaRng::seed_from_u64(42)
    }

    #[test]
    fn gate_probability_follows_the_rate() {
        assert!((ContentionResolver::new(60).gate_probability() - 0.2).abs() < 1e-12);
        assert!((ContentionResolver::new(150).gate_probability() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn gate_probability_is_clamped() {
        assert_eq!(ContentionResolver::new(300).gate_probability(), 1.0);
        assert_eq!(ContentionResolver::new(600).gate_probability(), 1.0);
    }

    #[test]
    fn low_draws_contend_without_loss() {
        // gate passes (0 < p) but the loss draw never clears any threshold
        let resolver = ContentionResolver::new(200);
        for technique in [
            SwitchingTechnique::Ops,
            SwitchingTechnique::Obs,
            SwitchingTechnique::Otdm,
        ] {
            let mut rng = ConstRng(0);
            assert_eq!(resolver.resolve(technique, &mut rng), None);
        }
    }

    #[test]
    fn thresholds_differentiate_the_techniques() {
        // with the gate fully open, a 0.72 draw clears OPS (0.6) and OBS
        // (0.7) but not OTDM (0.75)
        let resolver = ContentionResolver::new(300);

        let mut rng = const_rng(0.72);
        assert_eq!(
            resolver.resolve(SwitchingTechnique::Ops, &mut rng),
            Some(LossEvent::Packet)
        );
        let mut rng = const_rng(0.72);
        assert_eq!(
            resolver.resolve(SwitchingTechnique::Obs, &mut rng),
            Some(LossEvent::Burst)
        );
        let mut rng = const_rng(0.72);
        assert_eq!(resolver.resolve(SwitchingTechnique::Otdm, &mut rng), None);
    }

    #[test]
    fn high_gate_draw_means_no_contention() {
        // 0.9 never passes a 200/300 gate
        let resolver = ContentionResolver::new(200);
        let mut rng = const_rng(0.9);
        assert_eq!(resolver.resolve(SwitchingTechnique::Ops, &mut rng), None);
    }

    #[test]
    fn loss_events_map_to_their_counters() {
        assert_eq!(SwitchingTechnique::Ops.loss_event(), LossEvent::Packet);
        assert_eq!(SwitchingTechnique::Obs.loss_event(), LossEvent::Burst);
        assert_eq!(SwitchingTechnique::Otdm.loss_event(), LossEvent::Packet);
    }

    #[test]
    fn obs_loss_rate_approximately() {
        // 10 000 ticks at rate 200: expect 10 000 * (200/300) * 0.3 ≈ 2 000
        // burst losses, within ±5%
        let resolver = ContentionResolver::new(200);
        let mut rng = rng();

        let losses = (0..10_000)
            .filter(|_| {
                resolver
                    .resolve(SwitchingTechnique::Obs, &mut rng)
                    .is_some()
            })
            .count();

        assert!(
            (1_900..=2_100).contains(&losses),
            "burst loss count was {losses}/10000"
        );
    }

    #[test]
    fn ops_loss_rate_approximately() {
        // 10 000 ticks at rate 60: expect 10 000 * 0.2 * 0.4 ≈ 800 packet
        // losses
        let resolver = ContentionResolver::new(60);
        let mut rng = rng();

        let losses = (0..10_000)
            .filter(|_| {
                resolver
                    .resolve(SwitchingTechnique::Ops, &mut rng)
                    .is_some()
            })
            .count();

        assert!((650..=950).contains(&losses), "packet loss count was {losses}/10000");
    }

    #[test]
    fn reproducible_with_same_seed() {
        let resolver = ContentionResolver::new(150);

        let run = |seed: u64| {
            let mut rng = ChaChaRng::seed_from_u64(seed);
            (0..1_000)
                .map(|_| resolver.resolve(SwitchingTechnique::Otdm, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(99), run(99));
    }

    #[test]
    fn display_round_trip() {
        for technique in [
            SwitchingTechnique::Ops,
            SwitchingTechnique::Obs,
            SwitchingTechnique::Otdm,
        ] {
            let parsed: SwitchingTechnique = technique.to_string().parse().unwrap();
            assert_eq!(parsed, technique);
        }
    }

    #[test]
    fn parse_long_labels() {
        assert_eq!(
            "Optical Burst Switching (OBS)"
                .parse::<SwitchingTechnique>()
                .unwrap(),
            SwitchingTechnique::Obs
        );
    }

    #[test]
    fn parse_unknown() {
        assert!("electrical".parse::<SwitchingTechnique>().is_err());
    }
}
