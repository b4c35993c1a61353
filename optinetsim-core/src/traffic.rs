use crate::{
    packet::{PACKET_SIZE_BYTES, Packet, Priority},
    queue::PendingQueue,
    sample,
    tick::Tick,
};
use rand_core::Rng;

/// Per-tick synthetic traffic source.
///
/// Each tick produces between `0` and [`per_tick_max`] packets, drawn
/// uniformly and independently across ticks. Each packet gets a uniform size
/// in [`PACKET_SIZE_BYTES`] and a uniform [`Priority`].
///
/// The caller provides `rng` so that all simulation randomness is controlled
/// from a single, seedable source in [`Simulation`].
///
/// [`per_tick_max`]: TrafficGenerator::per_tick_max
/// [`Simulation`]: crate::Simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficGenerator {
    per_tick_max: u64,
}

impl TrafficGenerator {
    /// Build the generator for a given arrival rate in packets per second.
    ///
    /// The per-tick draw ceiling is `max(1, traffic_rate / 10)` — one tenth
    /// of the nominal rate, floored, but never below one packet.
    ///
    /// ```
    /// # use optinetsim_core::TrafficGenerator;
    /// assert_eq!(TrafficGenerator::new(60).per_tick_max(), 6);
    /// assert_eq!(TrafficGenerator::new(10).per_tick_max(), 1);
    /// assert_eq!(TrafficGenerator::new(19).per_tick_max(), 1);
    /// assert_eq!(TrafficGenerator::new(200).per_tick_max(), 20);
    /// ```
    pub fn new(traffic_rate: u32) -> Self {
        Self {
            per_tick_max: u64::from(traffic_rate / 10).max(1),
        }
    }

    /// Upper bound (inclusive) of the per-tick packet count draw.
    pub fn per_tick_max(&self) -> u64 {
        self.per_tick_max
    }

    /// Generate this tick's packets into `queue`, returning how many were
    /// appended.
    pub(crate) fn generate<R: Rng>(
        &self,
        tick: Tick,
        queue: &mut PendingQueue,
        rng: &mut R,
    ) -> u64 {
        let count = sample::uniform_inclusive(rng, 0, self.per_tick_max);
        for _ in 0..count {
            let size_bytes = sample::uniform_inclusive(
                rng,
                u64::from(*PACKET_SIZE_BYTES.start()),
                u64::from(*PACKET_SIZE_BYTES.end()),
            ) as u16;
            let priority = sample::pick(rng, &Priority::ALL);
            queue.push(Packet::new(tick, size_bytes, priority));
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng as _;

    fn rng() -> ChaChaRng {
        ChaChaRng::seed_from_u64(42)
    }

    #[test]
    fn count_stays_below_the_ceiling() {
        let generator = TrafficGenerator::new(120);
        let mut queue = PendingQueue::new();
        let mut rng = rng();

        for tick in 0..1_000 {
            let before = queue.len() as u64;
            let generated = generator.generate(Tick::new(tick), &mut queue, &mut rng);
            assert!(generated <= generator.per_tick_max());
            assert_eq!(queue.len() as u64, before + generated);
        }
    }

    #[test]
    fn packets_carry_the_generation_tick() {
        let generator = TrafficGenerator::new(200);
        let mut queue = PendingQueue::new();
        let mut rng = rng();

        generator.generate(Tick::new(7), &mut queue, &mut rng);

        assert!(queue.iter().all(|p| p.arrival() == Tick::new(7)));
    }

    #[test]
    fn sizes_stay_in_the_ethernet_envelope() {
        let generator = TrafficGenerator::new(200);
        let mut queue = PendingQueue::new();
        let mut rng = rng();

        for tick in 0..1_000 {
            generator.generate(Tick::new(tick), &mut queue, &mut rng);
        }

        assert!(!queue.is_empty());
        assert!(
            queue
                .iter()
                .all(|p| PACKET_SIZE_BYTES.contains(&p.size_bytes()))
        );
    }

    #[test]
    fn all_priorities_show_up() {
        let generator = TrafficGenerator::new(200);
        let mut queue = PendingQueue::new();
        let mut rng = rng();

        for tick in 0..1_000 {
            generator.generate(Tick::new(tick), &mut queue, &mut rng);
        }

        for priority in Priority::ALL {
            assert!(
                queue.iter().any(|p| p.priority() == priority),
                "no packet with priority {priority}"
            );
        }
    }

    #[test]
    fn rates_below_ten_still_offer_one_packet() {
        // the ceiling never drops to zero, even for rates the configuration
        // would reject
        assert_eq!(TrafficGenerator::new(5).per_tick_max(), 1);
    }

    #[test]
    fn reproducible_with_same_seed() {
        let generator = TrafficGenerator::new(150);

        let run = |seed: u64| {
            let mut queue = PendingQueue::new();
            let mut rng = ChaChaRng::seed_from_u64(seed);
            for tick in 0..100 {
                generator.generate(Tick::new(tick), &mut queue, &mut rng);
            }
            queue
                .iter()
                .map(|p| (p.arrival(), p.size_bytes(), p.priority()))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(99), run(99));
    }
}
