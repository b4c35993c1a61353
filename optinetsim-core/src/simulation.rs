use crate::{
    assembly::Burst,
    config::SimConfiguration,
    contention::{ContentionResolver, LossEvent},
    metrics::Metrics,
    packet::Packet,
    queue::PendingQueue,
    report::SimulationReport,
    tick::Tick,
    traffic::TrafficGenerator,
};
use rand_chacha::ChaChaRng;
use rand_core::{Rng, SeedableRng as _};

/// Progress of a running simulation, reported once per tick.
///
/// Purely advisory: observing (or dropping) progress has no effect on the
/// simulation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    tick: u64,
    total: u64,
}

impl Progress {
    pub(crate) fn new(tick: u64, total: u64) -> Self {
        Self { tick, total }
    }

    /// The tick about to execute.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Length of the run in ticks.
    pub fn total_ticks(&self) -> u64 {
        self.total
    }

    /// Completion fraction in `[0, 1]`.
    ///
    /// Progress is reported at tick start, so the last observation of a run
    /// is `(total - 1) / total`.
    pub fn fraction(&self) -> f64 {
        self.tick as f64 / self.total as f64
    }
}

/// Outcome of [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The clock advanced by one tick; more remain.
    Running,
    /// The clock has reached its bound and the metrics are finalised.
    Done,
}

/// This is the entry point for all activities with [`optinetsim_core`].
///
/// A [`Simulation`] owns the whole state of one run: the pending-packet
/// queue, the burst log, the [`Metrics`] counters, the tick clock and the
/// random source. Each [`step`] executes one tick to completion (traffic
/// generation, then burst assembly, then contention resolution), so callers
/// that drive the clock themselves can only ever observe whole ticks.
///
/// The generator type defaults to a [`ChaChaRng`] seeded with `0`; use
/// [`set_seed`] for reproducible runs, or [`with_rng`] to substitute another
/// source entirely.
///
/// # Example
///
/// ```
/// use optinetsim_core::{SimConfiguration, Simulation};
///
/// let mut simulation = Simulation::new(SimConfiguration::default());
/// simulation.set_seed(42);
///
/// let report = simulation.run();
/// assert_eq!(report.metrics.bursts_total as usize, report.bursts.len());
/// ```
///
/// [`optinetsim_core`]: crate
/// [`step`]: Simulation::step
/// [`set_seed`]: Simulation::set_seed
/// [`with_rng`]: Simulation::with_rng
pub struct Simulation<R = ChaChaRng> {
    config: SimConfiguration,
    generator: TrafficGenerator,
    resolver: ContentionResolver,

    queue: PendingQueue,
    bursts: Vec<Burst>,
    metrics: Metrics,

    tick: Tick,
    total_ticks: u64,

    /// Centralised RNG for every draw of the run: per-tick packet counts,
    /// packet sizes and priorities, contention gates and loss draws, and the
    /// final cosmetic delay figure.
    rng: R,
}

impl Simulation {
    /// Create a simulation for the given configuration, with a default
    /// deterministic seed of `0`.
    pub fn new(config: SimConfiguration) -> Self {
        Self::with_rng(config, ChaChaRng::seed_from_u64(0))
    }

    /// Re-seed the simulation's random-number generator.
    ///
    /// All draws of the run come from a single source, so seeding before the
    /// first [`step`](Simulation::step) makes the whole run reproducible:
    /// two runs with the same configuration and seed produce identical
    /// reports.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaChaRng::seed_from_u64(seed);
    }
}

impl<R> Simulation<R> {
    /// Create a simulation that draws from the provided generator instead of
    /// the default seeded [`ChaChaRng`].
    pub fn with_rng(config: SimConfiguration, rng: R) -> Self {
        Self {
            generator: TrafficGenerator::new(config.traffic_rate()),
            resolver: ContentionResolver::new(config.traffic_rate()),
            queue: PendingQueue::new(),
            bursts: Vec::new(),
            metrics: Metrics::default(),
            tick: Tick::ZERO,
            total_ticks: config.total_ticks(),
            config,
            rng,
        }
    }

    pub fn configuration(&self) -> &SimConfiguration {
        &self.config
    }

    /// The counters as of the last executed tick. Derived figures are zero
    /// until the run completes.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The burst log so far, in emission order.
    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Number of packets waiting for assembly.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The waiting packets, in arrival order.
    pub fn pending_packets(&self) -> impl Iterator<Item = &Packet> {
        self.queue.iter()
    }

    /// The tick about to execute.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.tick.into_u64(), self.total_ticks)
    }

    pub fn done(&self) -> bool {
        self.tick.into_u64() >= self.total_ticks
    }

    /// Consume the simulation and package its results.
    ///
    /// Meant to be called once [`step`](Simulation::step) has returned
    /// [`Status::Done`]; a run abandoned earlier reports zeroed derived
    /// figures.
    pub fn into_report(self) -> SimulationReport {
        SimulationReport {
            configuration: self.config,
            metrics: self.metrics,
            bursts: self.bursts,
        }
    }
}

impl<R> Simulation<R>
where
    R: Rng,
{
    /// Execute one tick to completion.
    ///
    /// The three stages run in fixed order: traffic generation, burst
    /// assembly, contention resolution. On the tick that reaches the bound
    /// the metrics are finalised exactly once; stepping a finished
    /// simulation is a no-op returning [`Status::Done`].
    pub fn step(&mut self) -> Status {
        if self.done() {
            return Status::Done;
        }

        let tick = self.tick;

        let generated = self.generator.generate(tick, &mut self.queue, &mut self.rng);
        self.metrics.packets_total += generated;

        if let Some(burst) = self.config.assembly().assemble(tick, &mut self.queue) {
            self.metrics.bursts_total += 1;
            self.bursts.push(burst);
        }

        match self.resolver.resolve(self.config.technique(), &mut self.rng) {
            Some(LossEvent::Packet) => self.metrics.packet_loss += 1,
            Some(LossEvent::Burst) => self.metrics.burst_loss += 1,
            None => {}
        }

        self.tick = self.tick.next();

        if self.done() {
            self.metrics
                .finalise(self.config.simulation_time(), &mut self.rng);
            Status::Done
        } else {
            Status::Running
        }
    }

    /// Drive the clock to its bound and return the report.
    pub fn run(self) -> SimulationReport {
        self.run_with(|_| {})
    }

    /// Drive the clock to its bound, reporting [`Progress`] once per tick
    /// (at tick start), and return the report.
    ///
    /// The observer is advisory; it cannot alter the run.
    pub fn run_with<F>(mut self, mut observe: F) -> SimulationReport
    where
        F: FnMut(Progress),
    {
        while !self.done() {
            observe(self.progress());
            self.step();
        }
        self.into_report()
    }
}
