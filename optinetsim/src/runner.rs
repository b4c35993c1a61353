use crate::pacing::Pacing;
use anyhow::{Result, bail};
use optinetsim_core::{Progress, Simulation, SimulationReport};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
};

/// How a background run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The clock reached its bound; the finalised report is attached.
    Completed(SimulationReport),
    /// [`SimRunner::cancel`] was observed at a tick boundary before the
    /// bound. No partial report is produced.
    Cancelled,
}

/// Drives a [`Simulation`] to completion on a background thread.
///
/// The runner steps the simulation tick by tick, publishing [`Progress`]
/// before each tick and pausing after it according to the [`Pacing`]
/// strategy. Cancellation is cooperative and checked at tick boundaries
/// only, so each tick's generate–assemble–resolve sequence stays atomic.
///
/// Make sure to call [`SimRunner::join`] to collect the outcome.
pub struct SimRunner {
    cancel: Arc<AtomicBool>,
    progress: mpsc::Receiver<Progress>,
    handle: thread::JoinHandle<RunOutcome>,
}

impl SimRunner {
    /// Spawn a background run of `simulation`.
    ///
    /// Seed the simulation before spawning; the runner never touches the
    /// random source.
    pub fn spawn(simulation: Simulation, pacing: Pacing) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let (sender, progress) = mpsc::channel();

        let flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || run(simulation, pacing, flag, sender));

        Self {
            cancel,
            progress,
            handle,
        }
    }

    /// Receiver side of the per-tick progress stream.
    ///
    /// The stream closes when the run ends; iterating it to exhaustion is a
    /// convenient way to follow a run to completion. Dropping the runner's
    /// receiver never stalls the run — progress is advisory.
    pub fn progress(&self) -> &mpsc::Receiver<Progress> {
        &self.progress
    }

    /// Request cooperative cancellation.
    ///
    /// Takes effect at the next tick boundary; the tick in flight always
    /// completes.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for the background run and collect its outcome.
    pub fn join(self) -> Result<RunOutcome> {
        match self.handle.join() {
            Ok(outcome) => Ok(outcome),
            Err(error) => bail!("Simulation run panicked: {error:?}"),
        }
    }
}

fn run(
    mut simulation: Simulation,
    pacing: Pacing,
    cancel: Arc<AtomicBool>,
    progress: mpsc::Sender<Progress>,
) -> RunOutcome {
    while !simulation.done() {
        if cancel.load(Ordering::Relaxed) {
            return RunOutcome::Cancelled;
        }

        // a dropped receiver must not stop the run
        let _ = progress.send(simulation.progress());

        simulation.step();
        pacing.pause();
    }

    RunOutcome::Completed(simulation.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use optinetsim_core::SimConfiguration;
    use std::time::Duration;

    fn simulation(seed: u64) -> Simulation {
        let config = SimConfiguration::builder()
            .set_traffic_rate(120)
            .set_simulation_time(5)
            .build()
            .unwrap();
        let mut simulation = Simulation::new(config);
        simulation.set_seed(seed);
        simulation
    }

    #[test]
    fn background_run_matches_a_synchronous_one() {
        let expected = simulation(42).run();

        let runner = SimRunner::spawn(simulation(42), Pacing::None);
        let outcome = runner.join().unwrap();

        assert_eq!(outcome, RunOutcome::Completed(expected));
    }

    #[test]
    fn progress_stream_covers_every_tick() {
        let total = simulation(7).total_ticks();

        let runner = SimRunner::spawn(simulation(7), Pacing::None);
        let fractions: Vec<f64> = runner.progress().iter().map(|p| p.fraction()).collect();
        runner.join().unwrap();

        assert_eq!(fractions.len() as u64, total);
        assert_eq!(fractions[0], 0.0);
        assert!(fractions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unread_progress_does_not_stall_the_run() {
        // join consumes the receiver while the thread may still be
        // publishing; the run must complete regardless
        let runner = SimRunner::spawn(simulation(3), Pacing::None);
        assert!(matches!(runner.join().unwrap(), RunOutcome::Completed(_)));
    }

    #[test]
    fn cancellation_stops_between_ticks() {
        let config = SimConfiguration::builder()
            .set_traffic_rate(60)
            .set_simulation_time(15)
            .build()
            .unwrap();
        let simulation = Simulation::new(config);

        // pace the run slowly enough that cancellation lands well before
        // the 150-tick bound
        let runner = SimRunner::spawn(simulation, Pacing::Fixed(Duration::from_millis(10)));

        // wait for the run to actually start, then cancel
        let first = runner.progress().recv().unwrap();
        assert_eq!(first.tick(), 0);
        runner.cancel();

        assert_eq!(runner.join().unwrap(), RunOutcome::Cancelled);
    }
}
