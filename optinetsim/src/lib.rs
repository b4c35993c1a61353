/*!
# OptiNetSim runner

Thin orchestration over [`optinetsim_core`]: run a simulation on a
background thread, stream per-tick progress over a channel, slow the clock
down to a watchable pace, and cancel cooperatively at tick boundaries.

The simulation itself stays untouched by all of this — pacing and progress
are presentation concerns; a headless caller can use
[`optinetsim_core::Simulation`] directly.

```no_run
use optinetsim::{Pacing, RunOutcome, SimConfiguration, SimRunner, Simulation};

let mut simulation = Simulation::new(SimConfiguration::default());
simulation.set_seed(42);

let runner = SimRunner::spawn(simulation, Pacing::interactive());
for progress in runner.progress().iter() {
    eprintln!("{:3.0}%", progress.fraction() * 100.0);
}

match runner.join()? {
    RunOutcome::Completed(report) => println!("{:?}", report.metrics),
    RunOutcome::Cancelled => println!("cancelled"),
}
# Ok::<(), anyhow::Error>(())
```
*/

mod pacing;
mod runner;

// convenient re-export of `optinetsim_core` core objects
pub use optinetsim_core::{
    AssemblyPolicy, Burst, ConfigurationError, LossEvent, Metrics, Priority, Progress,
    ReservationScheme, SimConfiguration, Simulation, SimulationReport, SwitchingTechnique,
};

pub use self::{
    pacing::{DEFAULT_TICK_PAUSE, Pacing, PacingParseError},
    runner::{RunOutcome, SimRunner},
};
