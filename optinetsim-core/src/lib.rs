/*!
# OptiNetSim core

Discrete-time, deterministic-by-seed simulation of optical switching
concepts: per-tick synthetic traffic, burst assembly under three policies,
and a probabilistic contention/loss model, producing a burst log and
aggregate [`Metrics`].

The model is illustrative, not queueing-theoretically accurate: contention
is a stochastic process layered on the tick clock, reservation schemes are
labels, and ten ticks make one simulated second.

```
use optinetsim_core::{AssemblyPolicy, SimConfiguration, Simulation, SwitchingTechnique};

let config = SimConfiguration::builder()
    .set_technique(SwitchingTechnique::Obs)
    .set_assembly(AssemblyPolicy::LengthBased)
    .set_traffic_rate(120)
    .set_simulation_time(5)
    .build()?;

let mut simulation = Simulation::new(config);
simulation.set_seed(42);

let report = simulation.run();
assert_eq!(report.metrics.bursts_total as usize, report.bursts.len());
# Ok::<(), optinetsim_core::ConfigurationError>(())
```
*/

pub mod assembly;
pub mod config;
pub mod contention;
pub mod defaults;
mod metrics;
mod packet;
mod queue;
mod report;
mod sample;
mod simulation;
mod tick;
mod traffic;

pub use self::{
    assembly::{AssemblyPolicy, Burst},
    config::{ConfigurationError, ReservationScheme, SimConfiguration, SimConfigurationBuilder},
    contention::{ContentionResolver, LossEvent, SwitchingTechnique},
    metrics::{AVG_DELAY_MS, Metrics},
    packet::{PACKET_SIZE_BYTES, Packet, Priority},
    report::SimulationReport,
    simulation::{Progress, Simulation, Status},
    tick::{TICKS_PER_SECOND, Tick},
    traffic::TrafficGenerator,
};
