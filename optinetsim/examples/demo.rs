//! Interactive demo: one paced simulation run with a progress bar, then the
//! metrics and the burst log.
//!
//! Run with:
//!   cargo run --example demo -p optinetsim -- --technique OBS --assembly Mixed

use anyhow::{Result, bail};
use clap::Parser;
use indicatif::ProgressBar;
use optinetsim::{
    AssemblyPolicy, Pacing, ReservationScheme, RunOutcome, SimConfiguration, SimRunner,
    Simulation, SwitchingTechnique,
};

#[derive(Parser)]
struct Command {
    /// Switching technique: OPS, OBS or OTDM
    #[arg(long, default_value = "OPS")]
    technique: SwitchingTechnique,

    /// Reservation label: None, JIT, JET, Tell-And-Wait, Tell-And-Go
    #[arg(long, default_value = "None")]
    reservation: ReservationScheme,

    /// Burst assembly policy: Timer-Based, Length-Based or Mixed
    #[arg(long, default_value = "Timer-Based")]
    assembly: AssemblyPolicy,

    /// Traffic arrival rate in packets/sec
    #[arg(long, default_value = "60")]
    rate: u32,

    /// Number of wavelengths (accepted, reserved)
    #[arg(long, default_value = "4")]
    wavelengths: u8,

    /// Simulated run length in seconds
    #[arg(long, default_value = "6")]
    time: u32,

    /// Seed of the run's random source
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Per-tick pause: "none" or a duration like "10ms"
    #[arg(long, default_value = "10ms")]
    pacing: Pacing,
}

fn main() -> Result<()> {
    let cmd = Command::parse();

    let config = SimConfiguration::builder()
        .set_technique(cmd.technique)
        .set_reservation(cmd.reservation)
        .set_assembly(cmd.assembly)
        .set_traffic_rate(cmd.rate)
        .set_num_wavelengths(cmd.wavelengths)
        .set_simulation_time(cmd.time)
        .build()?;

    println!("{config}");

    let mut simulation = Simulation::new(config);
    simulation.set_seed(cmd.seed);
    let total_ticks = simulation.total_ticks();

    let runner = SimRunner::spawn(simulation, cmd.pacing);

    let bar = ProgressBar::new(total_ticks);
    for progress in runner.progress().iter() {
        bar.set_position(progress.tick());
    }
    bar.finish();

    let RunOutcome::Completed(report) = runner.join()? else {
        bail!("The run was cancelled")
    };

    let metrics = report.metrics;
    println!();
    println!("Total packets : {}", metrics.packets_total);
    println!("Packet loss   : {}", metrics.packet_loss);
    println!("Total bursts  : {}", metrics.bursts_total);
    println!("Burst loss    : {}", metrics.burst_loss);
    println!("Throughput    : {} pkts/sec", metrics.throughput);
    println!("Avg delay     : {} ms", metrics.avg_delay_ms);

    println!();
    for (index, size) in report.burst_sizes() {
        let row = "#".repeat(size.min(60) as usize);
        println!("burst #{index:>3} ({size:>3} packets) {row}");
    }

    Ok(())
}
