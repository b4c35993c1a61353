use indicatif::ProgressBar;
use optinetsim_core::{SimConfiguration, Simulation};

fn main() -> anyhow::Result<()> {
    let config = SimConfiguration::builder()
        .set_traffic_rate(150)
        .set_simulation_time(15)
        .build()?;

    let mut simulation = Simulation::new(config);
    simulation.set_seed(7);

    let bar = ProgressBar::new(simulation.total_ticks());
    let report = simulation.run_with(|progress| bar.set_position(progress.tick()));
    bar.finish();

    for (index, size) in report.burst_sizes() {
        println!("burst #{index:>3}: {size} packets");
    }

    Ok(())
}
