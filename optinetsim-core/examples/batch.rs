use optinetsim_core::{AssemblyPolicy, SimConfiguration, Simulation, SwitchingTechnique};

fn main() -> anyhow::Result<()> {
    let config = SimConfiguration::builder()
        .set_technique(SwitchingTechnique::Obs)
        .set_assembly(AssemblyPolicy::Mixed)
        .set_traffic_rate(120)
        .set_simulation_time(10)
        .build()?;

    let mut simulation = Simulation::new(config);
    simulation.set_seed(42);

    let report = simulation.run();
    let metrics = report.metrics;

    println!("{config}");
    println!(
        "packets={packets} bursts={bursts} packet_loss={packet_loss} burst_loss={burst_loss}",
        packets = metrics.packets_total,
        bursts = metrics.bursts_total,
        packet_loss = metrics.packet_loss,
        burst_loss = metrics.burst_loss,
    );
    println!(
        "throughput={throughput} pkts/sec, avg_delay={avg_delay}ms",
        throughput = metrics.throughput,
        avg_delay = metrics.avg_delay_ms,
    );

    Ok(())
}
