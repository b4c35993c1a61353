use crate::{
    assembly::AssemblyPolicy, contention::SwitchingTechnique, defaults, tick::TICKS_PER_SECOND,
};
use anyhow::bail;
use std::{fmt, ops::RangeInclusive, str::FromStr};
use thiserror::Error;

/// Admissible traffic arrival rate, in packets per second.
pub const TRAFFIC_RATE: RangeInclusive<u32> = 10..=200;
/// Admissible wavelength count.
pub const NUM_WAVELENGTHS: RangeInclusive<u8> = 1..=16;
/// Admissible simulated run length, in seconds.
pub const SIMULATION_TIME: RangeInclusive<u32> = 3..=15;

/// Reservation / timing mechanism label.
///
/// Carried through configuration and reports for display purposes only: no
/// reservation scheme changes the modeled behaviour. The variants are the
/// classic burst-switching signalling families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReservationScheme {
    /// No reservation signalling.
    #[default]
    None,
    /// Just-In-Time.
    Jit,
    /// Just-Enough-Time.
    Jet,
    TellAndWait,
    TellAndGo,
}

impl fmt::Display for ReservationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => "None".fmt(f),
            Self::Jit => "JIT".fmt(f),
            Self::Jet => "JET".fmt(f),
            Self::TellAndWait => "Tell-And-Wait".fmt(f),
            Self::TellAndGo => "Tell-And-Go".fmt(f),
        }
    }
}

impl FromStr for ReservationScheme {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "None" | "none" => Ok(Self::None),
            "JIT" | "jit" => Ok(Self::Jit),
            "JET" | "jet" => Ok(Self::Jet),
            "Tell-And-Wait" | "tell-and-wait" => Ok(Self::TellAndWait),
            "Tell-And-Go" | "tell-and-go" => Ok(Self::TellAndGo),
            other => bail!(
                "Unknown reservation scheme `{other}', expecting None, JIT, JET, Tell-And-Wait or Tell-And-Go"
            ),
        }
    }
}

/// Error returned when a configuration value falls outside its documented
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// See [`TRAFFIC_RATE`].
    #[error("traffic rate must be in [10, 200] packets/sec, got {0}")]
    TrafficRate(u32),
    /// See [`NUM_WAVELENGTHS`].
    #[error("wavelength count must be in [1, 16], got {0}")]
    NumWavelengths(u8),
    /// See [`SIMULATION_TIME`].
    #[error("simulation time must be in [3, 15] seconds, got {0}")]
    SimulationTime(u32),
}

/// Immutable configuration of one simulation run.
///
/// Build via [`SimConfiguration::builder`], which checks every documented
/// range before a [`Simulation`] can exist. Once a run starts the
/// configuration never changes.
///
/// # Example
///
/// ```
/// use optinetsim_core::{AssemblyPolicy, SimConfiguration, SwitchingTechnique};
///
/// let config = SimConfiguration::builder()
///     .set_technique(SwitchingTechnique::Obs)
///     .set_assembly(AssemblyPolicy::LengthBased)
///     .set_traffic_rate(120)
///     .set_simulation_time(5)
///     .build()?;
///
/// assert_eq!(config.total_ticks(), 50);
/// # Ok::<(), optinetsim_core::ConfigurationError>(())
/// ```
///
/// [`Simulation`]: crate::Simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfiguration {
    technique: SwitchingTechnique,
    reservation: ReservationScheme,
    assembly: AssemblyPolicy,
    traffic_rate: u32,
    num_wavelengths: u8,
    simulation_time: u32,
}

impl SimConfiguration {
    /// Start from the control-panel defaults (see [`defaults`]).
    ///
    /// [`defaults`]: crate::defaults
    pub fn builder() -> SimConfigurationBuilder {
        SimConfigurationBuilder::default()
    }

    pub fn technique(&self) -> SwitchingTechnique {
        self.technique
    }

    /// The reservation label this run was configured with. Passed through
    /// to reports; never read by the simulation stages.
    pub fn reservation(&self) -> ReservationScheme {
        self.reservation
    }

    pub fn assembly(&self) -> AssemblyPolicy {
        self.assembly
    }

    /// Traffic arrival rate in packets per second, within [`TRAFFIC_RATE`].
    pub fn traffic_rate(&self) -> u32 {
        self.traffic_rate
    }

    /// Configured wavelength count, within [`NUM_WAVELENGTHS`]. Reserved
    /// for a contention model that differentiates on carriers; the current
    /// stages never read it.
    pub fn num_wavelengths(&self) -> u8 {
        self.num_wavelengths
    }

    /// Simulated run length in seconds, within [`SIMULATION_TIME`].
    pub fn simulation_time(&self) -> u32 {
        self.simulation_time
    }

    /// Length of the run in ticks: `simulation_time * 10`.
    pub fn total_ticks(&self) -> u64 {
        u64::from(self.simulation_time) * TICKS_PER_SECOND
    }
}

impl Default for SimConfiguration {
    fn default() -> Self {
        Self {
            technique: defaults::DEFAULT_TECHNIQUE,
            reservation: defaults::DEFAULT_RESERVATION,
            assembly: defaults::DEFAULT_ASSEMBLY,
            traffic_rate: defaults::DEFAULT_TRAFFIC_RATE,
            num_wavelengths: defaults::DEFAULT_NUM_WAVELENGTHS,
            simulation_time: defaults::DEFAULT_SIMULATION_TIME,
        }
    }
}

impl fmt::Display for SimConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{technique} / {reservation} / {assembly}, {rate} pkts/sec, {wavelengths} wavelengths, {time}s",
            technique = self.technique,
            reservation = self.reservation,
            assembly = self.assembly,
            rate = self.traffic_rate,
            wavelengths = self.num_wavelengths,
            time = self.simulation_time,
        )
    }
}

/// Builder for a validated [`SimConfiguration`].
///
/// Every setter replaces one field; [`build`](SimConfigurationBuilder::build)
/// checks the documented ranges and fails fast on the first violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimConfigurationBuilder {
    configuration: SimConfiguration,
}

impl SimConfigurationBuilder {
    pub fn set_technique(mut self, technique: SwitchingTechnique) -> Self {
        self.configuration.technique = technique;
        self
    }

    pub fn set_reservation(mut self, reservation: ReservationScheme) -> Self {
        self.configuration.reservation = reservation;
        self
    }

    pub fn set_assembly(mut self, assembly: AssemblyPolicy) -> Self {
        self.configuration.assembly = assembly;
        self
    }

    pub fn set_traffic_rate(mut self, traffic_rate: u32) -> Self {
        self.configuration.traffic_rate = traffic_rate;
        self
    }

    pub fn set_num_wavelengths(mut self, num_wavelengths: u8) -> Self {
        self.configuration.num_wavelengths = num_wavelengths;
        self
    }

    pub fn set_simulation_time(mut self, simulation_time: u32) -> Self {
        self.configuration.simulation_time = simulation_time;
        self
    }

    /// Validate the ranges and finalise the configuration.
    ///
    /// # Errors
    ///
    /// One [`ConfigurationError`] variant per out-of-range field; the first
    /// violation wins.
    pub fn build(self) -> Result<SimConfiguration, ConfigurationError> {
        let configuration = self.configuration;
        if !TRAFFIC_RATE.contains(&configuration.traffic_rate) {
            return Err(ConfigurationError::TrafficRate(configuration.traffic_rate));
        }
        if !NUM_WAVELENGTHS.contains(&configuration.num_wavelengths) {
            return Err(ConfigurationError::NumWavelengths(
                configuration.num_wavelengths,
            ));
        }
        if !SIMULATION_TIME.contains(&configuration.simulation_time) {
            return Err(ConfigurationError::SimulationTime(
                configuration.simulation_time,
            ));
        }
        Ok(configuration)
    }
}
