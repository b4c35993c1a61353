use crate::{
    assembly::AssemblyPolicy, config::ReservationScheme, contention::SwitchingTechnique,
};

/// Default [`SwitchingTechnique`]
///
/// ```
/// # use optinetsim_core::defaults::*;
/// assert_eq!(DEFAULT_TECHNIQUE.to_string(), "OPS");
/// ```
pub const DEFAULT_TECHNIQUE: SwitchingTechnique = SwitchingTechnique::Ops;

/// Default [`ReservationScheme`]
///
/// No reservation signalling is labelled by default; the scheme is cosmetic
/// either way.
pub const DEFAULT_RESERVATION: ReservationScheme = ReservationScheme::None;

/// Default [`AssemblyPolicy`]
///
/// ```
/// # use optinetsim_core::defaults::*;
/// assert_eq!(DEFAULT_ASSEMBLY.to_string(), "Timer-Based");
/// ```
pub const DEFAULT_ASSEMBLY: AssemblyPolicy = AssemblyPolicy::TimerBased;

/// Default traffic arrival rate, in packets per second.
///
/// A mid-range load: busy enough to exercise every assembly policy, far from
/// the contention-gate saturation point.
pub const DEFAULT_TRAFFIC_RATE: u32 = 60;

/// Default wavelength count.
///
/// Accepted and carried through; the current contention model does not
/// differentiate on carriers.
pub const DEFAULT_NUM_WAVELENGTHS: u8 = 4;

/// Default simulated run length, in seconds.
///
/// ```
/// # use optinetsim_core::defaults::*;
/// # use optinetsim_core::TICKS_PER_SECOND;
/// assert_eq!(u64::from(DEFAULT_SIMULATION_TIME) * TICKS_PER_SECOND, 60);
/// ```
pub const DEFAULT_SIMULATION_TIME: u32 = 6;
