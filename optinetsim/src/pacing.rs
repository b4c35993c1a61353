use std::{fmt, str::FromStr, thread, time::Duration};
use thiserror::Error;

/// Default per-tick pause for interactive runs.
///
/// At ten ticks per simulated second, 10ms per tick plays one simulated
/// second in roughly 100ms of wall time.
pub const DEFAULT_TICK_PAUSE: Duration = Duration::from_millis(10);

/// Per-tick pacing strategy.
///
/// The simulated clock is decoupled from wall time; pacing is layered on top
/// by the runner and has no effect on the simulation outcome. Use
/// [`Pacing::None`] for batch runs and tests, [`Pacing::Fixed`] to slow the
/// loop down to a watchable pace.
///
/// # Example
///
/// ```
/// use optinetsim::Pacing;
/// use std::time::Duration;
///
/// let none = Pacing::None;
/// assert_eq!(none.to_string(), "none");
///
/// let paced: Pacing = "10ms".parse().unwrap();
/// assert_eq!(paced, Pacing::Fixed(Duration::from_millis(10)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacing {
    /// No pause: run as fast as the host allows (default).
    #[default]
    None,
    /// Sleep for the given duration after every tick.
    Fixed(Duration),
}

impl Pacing {
    /// The interactive default: [`DEFAULT_TICK_PAUSE`] after every tick.
    pub const fn interactive() -> Self {
        Self::Fixed(DEFAULT_TICK_PAUSE)
    }

    /// Pause between two ticks according to the strategy.
    pub(crate) fn pause(&self) {
        match self {
            Pacing::None => {}
            Pacing::Fixed(pause) => thread::sleep(*pause),
        }
    }
}

impl fmt::Display for Pacing {
    /// Formats as `"none"` or the pause with its coarsest exact unit:
    /// `"10ms"`, `"500us"`, `"1s"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pacing::None => write!(f, "none"),
            Pacing::Fixed(pause) => {
                let micros = pause.as_micros();
                if micros % 1_000_000 == 0 {
                    write!(f, "{}s", pause.as_secs())
                } else if micros % 1_000 == 0 {
                    write!(f, "{}ms", pause.as_millis())
                } else {
                    write!(f, "{micros}us")
                }
            }
        }
    }
}

impl FromStr for Pacing {
    type Err = PacingParseError;

    /// Parses `"none"` or a pause like `"10ms"`, `"500us"`, `"1s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Pacing::None);
        }

        let (number, from_unit): (&str, fn(u64) -> Duration) =
            if let Some(number) = s.strip_suffix("ms") {
                (number, Duration::from_millis)
            } else if let Some(number) = s.strip_suffix("us") {
                (number, Duration::from_micros)
            } else if let Some(number) = s.strip_suffix('s') {
                (number, Duration::from_secs)
            } else {
                return Err(PacingParseError::MissingUnit);
            };

        let number: u64 = number
            .trim()
            .parse()
            .map_err(|_| PacingParseError::InvalidNumber)?;
        Ok(Pacing::Fixed(from_unit(number)))
    }
}

/// Error returned when parsing a [`Pacing`] from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PacingParseError {
    /// The string is neither `"none"` nor suffixed with `s`, `ms` or `us`.
    #[error("expected `none' or a duration suffixed with s, ms or us")]
    MissingUnit,
    /// The part before the unit could not be parsed as an integer.
    #[error("invalid number before the unit")]
    InvalidNumber,
}
