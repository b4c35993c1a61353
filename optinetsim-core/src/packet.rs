use crate::tick::Tick;
use anyhow::bail;
use std::{fmt, ops::RangeInclusive, str};

/// Size range of a generated packet, in bytes.
///
/// The bounds are the classic Ethernet payload envelope: 64 bytes minimum,
/// 1500 bytes (one MTU) maximum.
///
/// ```
/// # use optinetsim_core::PACKET_SIZE_BYTES;
/// assert!(PACKET_SIZE_BYTES.contains(&64));
/// assert!(PACKET_SIZE_BYTES.contains(&1500));
/// assert!(!PACKET_SIZE_BYTES.contains(&1501));
/// ```
pub const PACKET_SIZE_BYTES: RangeInclusive<u16> = 64..=1500;

/// Relative importance of a generated packet.
///
/// Priorities are drawn uniformly by the [`TrafficGenerator`] and carried for
/// inspection only: none of the switching stages differentiates on priority.
///
/// [`TrafficGenerator`]: crate::TrafficGenerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Med,
    High,
}

impl Priority {
    pub(crate) const ALL: [Self; 3] = [Self::Low, Self::Med, Self::High];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => "Low".fmt(f),
            Self::Med => "Med".fmt(f),
            Self::High => "High".fmt(f),
        }
    }
}

impl str::FromStr for Priority {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" | "low" => Ok(Self::Low),
            "Med" | "med" => Ok(Self::Med),
            "High" | "high" => Ok(Self::High),
            other => bail!("Unknown priority `{other}', expecting Low, Med or High"),
        }
    }
}

/// # A synthetic packet
///
/// Produced by the traffic generator, held in the pending queue in arrival
/// order and consumed by burst assembly. A [`Packet`] is immutable once
/// created; no stage rewrites it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    arrival: Tick,
    size_bytes: u16,
    priority: Priority,
}

impl Packet {
    pub(crate) fn new(arrival: Tick, size_bytes: u16, priority: Priority) -> Self {
        debug_assert!(
            PACKET_SIZE_BYTES.contains(&size_bytes),
            "packet size {size_bytes} outside {PACKET_SIZE_BYTES:?}"
        );
        Self {
            arrival,
            size_bytes,
            priority,
        }
    }

    /// The tick this packet was generated on.
    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    /// Payload size in bytes, within [`PACKET_SIZE_BYTES`].
    pub fn size_bytes(&self) -> u16 {
        self.size_bytes
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_display() {
        assert_eq!(Priority::Low.to_string(), "Low");
        assert_eq!(Priority::Med.to_string(), "Med");
        assert_eq!(Priority::High.to_string(), "High");
    }

    #[test]
    fn priority_parse() {
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("med".parse::<Priority>().unwrap(), Priority::Med);
        assert_eq!(" High ".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn priority_parse_unknown() {
        let error = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Unknown priority `urgent', expecting Low, Med or High"
        );
    }

    #[test]
    fn priority_display_round_trip() {
        for priority in Priority::ALL {
            let parsed: Priority = priority.to_string().parse().unwrap();
            assert_eq!(parsed, priority);
        }
    }

    #[test]
    fn packet_accessors() {
        let packet = Packet::new(Tick::new(3), 1500, Priority::High);
        assert_eq!(packet.arrival(), Tick::new(3));
        assert_eq!(packet.size_bytes(), 1500);
        assert_eq!(packet.priority(), Priority::High);
    }
}
