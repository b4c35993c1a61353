use crate::{queue::PendingQueue, tick::Tick};
use anyhow::bail;
use std::{fmt, str::FromStr};

/// Timer-Based flush interval, in ticks.
pub const TIMER_FLUSH_INTERVAL: u64 = 8;
/// Length-Based assembly threshold — and therefore burst size — in packets.
pub const LENGTH_THRESHOLD: usize = 40;
/// Queue length above which Mixed assembly flushes immediately.
pub const MIXED_LENGTH_THRESHOLD: usize = 30;
/// Mixed fallback flush interval, in ticks.
pub const MIXED_FLUSH_INTERVAL: u64 = 10;

/// A completed burst.
///
/// Only the packet count survives assembly; packet identities are not
/// retained. The count is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Burst(u32);

impl Burst {
    pub(crate) fn new(size: u32) -> Self {
        debug_assert!(size >= 1, "a burst aggregates at least one packet");
        Self(size)
    }

    /// Number of packets aggregated in this burst.
    pub fn size(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Burst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How pending packets are aggregated into bursts.
///
/// Runs once per tick, after generation and before contention resolution.
/// At most one burst is emitted per tick.
///
/// | Policy | Trigger | Burst size | Queue after |
/// |--------|---------|------------|-------------|
/// | Timer-Based | tick is a multiple of [`TIMER_FLUSH_INTERVAL`], queue non-empty | full queue length | empty |
/// | Length-Based | queue length ≥ [`LENGTH_THRESHOLD`] | [`LENGTH_THRESHOLD`] | first [`LENGTH_THRESHOLD`] removed, order kept |
/// | Mixed | queue length > [`MIXED_LENGTH_THRESHOLD`], or tick is a multiple of [`MIXED_FLUSH_INTERVAL`]; queue non-empty | full queue length | empty |
///
/// Packets still queued when the run ends are discarded unflushed; that
/// remainder is a characteristic of the assembly policies and is not counted
/// as loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AssemblyPolicy {
    /// Flush the whole queue on a fixed tick interval.
    #[default]
    TimerBased,
    /// Emit a fixed-size burst whenever enough packets have accumulated.
    LengthBased,
    /// Flush the whole queue on a length threshold, with a timer fallback.
    Mixed,
}

impl AssemblyPolicy {
    /// Run one assembly pass over `queue` for the given `tick`.
    pub(crate) fn assemble(self, tick: Tick, queue: &mut PendingQueue) -> Option<Burst> {
        match self {
            Self::TimerBased => {
                if tick.is_multiple_of(TIMER_FLUSH_INTERVAL) && !queue.is_empty() {
                    let size = queue.take_all();
                    return Some(Burst::new(size as u32));
                }
                None
            }
            Self::LengthBased => {
                if queue.len() >= LENGTH_THRESHOLD {
                    // the guard pins this to LENGTH_THRESHOLD; kept as written
                    let size = queue.len().min(LENGTH_THRESHOLD);
                    queue.take_front(LENGTH_THRESHOLD);
                    return Some(Burst::new(size as u32));
                }
                None
            }
            Self::Mixed => {
                if (queue.len() > MIXED_LENGTH_THRESHOLD
                    || tick.is_multiple_of(MIXED_FLUSH_INTERVAL))
                    && !queue.is_empty()
                {
                    let size = queue.take_all();
                    return Some(Burst::new(size as u32));
                }
                None
            }
        }
    }
}

impl fmt::Display for AssemblyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerBased => "Timer-Based".fmt(f),
            Self::LengthBased => "Length-Based".fmt(f),
            Self::Mixed => "Mixed".fmt(f),
        }
    }
}

impl FromStr for AssemblyPolicy {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Timer-Based" | "timer-based" | "timer" => Ok(Self::TimerBased),
            "Length-Based" | "length-based" | "length" => Ok(Self::LengthBased),
            "Mixed" | "mixed" => Ok(Self::Mixed),
            other => bail!(
                "Unknown assembly policy `{other}', expecting Timer-Based, Length-Based or Mixed"
            ),
        }
    }
}
