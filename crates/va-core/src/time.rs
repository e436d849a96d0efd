//! Simulation time helpers.
//!
//! # Design
//!
//! Time is a plain `f64` count of seconds since midnight of the simulated
//! day.  Values beyond `MIDNIGHT` are legal and mean "the following day";
//! transit schedules routinely run past 24:00:00 and the departure lookup
//! wraps around rather than rejecting such times.
//!
//! Only formatting and parsing live here.  All arithmetic is ordinary `f64`
//! addition, which keeps leg bookkeeping (`arrival = departure + travel`)
//! exact for the integer-second values schedules use.

use crate::{CoreError, CoreResult};

/// Seconds in one simulated day.
pub const MIDNIGHT: f64 = 86_400.0;

/// Build a time from hour/minute/second components.
#[inline]
pub fn hms(hours: u32, minutes: u32, seconds: u32) -> f64 {
    (u64::from(hours) * 3_600 + u64::from(minutes) * 60 + u64::from(seconds)) as f64
}

/// Format seconds as `HH:MM:SS`.  Hours are not wrapped, so `25:10:00` is
/// printed for a time one hour and ten minutes after the next midnight.
/// Negative input is clamped to zero; fractions are truncated.
pub fn format_hms(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let h = total / 3_600;
    let m = (total % 3_600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Parse `HH:MM:SS` or `HH:MM` into seconds.  Hours may exceed 23.
pub fn parse_hms(text: &str) -> CoreResult<f64> {
    let mut parts = text.trim().split(':');
    let mut next = |what: &str, required: bool| -> CoreResult<u32> {
        match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .map_err(|e| CoreError::Parse(format!("bad {what} in time {text:?}: {e}"))),
            None if required => Err(CoreError::Parse(format!("missing {what} in time {text:?}"))),
            None => Ok(0),
        }
    };
    let h = next("hours", true)?;
    let m = next("minutes", true)?;
    let s = next("seconds", false)?;
    if m >= 60 || s >= 60 {
        return Err(CoreError::Parse(format!("time {text:?} out of range")));
    }
    Ok(hms(h, m, s))
}
