use anchor_lang::prelude::*;

use crate::errors::CheckInError;

/// Index of the check-in window containing `timestamp`.
/// # Arguments
/// * `timestamp` - Cluster timestamp in seconds.
/// * `time_unit` - Window length in seconds.
/// # Returns
/// * `Result<u64>` - `timestamp / time_unit`, or `InvalidTimeUnit` for a zero window.
#[inline(always)]
pub fn window_index(timestamp: u64, time_unit: u64) -> Result<u64> {
    timestamp
        .checked_div(time_unit)
        .ok_or(CheckInError::InvalidTimeUnit.into())
}

/// Whether a user whose last accepted check-in was at `last_timestamp` may check in at `now`.
/// The timestamp must move strictly forward, and unless this is the user's first check-in
/// `now` must also fall in a later window than `last_timestamp`.
/// With a one second window this reduces to `last_timestamp < now`.
/// # Arguments
/// * `count` - Number of check-ins already recorded for the user.
/// * `last_timestamp` - Timestamp of the user's last accepted check-in, 0 if none.
/// * `now` - Current cluster timestamp.
/// * `time_unit` - Window length in seconds.
/// # Returns
/// * `Result<bool>` - True if the check-in opens a new window.
pub fn is_new_window(count: u64, last_timestamp: u64, now: u64, time_unit: u64) -> Result<bool> {
    if last_timestamp >= now {
        return Ok(false);
    }

    if count == 0 {
        return Ok(true);
    }

    Ok(window_index(last_timestamp, time_unit)? < window_index(now, time_unit)?)
}
