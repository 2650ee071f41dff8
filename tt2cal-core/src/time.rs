//! "HH:MM" time-of-day helpers.
//!
//! Slot times travel through the pipeline as strings so that malformed
//! extraction output degrades to string comparison instead of a crash.
//! These helpers are the only place the strings are actually interpreted.

/// Check that `s` is a 24-hour "HH:MM" time.
pub fn is_hhmm(s: &str) -> bool {
    hhmm(s).is_some()
}

/// Parse "HH:MM" into (hour, minute). Returns None for anything malformed.
pub fn hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Minutes since midnight, or None if the string is not a valid time.
pub fn minutes_of(s: &str) -> Option<i64> {
    let (hour, minute) = hhmm(s)?;
    Some(i64::from(hour) * 60 + i64::from(minute))
}

/// Signed minute difference `end - start`. None if either side is malformed.
pub fn minutes_between(start: &str, end: &str) -> Option<i64> {
    Some(minutes_of(end)? - minutes_of(start)?)
}
