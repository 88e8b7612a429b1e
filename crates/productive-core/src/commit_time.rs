// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Hour-of-day extraction from commit timestamps
//!
//! Timestamps are converted to a caller-supplied fixed offset before the
//! hour is read, so the same history always produces the same tally
//! regardless of the machine's local timezone.

use chrono::{DateTime, FixedOffset, Timelike};

use crate::error::CoreError;

/// Parse an RFC 3339 timestamp and return its hour (0-23) at `offset`
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if the string is not RFC 3339.
pub fn commit_hour(timestamp: &str, offset: &FixedOffset) -> Result<u32, CoreError> {
    let parsed = DateTime::parse_from_rfc3339(timestamp.trim()).map_err(|e| {
        CoreError::InvalidTimestamp {
            timestamp: timestamp.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(parsed.with_timezone(offset).hour())
}
