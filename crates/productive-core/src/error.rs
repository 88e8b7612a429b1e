// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for productive-core

use thiserror::Error;

/// Errors that can occur while tallying commit times
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Hour outside the 0..=23 range of a 24-hour clock
    #[error("Hour out of range: {hour} (expected 0-23)")]
    HourOutOfRange {
        /// The rejected hour
        hour: u32,
    },

    /// No bucket contains the hour
    #[error("No bucket covers hour {hour}")]
    Unclassified {
        /// The hour that matched no bucket
        hour: u32,
    },

    /// Bucket ranges overlap or leave part of the day uncovered
    #[error("Bucket boundaries must cover 0-24 exactly once: {message}")]
    BoundariesNotExhaustive {
        /// Description of the first problem found
        message: String,
    },

    /// Commit timestamp could not be parsed as RFC 3339
    #[error("Invalid commit timestamp '{timestamp}': {message}")]
    InvalidTimestamp {
        /// The raw timestamp string
        timestamp: String,
        /// Parser error message
        message: String,
    },
}
