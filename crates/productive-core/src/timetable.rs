// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Day-segment buckets and the vote table
//!
//! A [`TimeTable`] holds four half-open hour ranges that together cover the
//! 24-hour day exactly once. Classifying an hour adds one vote to the single
//! bucket whose range contains it.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Number of hours in a day; bucket ranges end at or before this value
pub const HOURS_PER_DAY: u32 = 24;

/// Identifies one of the four day segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKey {
    /// 06:00 up to 12:00
    Morning,
    /// 12:00 up to 18:00
    Daytime,
    /// 18:00 up to midnight
    Evening,
    /// Midnight up to 06:00
    Night,
}

impl BucketKey {
    /// All keys in display order
    pub const ALL: [BucketKey; 4] = [
        BucketKey::Morning,
        BucketKey::Daytime,
        BucketKey::Evening,
        BucketKey::Night,
    ];

    /// Lowercase name of the key
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKey::Morning => "morning",
            BucketKey::Daytime => "daytime",
            BucketKey::Evening => "evening",
            BucketKey::Night => "night",
        }
    }

    /// Whether this segment counts toward the early-bird side of the day
    #[must_use]
    pub fn is_early(&self) -> bool {
        matches!(self, BucketKey::Morning | BucketKey::Daytime)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day segment with its hour range and vote count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Segment key
    pub key: BucketKey,
    /// Display label, prefixed with a symbol
    pub label: String,
    /// First hour in the range (inclusive)
    pub starts_at: u32,
    /// Hour the range ends before (exclusive)
    pub ends_before: u32,
    votes: u64,
}

impl Bucket {
    /// Create an empty bucket covering `[starts_at, ends_before)`
    #[must_use]
    pub fn new(key: BucketKey, label: impl Into<String>, starts_at: u32, ends_before: u32) -> Self {
        Self {
            key,
            label: label.into(),
            starts_at,
            ends_before,
            votes: 0,
        }
    }

    /// Number of commits that landed in this bucket
    #[must_use]
    pub fn votes(&self) -> u64 {
        self.votes
    }

    /// Check whether `hour` falls inside the half-open range
    #[must_use]
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.starts_at && hour < self.ends_before
    }
}

/// Ordered set of buckets covering the whole day
///
/// Insertion order is display order. Votes only ever grow, through
/// [`TimeTable::classify`] or [`TimeTable::tally`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeTable {
    buckets: Vec<Bucket>,
}

impl Default for TimeTable {
    fn default() -> Self {
        Self {
            buckets: vec![
                Bucket::new(BucketKey::Morning, "🌞 Morning", 6, 12),
                Bucket::new(BucketKey::Daytime, "🌆 Daytime", 12, 18),
                Bucket::new(BucketKey::Evening, "🌃 Evening", 18, 24),
                Bucket::new(BucketKey::Night, "🌙 Night", 0, 6),
            ],
        }
    }
}

impl TimeTable {
    /// Create the standard morning/daytime/evening/night table with no votes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from custom buckets
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BoundariesNotExhaustive`] if a key repeats, a range
    /// is empty or runs past 24, or the ranges do not cover every hour of
    /// the day exactly once.
    pub fn from_buckets(buckets: Vec<Bucket>) -> Result<Self, CoreError> {
        let mut coverage = [0u8; HOURS_PER_DAY as usize];

        for (i, bucket) in buckets.iter().enumerate() {
            if buckets[..i].iter().any(|b| b.key == bucket.key) {
                return Err(not_exhaustive(format!("bucket '{}' is listed twice", bucket.key)));
            }
            if bucket.starts_at >= bucket.ends_before || bucket.ends_before > HOURS_PER_DAY {
                return Err(not_exhaustive(format!(
                    "bucket '{}' has invalid range [{}, {})",
                    bucket.key, bucket.starts_at, bucket.ends_before
                )));
            }
            for hour in bucket.starts_at..bucket.ends_before {
                coverage[hour as usize] += 1;
            }
        }

        if let Some(hour) = coverage.iter().position(|&n| n == 0) {
            return Err(not_exhaustive(format!("hour {hour} is not covered")));
        }
        if let Some(hour) = coverage.iter().position(|&n| n > 1) {
            return Err(not_exhaustive(format!("hour {hour} is covered more than once")));
        }

        let buckets = buckets
            .into_iter()
            .map(|b| Bucket { votes: 0, ..b })
            .collect();
        Ok(Self { buckets })
    }

    /// Add one vote to the bucket containing `hour`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HourOutOfRange`] for hours above 23, and
    /// [`CoreError::Unclassified`] if no bucket covers the hour. The table is
    /// unchanged in both cases.
    pub fn classify(&mut self, hour: u32) -> Result<BucketKey, CoreError> {
        if hour >= HOURS_PER_DAY {
            return Err(CoreError::HourOutOfRange { hour });
        }
        let bucket = self
            .buckets
            .iter_mut()
            .find(|b| b.contains(hour))
            .ok_or(CoreError::Unclassified { hour })?;
        bucket.votes += 1;
        Ok(bucket.key)
    }

    /// Consume the table, vote for `hour`, and hand the table back
    ///
    /// Convenient as the step function of a `try_fold`.
    ///
    /// # Errors
    ///
    /// Same as [`TimeTable::classify`].
    pub fn tally(mut self, hour: u32) -> Result<Self, CoreError> {
        self.classify(hour)?;
        Ok(self)
    }

    /// Votes recorded for `key`, or 0 if the table has no such bucket
    #[must_use]
    pub fn votes(&self, key: BucketKey) -> u64 {
        self.get(key).map_or(0, Bucket::votes)
    }

    /// Sum of votes across all buckets
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.buckets.iter().map(Bucket::votes).sum()
    }

    /// Look up a bucket by key
    #[must_use]
    pub fn get(&self, key: BucketKey) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.key == key)
    }

    /// Buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// Buckets in display order, as a slice
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}

fn not_exhaustive(message: String) -> CoreError {
    CoreError::BoundariesNotExhaustive { message }
}
