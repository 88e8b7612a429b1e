// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report assembly
//!
//! [`Report::build`] folds commit hours into a fresh [`TimeTable`] and lays
//! out one chart line per bucket:
//!
//! ```text
//! 🌞 Morning     2 commits  ███████████░░░░░░░░░░  50.0%
//! ```
//!
//! Columns: label padded to 9, `"{votes:>5} commits"` padded to 14, the bar,
//! then the percentage right-aligned to 5 with one decimal and a `%` suffix.
//!
//! The label width is measured in UTF-16 code units, so each emoji counts
//! twice and `🌙 Night` gets a single trailing space.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::chart::{BAR_WIDTH, render_bar};
use crate::error::CoreError;
use crate::timetable::{BucketKey, TimeTable};

const LABEL_COLUMN: usize = 9;
const COMMITS_COLUMN: usize = 14;
const VOTES_COLUMN: usize = 5;
const PERCENT_COLUMN: usize = 5;

/// Whether the developer mostly commits in the first or second half of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    /// Morning plus daytime commits are at least evening plus night commits
    EarlyBird,
    /// Evening plus night commits outnumber the rest
    NightOwl,
}

impl Chronotype {
    /// Classify a tallied table
    #[must_use]
    pub fn from_table(table: &TimeTable) -> Self {
        let (early, night) = split_votes(table);
        if early >= night {
            Chronotype::EarlyBird
        } else {
            Chronotype::NightOwl
        }
    }

    /// Title used as the published file name
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Chronotype::EarlyBird => "I'm an early 🐤",
            Chronotype::NightOwl => "I'm a night 🦉",
        }
    }
}

/// One rendered chart row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    /// Bucket this row describes
    pub key: BucketKey,
    /// Bucket label
    pub label: String,
    /// Commits in the bucket
    pub votes: u64,
    /// Bar of [`BAR_WIDTH`] glyphs
    pub bar: String,
    /// Share of all commits, 0-100
    pub percent: f64,
}

impl ReportLine {
    /// Percentage right-aligned to the percent column, one decimal, `%` suffix
    ///
    /// Ties round half up (`6.25` becomes `6.3`).
    #[must_use]
    pub fn percent_text(&self) -> String {
        let rounded = (self.percent * 10.0).round() / 10.0;
        format!("{rounded:>PERCENT_COLUMN$.1}%")
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commits = format!("{:>VOTES_COLUMN$} commits", self.votes);
        write!(
            f,
            "{} {:<COMMITS_COLUMN$} {} {}",
            padded_label(&self.label),
            commits,
            self.bar,
            self.percent_text()
        )
    }
}

/// A tallied table with its rendered chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    table: TimeTable,
    total_votes: u64,
    chronotype: Chronotype,
    lines: Vec<ReportLine>,
}

impl Report {
    /// Tally `hours` into a fresh table and render it
    ///
    /// Returns `Ok(None)` when there are no hours at all: there is nothing
    /// to chart and nothing should be published.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HourOutOfRange`] if any hour is above 23.
    pub fn build<I>(hours: I) -> Result<Option<Self>, CoreError>
    where
        I: IntoIterator<Item = u32>,
    {
        let table = hours
            .into_iter()
            .try_fold(TimeTable::new(), TimeTable::tally)?;
        Ok(Self::from_table(table))
    }

    /// Render an already tallied table, or `None` if it holds no votes
    #[must_use]
    pub fn from_table(table: TimeTable) -> Option<Self> {
        let total_votes = table.total_votes();
        if total_votes == 0 {
            debug!("No votes in time table, nothing to report");
            return None;
        }

        let lines = table
            .iter()
            .map(|bucket| {
                let percent = bucket.votes() as f64 / total_votes as f64 * 100.0;
                ReportLine {
                    key: bucket.key,
                    label: bucket.label.clone(),
                    votes: bucket.votes(),
                    bar: render_bar(percent, BAR_WIDTH),
                    percent,
                }
            })
            .collect();
        let chronotype = Chronotype::from_table(&table);
        debug!(total_votes, ?chronotype, "Built commit time report");

        Some(Self {
            table,
            total_votes,
            chronotype,
            lines,
        })
    }

    /// Rows in bucket order
    #[must_use]
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// The tallied table
    #[must_use]
    pub fn table(&self) -> &TimeTable {
        &self.table
    }

    /// Number of commits charted
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Morning plus daytime commits
    #[must_use]
    pub fn times_coded_early(&self) -> u64 {
        split_votes(&self.table).0
    }

    /// Evening plus night commits
    #[must_use]
    pub fn times_coded_night(&self) -> u64 {
        split_votes(&self.table).1
    }

    /// Early bird or night owl
    #[must_use]
    pub fn chronotype(&self) -> Chronotype {
        self.chronotype
    }

    /// Shorthand for `chronotype() == Chronotype::EarlyBird`
    #[must_use]
    pub fn is_early_bird(&self) -> bool {
        self.chronotype == Chronotype::EarlyBird
    }

    /// Title for the published file
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.chronotype.title()
    }

    /// The chart, one line per bucket, newline separated
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pad `label` with spaces up to [`LABEL_COLUMN`] UTF-16 code units
fn padded_label(label: &str) -> String {
    let width = label.encode_utf16().count();
    format!("{label}{}", " ".repeat(LABEL_COLUMN.saturating_sub(width)))
}

fn split_votes(table: &TimeTable) -> (u64, u64) {
    table.iter().fold((0, 0), |(early, night), bucket| {
        if bucket.key.is_early() {
            (early + bucket.votes(), night)
        } else {
            (early, night + bucket.votes())
        }
    })
}
