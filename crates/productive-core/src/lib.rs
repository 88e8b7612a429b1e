// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! productive-core: Commit time bucketing for productive-box
//!
//! This library crate tallies commit hours into four day segments
//! (morning, daytime, evening, night) and renders the tally as a
//! fixed-width text bar chart.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use productive_core::Report;
//!
//! let report = Report::build([7, 7, 14, 22])
//!     .expect("hours are in range")
//!     .expect("at least one commit");
//!
//! assert!(report.is_early_bird());
//! println!("{}", report.title());
//! println!("{}", report.text());
//! ```

pub mod chart;
pub mod commit_time;
pub mod error;
pub mod report;
pub mod timetable;

pub use chart::{BAR_WIDTH, render_bar};
pub use commit_time::commit_hour;
pub use error::CoreError;
pub use report::{Chronotype, Report, ReportLine};
pub use timetable::{Bucket, BucketKey, TimeTable};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::report::{Chronotype, Report};
    pub use crate::timetable::{BucketKey, TimeTable};
}
