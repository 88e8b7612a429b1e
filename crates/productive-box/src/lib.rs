//! productive-box library
//!
//! This module exports the pieces of productive-box for use in integration
//! tests and as a library: configuration, the GitHub client, the gist
//! publisher, commit collection, and the run pipeline that ties them together.

pub mod collect;
pub mod config;
pub mod gist;
pub mod github;
pub mod run;
