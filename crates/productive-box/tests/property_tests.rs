// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for productive-box
//!
//! These tests use proptest to check that collection never loses or invents
//! commits, whatever mix of succeeding and failing repositories it meets.


use std::sync::Arc;

use chrono::{Offset, Utc};
use proptest::prelude::*;

use fixtures::{CommitAnswer, FakeGithub, TEST_ACTOR_ID, timestamps};
use productive_box::collect::collect_commit_hours;
use productive_box::config::parse_utc_offset;
use productive_box::github::{Repo, Viewer};

// ============================================================================
// Strategies
// ============================================================================

/// A repository answer: hours it returns, or a failing status code
fn answer_strategy() -> impl Strategy<Value = Result<Vec<u32>, u16>> {
    prop_oneof![
        3 => proptest::collection::vec(0u32..24, 0..30).prop_map(Ok),
        1 => (400u16..600).prop_map(Err),
    ]
}

fn viewer() -> Viewer {
    Viewer {
        username: "octocat".to_string(),
        id: TEST_ACTOR_ID.to_string(),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("build runtime")
}

proptest! {
    /// Property: every hour from a successful repository is collected, and
    /// every failing repository is reported exactly once
    #[test]
    fn prop_collection_accounts_for_every_repo(
        answers in proptest::collection::vec(answer_strategy(), 0..12)
    ) {
        let mut fake = FakeGithub::default();
        let mut expected_hours = Vec::new();
        let mut expected_failures = Vec::new();
        for (i, answer) in answers.iter().enumerate() {
            let repo = Repo::new("owner", format!("repo{i}"));
            match answer {
                Ok(hours) => {
                    expected_hours.extend(hours.iter().copied());
                    fake = fake.answer(repo, CommitAnswer::Dates(timestamps(hours)));
                }
                Err(code) => {
                    expected_failures.push(repo.clone());
                    fake = fake.answer(repo, CommitAnswer::Fail(*code));
                }
            }
        }
        let repos = fake.repos.clone();
        let api = Arc::new(fake);

        let collected = runtime().block_on(collect_commit_hours(
            api.clone(),
            &viewer(),
            repos,
            "master",
            Utc.fix(),
        ));

        let mut hours = collected.hours.clone();
        hours.sort_unstable();
        expected_hours.sort_unstable();
        prop_assert_eq!(hours, expected_hours);

        let mut failed: Vec<Repo> = collected.failures.iter().map(|f| f.repo.clone()).collect();
        failed.sort_by(|a, b| a.name.cmp(&b.name));
        expected_failures.sort_by(|a, b| a.name.cmp(&b.name));
        prop_assert_eq!(failed, expected_failures);

        prop_assert!(collected.invalid_timestamps.is_empty());
        prop_assert_eq!(api.commit_query_count(), answers.len());
    }

    /// Property: +HH:MM offsets parse to the matching number of seconds
    #[test]
    fn prop_utc_offset_roundtrip(negative in any::<bool>(), hours in 0i32..24, minutes in 0i32..60) {
        let sign = if negative { '-' } else { '+' };
        let raw = format!("{sign}{hours:02}:{minutes:02}");
        let expected = (hours * 3600 + minutes * 60) * if negative { -1 } else { 1 };

        let offset = parse_utc_offset(&raw).expect("valid offset");
        prop_assert_eq!(offset.local_minus_utc(), expected);

        let compact = format!("{sign}{hours:02}{minutes:02}");
        prop_assert_eq!(parse_utc_offset(&compact).map(|o| o.local_minus_utc()), Ok(expected));
    }

    /// Property: the offset parser never panics on arbitrary input
    #[test]
    fn prop_utc_offset_never_panics(raw in ".{0,12}") {
        let _ = parse_utc_offset(&raw);
    }
}
