// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for productive-box flags
//!
//! These tests verify flag parsing and the settings derived from it. Flags
//! are always passed explicitly because every setting can also come from the
//! environment of the machine running the tests.

use clap::Parser;
use productive_box::config::{Config, ConfigError};
use tracing::Level;

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_short_flag_v() {
    let config = Config::try_parse_from(["productive-box", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert!(!config.quiet);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_long_flag() {
    let config =
        Config::try_parse_from(["productive-box", "--quiet"]).expect("parse should succeed");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_wins_over_quiet() {
    let config =
        Config::try_parse_from(["productive-box", "-v", "-q"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    // Boolean flags are toggled by presence only
    let result = Config::try_parse_from(["productive-box", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

// ============================================================================
// Publishing flags
// ============================================================================

#[test]
fn test_token_and_gist_flags() {
    let config = Config::try_parse_from([
        "productive-box",
        "--token",
        "ghp_abc",
        "--gist-id",
        "aa5a315d61ae9438b18d",
        "--gist-description",
        "when I code",
    ])
    .expect("parse should succeed");

    assert_eq!(config.token(), Ok("ghp_abc"));
    assert_eq!(config.gist_id(), Ok("aa5a315d61ae9438b18d"));
    assert_eq!(config.gist_description(), "when I code");
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_branch_and_api_url_flags() {
    let config = Config::try_parse_from([
        "productive-box",
        "--branch",
        "main",
        "--api-url",
        "https://github.example.com/api",
    ])
    .expect("parse should succeed");

    assert_eq!(config.branch(), "main");
    assert_eq!(config.api_url(), "https://github.example.com/api");
}

#[test]
fn test_enterprise_server_urls() {
    let config = Config::try_parse_from([
        "productive-box",
        "--api-url",
        "https://ghe.example/api/v3",
        "--graphql-url",
        "https://ghe.example/api/graphql",
    ])
    .expect("parse should succeed");

    assert_eq!(config.api_url(), "https://ghe.example/api/v3");
    assert_eq!(config.graphql_url(), Some("https://ghe.example/api/graphql"));
}

#[test]
fn test_negative_utc_offset_flag() {
    let config = Config::try_parse_from(["productive-box", "--utc-offset", "-05:00"])
        .expect("parse should succeed");
    let offset = config.utc_offset().expect("valid offset");
    assert_eq!(offset.local_minus_utc(), -5 * 3600);
}

#[test]
fn test_invalid_utc_offset_flag() {
    let config = Config::try_parse_from(["productive-box", "--utc-offset", "Asia/Seoul"])
        .expect("parse should succeed");
    assert_eq!(
        config.utc_offset(),
        Err(ConfigError::InvalidUtcOffset("Asia/Seoul".to_string()))
    );
}

// ============================================================================
// Dry run
// ============================================================================

#[test]
fn test_dry_run_does_not_need_gist_id() {
    let config = Config {
        token: Some("ghp_abc".to_string()),
        ..Config::try_parse_from(["productive-box", "--dry-run"]).expect("parse should succeed")
    };
    assert!(config.dry_run);
    assert!(config.validate().is_ok());
}

#[test]
fn test_json_requires_dry_run() {
    let result = Config::try_parse_from(["productive-box", "--json"]);
    assert!(result.is_err(), "--json only applies to --dry-run");

    let config = Config::try_parse_from(["productive-box", "--dry-run", "--json"])
        .expect("parse should succeed");
    assert!(config.json);
}

#[test]
fn test_unknown_flag_is_rejected() {
    let result = Config::try_parse_from(["productive-box", "--publish-twice"]);
    assert!(result.is_err());
}
