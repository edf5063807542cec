//! Integration tests for command-line handling
//!
//! These tests verify:
//! - `-v` lowers verbosity wherever it appears
//! - `-h`/`--help` requests usage wherever they appear
//! - Unknown flags and stray values are ignored

use clap::error::ErrorKind;
use csgo_patcher::{Cli, PatcherSettings};

fn parse(args: &[&str]) -> Cli {
    Cli::try_from_args(args.iter().copied()).unwrap()
}

fn is_help_request(args: &[&str]) -> bool {
    matches!(
        Cli::try_from_args(args.iter().copied()),
        Err(err) if err.kind() == ErrorKind::DisplayHelp
    )
}

#[test]
fn test_no_arguments_keeps_verbose_output() {
    let cli = parse(&["csgo-patcher"]);

    assert!(!cli.quiet);
    assert!(PatcherSettings::default().console_verbose(cli.quiet));
}

#[test]
fn test_quiet_flag_lowers_verbosity() {
    let cli = parse(&["csgo-patcher", "-v"]);

    assert!(cli.quiet);
    assert!(!PatcherSettings::default().console_verbose(cli.quiet));
}

#[test]
fn test_quiet_flag_after_unknown_flag() {
    assert!(parse(&["csgo-patcher", "--bogus", "-v"]).quiet);
}

#[test]
fn test_quiet_flag_after_stray_value() {
    assert!(parse(&["csgo-patcher", "extra", "-v"]).quiet);
}

#[test]
fn test_repeated_quiet_flag() {
    assert!(parse(&["csgo-patcher", "-v", "-v"]).quiet);
}

#[test]
fn test_unknown_arguments_alone_are_ignored() {
    let cli = parse(&["csgo-patcher", "--bogus", "-x", "value", "--verbose"]);

    assert!(!cli.quiet);
}

#[test]
fn test_help_flags_request_usage() {
    assert!(is_help_request(&["csgo-patcher", "-h"]));
    assert!(is_help_request(&["csgo-patcher", "--help"]));
}

#[test]
fn test_help_after_unknown_arguments() {
    assert!(is_help_request(&["csgo-patcher", "--bogus", "-h"]));
    assert!(is_help_request(&["csgo-patcher", "foo", "--help"]));
    assert!(is_help_request(&["csgo-patcher", "-v", "--bogus", "--help"]));
}

#[test]
fn test_help_text_describes_quiet_flag() {
    let err = Cli::try_from_args(["csgo-patcher", "--help"]).unwrap_err();
    let help = err.to_string();

    assert!(help.contains("-v"));
    assert!(help.contains("Decreases verbosity"));
}
