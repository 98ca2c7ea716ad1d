//! Tests for CLI subcommand parsing.

use clap::Parser;
use flow_email_extractor::cli::{Cli, Command};
use flow_email_extractor::config::{LogFormat, LogLevel};
use std::path::PathBuf;

#[test]
fn test_cli_flows_command_defaults() {
    let args = ["flow_email_extractor", "flows"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse flows command");

    assert!(matches!(cli.command, Command::Flows));
    // LogLevel and LogFormat don't implement PartialEq, so we compare via conversion
    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::from(LogLevel::Info)
    );
    match cli.log_format {
        LogFormat::Plain => {}
        _ => panic!("Should be Plain format"),
    }
    assert_eq!(cli.max_concurrency, 4);
    assert_eq!(cli.timeout_seconds, 30);
    if std::env::var_os("KLAVIYO_API_BASE_URL").is_none() {
        assert_eq!(cli.base_url, "https://a.klaviyo.com/api");
    }
}

#[test]
fn test_cli_global_options_after_subcommand() {
    let args = [
        "flow_email_extractor",
        "export-all",
        "--api-key",
        "pk_cli",
        "--log-level",
        "debug",
        "--max-concurrency",
        "8",
        "--output",
        "out.tar.gz",
    ];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse export-all command");

    assert_eq!(cli.api_key.as_deref(), Some("pk_cli"));
    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::Debug
    );
    let config = cli.to_config();
    assert_eq!(config.api_key, "pk_cli");
    assert_eq!(config.max_concurrency, 8);
    match cli.command {
        Command::ExportAll { output } => assert_eq!(output, Some(PathBuf::from("out.tar.gz"))),
        _ => panic!("Should parse as ExportAll command"),
    }
}

#[test]
fn test_cli_extract_command() {
    let args = ["flow_email_extractor", "extract", "A1", "-o", "email.html", "--pretty"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse extract command");

    match cli.command {
        Command::Extract {
            action_id,
            output,
            pretty,
        } => {
            assert_eq!(action_id, "A1");
            assert_eq!(output, Some(PathBuf::from("email.html")));
            assert!(pretty);
        }
        _ => panic!("Should parse as Extract command"),
    }
}

#[test]
fn test_cli_analyze_requires_exactly_one_source() {
    let file_only = ["flow_email_extractor", "analyze", "--file", "t.html", "--json"];
    let cli = Cli::try_parse_from(file_only.iter()).expect("Should parse analyze --file");
    assert!(!cli.command.needs_api());
    match cli.command {
        Command::Analyze { source, json } => {
            assert_eq!(source.file, Some(PathBuf::from("t.html")));
            assert!(source.action.is_none());
            assert!(json);
        }
        _ => panic!("Should parse as Analyze command"),
    }

    let action = ["flow_email_extractor", "analyze", "--action", "A1"];
    let cli = Cli::try_parse_from(action.iter()).expect("Should parse analyze --action");
    assert!(cli.command.needs_api());

    let neither = ["flow_email_extractor", "analyze"];
    assert!(Cli::try_parse_from(neither.iter()).is_err());

    let both = ["flow_email_extractor", "analyze", "--action", "A1", "--file", "t.html"];
    assert!(Cli::try_parse_from(both.iter()).is_err());
}

#[test]
fn test_cli_report_requires_flow_ids() {
    let args = ["flow_email_extractor", "report", "F1", "F2"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse report command");
    match cli.command {
        Command::Report { flow_ids, output } => {
            assert_eq!(flow_ids, vec!["F1", "F2"]);
            assert!(output.is_none());
        }
        _ => panic!("Should parse as Report command"),
    }

    let missing = ["flow_email_extractor", "report"];
    assert!(Cli::try_parse_from(missing.iter()).is_err());
}

#[test]
fn test_cli_missing_subcommand_error() {
    let args = ["flow_email_extractor"];
    let result = Cli::try_parse_from(args.iter());

    assert!(result.is_err(), "Should fail when subcommand is missing");
}

#[test]
fn test_cli_invalid_subcommand_error() {
    let args = ["flow_email_extractor", "invalid"];
    let result = Cli::try_parse_from(args.iter());

    assert!(result.is_err(), "Should fail when subcommand is invalid");
    let error_msg = result.unwrap_err().to_string();
    assert!(
        error_msg.contains("invalid") || error_msg.contains("unrecognized"),
        "Error message should mention invalid subcommand: {}",
        error_msg
    );
}

#[test]
fn test_cli_invalid_log_level() {
    let args = ["flow_email_extractor", "flows", "--log-level", "loud"];
    assert!(Cli::try_parse_from(args.iter()).is_err());
}
