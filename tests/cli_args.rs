// tests/cli_args.rs

use clap::Parser;
use joblaunch::cli::{CliArgs, Command, parse_raw_argument};
use joblaunch::descriptor::RawArgument;

#[test]
fn test_raw_argument_splits_at_first_separators() {
    assert_eq!(
        parse_raw_argument("count=integer:3").unwrap(),
        RawArgument::new("count", "3", "integer")
    );
    assert_eq!(
        parse_raw_argument("opts=hash:{a: 1, b=>2}").unwrap(),
        RawArgument::new("opts", "{a: 1, b=>2}", "hash")
    );
    assert_eq!(
        parse_raw_argument("name=string:").unwrap(),
        RawArgument::new("name", "", "string")
    );
}

#[test]
fn test_raw_argument_rejects_malformed_input() {
    assert!(parse_raw_argument("count").is_err());
    assert!(parse_raw_argument("count=3").is_err());
    assert!(parse_raw_argument("=integer:3").is_err());
}

#[test]
fn test_build_subcommand_collects_arguments() {
    let args = CliArgs::try_parse_from([
        "joblaunch",
        "--config",
        "conf/Joblaunch.toml",
        "build",
        "HomonymousJob",
        "--arg",
        "name=string:a",
        "--arg",
        "count=integer:2",
    ])
    .unwrap();

    assert_eq!(args.config, "conf/Joblaunch.toml");
    match args.command {
        Command::Build { name, args } => {
            assert_eq!(name, "HomonymousJob");
            assert_eq!(
                args,
                [
                    RawArgument::new("name", "a", "string"),
                    RawArgument::new("count", "2", "integer"),
                ]
            );
        }
        other => panic!("Expected Build, got: {:?}", other),
    }

    assert!(CliArgs::try_parse_from(["joblaunch", "build", "X", "--arg", "bad"]).is_err());
}
