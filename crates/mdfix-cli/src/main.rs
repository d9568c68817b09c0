mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{load_patch_sets, resolve_config_path, write_starter_fix_table, Args, Command};
use log::LevelFilter;
use mdfix_core::{run, FilePatchSet, PatchRule, RunOptions, Summary};
use std::path::PathBuf;
use std::process;

const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_CONFIG: i32 = 2;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let code = match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_CONFIG
        }
    };

    process::exit(code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn execute(args: &Args) -> Result<i32> {
    match args.command.clone().unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => {
            let patch_sets = load_patch_sets(&resolve_config_path(args))?;
            let summary = run_and_report(&patch_sets, dry_run);
            Ok(exit_code(&summary, false))
        }

        Command::Check => {
            let patch_sets = load_patch_sets(&resolve_config_path(args))?;
            let summary = run_and_report(&patch_sets, true);
            if summary.changed > 0 {
                println!("\n{} file(s) need fixing. Run 'mdfix run' to apply.", summary.changed);
            }
            Ok(exit_code(&summary, true))
        }

        Command::Replace {
            search,
            replace,
            files,
            regex,
            dry_run,
        } => {
            let rule = if regex {
                PatchRule::pattern(&search, replace)
            } else {
                PatchRule::literal(search, replace)
            }
            .context("Invalid rule")?;

            let patch_sets: Vec<_> = files
                .into_iter()
                .map(|f| FilePatchSet::new(f, vec![rule.clone()]))
                .collect();
            let summary = run_and_report(&patch_sets, dry_run);
            Ok(exit_code(&summary, false))
        }

        Command::Init { force } => {
            let path = args
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::LOCAL_CONFIG_NAME));
            write_starter_fix_table(&path, force)?;
            println!("Created fix table at {:?}", path);
            Ok(EXIT_OK)
        }
    }
}

/// 0 when clean, 1 when any entry errored. With `fail_on_change`, a file
/// that would change also yields 1.
fn exit_code(summary: &Summary, fail_on_change: bool) -> i32 {
    if summary.has_errors() || (fail_on_change && summary.changed > 0) {
        EXIT_FAILED
    } else {
        EXIT_OK
    }
}

fn run_and_report(patch_sets: &[FilePatchSet], dry_run: bool) -> Summary {
    if patch_sets.is_empty() {
        println!("No targets found in the fix table.");
    }

    let summary = run(patch_sets, RunOptions { dry_run }, |outcome| {
        println!("{}", outcome)
    });

    println!("\n{}", summary);
    summary
}
