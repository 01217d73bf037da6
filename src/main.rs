#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use gix_workflow::Session;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

mod options;

use options::Args;

/// The environment variable holding a full `tracing` filter directive.
const LOG_ENV: &str = "GIX_GUARD_LOG";

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            err.print().ok();
            return code;
        }
    };
    init_tracing(args.verbose);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match std::panic::catch_unwind(|| run(&args)) {
        Ok(Ok(code)) => code,
        Ok(Err(err)) => {
            tracing::debug!(error = ?err, "validation aborted");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let session = Session::open(&args.repo_path)?.with_strict(args.strict);
    let mut out = io::stdout().lock();
    let code = match args.request() {
        Some(request) => {
            let report = session.check(&request)?;
            report.render(&mut out)?;
            report.exit_code()
        }
        None => {
            let status = session.status();
            status.render(&mut out)?;
            status.exit_code()
        }
    };
    out.flush()?;
    Ok(if code == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
