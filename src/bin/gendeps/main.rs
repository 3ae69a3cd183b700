//! gendeps - ABI-exact Julia definitions for the TAO C library

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use taodeps::util::diagnostic::{self, Diagnostic};
use taodeps::{Config, GenerateError};

mod cli;

fn main() -> ExitCode {
    let program = std::env::args_os()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "gendeps".to_string());

    let cli = match cli::parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("{}", cli::usage(&program));
            return ExitCode::FAILURE;
        }
    };
    if cli.help {
        eprintln!("{}", cli::usage(&program));
        return ExitCode::SUCCESS;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let color = std::io::stderr().is_terminal();
            match e.downcast_ref::<GenerateError>() {
                Some(GenerateError::Abi(abi)) => diagnostic::emit(&abi.to_diagnostic(), color),
                _ => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::builtin().context("invalid built-in configuration")?;

    // Set up logging; stdout carries the generated file.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = taodeps::generate(&config, &mut out)?;

    if !report.library_found {
        let warning = Diagnostic::warning(format!(
            "{} library not found at {}",
            config.library.name, config.library.path
        ))
        .with_context("the generated bindings load the library from this path")
        .with_suggestion("Rebuild gendeps with TAO_DLL set to the installed library");
        diagnostic::emit(&warning, std::io::stderr().is_terminal());
    }
    Ok(())
}
