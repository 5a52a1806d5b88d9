use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use semaphore_problems::cli::Cli;
use semaphore_problems::scenario;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                std::thread::current().name().unwrap_or("main"),
                record.args()
            )
        })
        .try_init()
        .context("Failed to setup logging")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let outcome = scenario::run(cli.problem, &cli.config())
        .with_context(|| format!("Problem {} failed", cli.problem))?;
    info!("Finished {}", cli.problem);
    println!("{outcome}");
    Ok(())
}
