//! lpad: command-line front end for launchpad-core.

mod args;
mod config;
mod hex;
mod stdio;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use launchpad_core::config::port_matches;
use launchpad_core::duty_cycle::DutyCycleTable;
use launchpad_core::pattern;
use launchpad_core::{BufferUpdate, Launchpad};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::args::{Cli, Commands};
use crate::stdio::LineTransport;

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn print_json<S: Serialize>(value: &S) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let stdout = LineTransport::new(std::io::stdout());
    let mut launchpad = Launchpad::with_config(stdout, config::get_pacer_config());

    match cli.command {
        Commands::Pattern(args) => print_json(&pattern::decode_patterns(&args.patterns))?,
        Commands::Map(args) => print_json(&pattern::from_map(&args.map))?,
        Commands::Color(args) => println!("{}", args.color.to_color().code()),
        Commands::Paint(args) => {
            let coordinates = pattern::decode_patterns(&args.patterns);
            if coordinates.is_empty() {
                warn!("Patterns selected no buttons");
            }
            let color = args.color.to_color();
            let runtime = tokio::runtime::Runtime::new()?;
            let result = runtime.block_on(launchpad.fill(coordinates, color));
            info!(
                "Painted {} buttons ({} skipped) with colour byte {}",
                result.sent,
                result.skipped,
                color.code()
            );
        }
        Commands::Buffers(args) => {
            let mut update = BufferUpdate::new().copy_to_display(args.copy_to_display);
            update.write = args.write;
            update.display = args.display;
            update.flash = args.flash;
            launchpad.update_buffers(update);
        }
        Commands::Multiplex(args) => launchpad.set_multiplexing(args.numerator, args.denominator),
        Commands::Brightness(args) => launchpad.set_brightness(args.brightness),
        Commands::Reset(args) => launchpad.reset(args.brightness),
        Commands::DutyCycles => print_json(&DutyCycleTable::global().entries())?,
        Commands::Decode(args) => {
            let mut out = std::io::stdout();
            let count = stdio::decode_all(&mut launchpad, &args.messages, &mut out)?;
            if count < args.messages.len() {
                warn!(
                    "{} of {} messages were not key events",
                    args.messages.len() - count,
                    args.messages.len()
                );
            }
        }
        Commands::Monitor => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut out = std::io::stdout();
                let count = stdio::monitor(&mut launchpad, stdin, &mut out).await?;
                info!("Processed {} key events", count);
                anyhow::Ok(())
            })?;
        }
        Commands::Ports(args) => {
            let keyword = config::get_port_keyword();
            let mut out = std::io::stdout();
            for name in args.names.iter().filter(|n| port_matches(n, &keyword)) {
                writeln!(out, "{}", name)?;
            }
        }
        Commands::Examples => println!("{}", args::EXAMPLES_TEXT),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_continues_after_unrecognized_message() {
        let cli = Cli::parse_from(["lpad", "decode", "80 00 00", "90 23 7f"]);
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_decode_continues_after_bad_hex() {
        let cli = Cli::parse_from(["lpad", "decode", "not-hex", "b0 6a 00"]);
        assert!(run(cli).is_ok());
    }
}
