//! # Cebra CLI
//!
//! Command-line interface for Zebra label printing.
//!
//! ## Usage
//!
//! ```bash
//! # List available labels
//! cebra print
//!
//! # Show the demo label's ZPL without printing
//! cebra print --dry-run demo
//!
//! # Print three copies on a GK420d
//! cebra print --profile gk420d --quantity 3 demo
//!
//! # Print a JSON label job
//! cebra print --job shipping.json --device /dev/usb/lp1
//!
//! # Which character sets does this firmware support?
//! cebra encodings --firmware V60.14.7ZA
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cebra::{
    CebraError, PrinterConfig, VersionGate, json_api, label, protocol::CHARACTER_SETS,
    transport::DeviceTransport,
};

/// Cebra - Zebra label printer utility
#[derive(Parser, Debug)]
#[command(name = "cebra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print debug information
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a label to the printer
    Print {
        /// Label template to print (omit to see available labels)
        label: Option<String>,

        /// Print a JSON label job instead of a template
        #[arg(long, value_name = "FILE", conflicts_with = "label")]
        job: Option<PathBuf>,

        /// Printer profile (tlp2844z, gk420d, zt410)
        #[arg(long)]
        profile: Option<String>,

        /// Firmware version, overrides the profile and the job
        #[arg(long, value_name = "VERSION")]
        firmware: Option<String>,

        /// Printer device path
        #[arg(long, default_value = cebra::transport::device::DEFAULT_DEVICE)]
        device: String,

        /// Number of labels to print
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Do not print the label, show the raw bytes instead
        #[arg(long)]
        dry_run: bool,
    },

    /// List ^CI character sets and whether the firmware supports them
    Encodings {
        /// Firmware version (defaults to the default profile's)
        #[arg(long, value_name = "VERSION")]
        firmware: Option<String>,
    },

    /// List built-in printer profiles
    Profiles,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CebraError> {
    match command {
        Commands::Print {
            label: label_name,
            job,
            profile,
            firmware,
            device,
            quantity,
            dry_run,
        } => {
            let config = resolve_profile(profile.as_deref())?;

            let mut job = match (label_name, job) {
                (_, Some(path)) => {
                    let json = std::fs::read_to_string(&path)?;
                    json_api::from_json(&json)?
                }
                (Some(name), None) => label::template(&name).ok_or_else(|| {
                    CebraError::InvalidValue {
                        command: "print",
                        reason: format!(
                            "Unknown label '{}'. Run without arguments to see available labels.",
                            name
                        ),
                    }
                })?,
                (None, None) => {
                    println!("Available labels:");
                    for name in label::list_labels() {
                        println!("  {}", name);
                    }
                    return Ok(());
                }
            };

            let firmware = firmware
                .or_else(|| job.firmware.clone())
                .unwrap_or_else(|| config.firmware.to_string());
            debug!(profile = config.id, %firmware, "building label");

            if quantity.is_some() {
                job.quantity = quantity;
            }
            let data = job.to_builder(&firmware)?.finalize();

            if dry_run {
                println!("{}", escape_bytes(&data));
            } else {
                let mut transport = DeviceTransport::open(&device)?;
                transport.write_all(&data)?;
                println!("Printed successfully!");
            }
        }

        Commands::Encodings { firmware } => {
            let firmware =
                firmware.unwrap_or_else(|| PrinterConfig::default().firmware.to_string());
            let gate = VersionGate::new(&firmware)?;

            println!("Character sets for firmware {}:", gate.firmware());
            for set in CHARACTER_SETS {
                let status = if gate.permits(set.restriction())? {
                    "yes"
                } else {
                    "no"
                };
                println!(
                    "  {:<10} ^CI{:<3} {:<4} ({})",
                    set.name,
                    set.code,
                    status,
                    set.restriction()
                );
            }
        }

        Commands::Profiles => {
            println!("Printer profiles:");
            for config in PrinterConfig::built_in() {
                println!(
                    "  {:<9} {:<22} {:<11} {} dpi, {} dots ({:.0}mm)",
                    config.id,
                    config.name,
                    config.firmware,
                    config.dpi,
                    config.width_dots,
                    config.width_mm()
                );
            }
        }
    }

    Ok(())
}

fn resolve_profile(name: Option<&str>) -> Result<PrinterConfig, CebraError> {
    match name {
        None => Ok(PrinterConfig::default()),
        Some(name) => PrinterConfig::by_name(name).ok_or_else(|| CebraError::InvalidValue {
            command: "print",
            reason: format!("Unknown printer profile '{}'", name),
        }),
    }
}

/// Printable form of raw label bytes, e.g. `^FDGr\x81\xe1e`.
fn escape_bytes(data: &[u8]) -> String {
    data.iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}
