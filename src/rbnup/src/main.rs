// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;
mod logging;
mod uplink;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use rbnup_core::{ChannelPlan, SpotEncoder, StationIdentity};

use config::UplinkConfig;
use logging::init_logging;
use uplink::run_uplink;

const PKG_DESCRIPTION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " - FT8 decode log to RBN Aggregator uplink"
);

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"), about = PKG_DESCRIPTION)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// Broadcast IP address to send datagrams to
    #[arg(value_name = "BROADCAST_ADDR", required_unless_present = "print_config")]
    broadcast_addr: Option<IpAddr>,
    /// Broadcast UDP port
    #[arg(value_name = "BROADCAST_PORT", required_unless_present = "print_config")]
    broadcast_port: Option<u16>,
    /// Path to the receiver's decode log
    #[arg(value_name = "DECODE_FILE", required_unless_present = "print_config")]
    decode_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", UplinkConfig::example_toml());
        return;
    }

    let (cfg, cfg_path) = match UplinkConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    init_logging(cfg.log_level.as_deref());

    // clap enforces the positionals whenever --print-config is absent
    let (Some(addr), Some(port), Some(decode_file)) =
        (cli.broadcast_addr, cli.broadcast_port, cli.decode_file)
    else {
        eprintln!("Missing broadcast address, port or decode file");
        std::process::exit(2);
    };
    let target = SocketAddr::new(addr, port);

    if let Some(path) = &cfg_path {
        info!("Loaded configuration from {}", path.display());
    }
    info!(
        "Uplinking {} to {} as '{}'",
        decode_file.display(),
        target,
        cfg.software_id
    );

    let identity = StationIdentity {
        software_id: cfg.software_id,
        operator_callsign: cfg.operator_callsign,
        operator_grid: cfg.operator_grid,
    };
    let plan = ChannelPlan::with_extra_bases(&cfg.extra_channels_hz);
    let encoder = SpotEncoder::new(plan, identity);

    match run_uplink(
        target,
        &decode_file,
        encoder,
        Duration::from_millis(cfg.status_pacing_ms),
    )
    .await
    {
        Ok(stats) => {
            info!(
                "Uplink done: lines={}, decodes={}, status={}, skipped={}, bytes={}",
                stats.lines, stats.decodes_sent, stats.status_sent, stats.skipped, stats.bytes_sent
            );
        }
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
