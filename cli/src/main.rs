// pulselink — Relay demo binary
//
// Runs both halves of the wrist/handheld pair in one process over the
// loopback transport, printing what each side would show on its screen.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pulselink_core::relay::{AlertSink, ValueObserver};
use pulselink_core::sensor::SensorConfig;
use pulselink_core::service::RelayService;
use pulselink_core::transport::LoopbackNetwork;
use pulselink_core::MessageChannel;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pulselink")]
#[command(about = "PulseLink — wrist/handheld heart-rate relay", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both device roles in-process and print the relay traffic
    Demo {
        /// How long to run, in seconds
        #[arg(short, long, default_value = "20")]
        seconds: u64,
        /// Milliseconds between sensor samples
        #[arg(short, long, default_value = "2000")]
        interval_ms: u64,
    },
}

/// Stands in for the handheld's on-screen heart-rate readout.
struct StdoutDisplay;

impl ValueObserver for StdoutDisplay {
    fn on_value_changed(&self, value: u32) {
        println!("[handheld] heart rate: {value}");
    }
}

/// Stands in for the wrist's warning notification.
struct StdoutAlert;

impl AlertSink for StdoutAlert {
    fn raise_alert(&self) {
        println!("[wrist] !! heart rate warning received !!");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            seconds,
            interval_ms,
        } => run_demo(seconds, interval_ms).await,
    }
}

async fn run_demo(seconds: u64, interval_ms: u64) -> Result<()> {
    let network = LoopbackNetwork::new();
    let watch = network.endpoint("watch-node", "Watch", true);
    let phone = network.endpoint("phone-node", "Phone", true);

    let wrist = RelayService::wrist(
        MessageChannel::new(watch),
        Arc::new(StdoutAlert),
        SensorConfig {
            interval_ms,
            ..Default::default()
        },
    )?;
    let handheld = RelayService::handheld(MessageChannel::new(phone));

    if let Some(relay) = handheld.handheld_relay() {
        relay.set_observer(Arc::new(StdoutDisplay));
    }

    handheld.start()?;
    wrist.start()?;
    println!("demo running for {seconds}s (sample every {interval_ms}ms), Ctrl-C to quit early");

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(seconds)) => {}
        _ = tokio::signal::ctrl_c() => {
            println!("\ninterrupted");
        }
    }

    wrist.stop()?;
    handheld.stop()?;
    println!("demo finished");
    Ok(())
}
