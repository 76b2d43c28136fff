//! Sensor gauge dashboard: three animated gauges driven by random readings.

use clap::Parser;
use sensor_gauges::{Dashboard, DashboardConfig, GaugeConfig, RandomSensorFeed};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sensor-gauges")]
#[command(about = "Animated temperature, humidity and CO gauges")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Interval between sensor readings in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    interval_ms: u64,

    /// Needle transition length in milliseconds
    #[arg(long, default_value_t = 500)]
    duration_ms: u64,

    /// Frame-rate cap
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// TrueType/OpenType font for tick labels and readouts
    #[arg(long)]
    font: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("failed to initialise logging: {err}");
    }

    if let Err(err) = run(cli) {
        error!(error = %err, "dashboard failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> sensor_gauges::Result<()> {
    let config = DashboardConfig::builder()
        .update_interval(Duration::from_millis(cli.interval_ms))
        .animation_duration(Duration::from_millis(cli.duration_ms))
        .max_framerate(cli.fps)
        .maybe_font_path(cli.font)
        .build();

    Dashboard::new(config, GaugeConfig::defaults(), RandomSensorFeed::new())?.show()
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
