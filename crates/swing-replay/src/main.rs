//! Swing replay binary.

use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

use swing_replay::logging::init_tracing;
use swing_replay::{JsonLinesSource, ReplayConfig, Replayer, SampleSource, SyntheticSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Synthetic {
    /// Lead-in stillness, then one clean swing
    Swing,
    /// Uniform noise for the whole session
    Noise,
}

/// Replay motion samples through the swing analyzer.
#[derive(Debug, Parser)]
#[command(name = "swing-replay", version, about)]
struct Cli {
    /// JSON-lines sample file, or `-` for stdin
    #[arg(value_name = "FILE", conflicts_with = "synthetic")]
    input: Option<PathBuf>,

    /// Generate samples instead of reading them
    #[arg(long, value_enum, value_name = "KIND")]
    synthetic: Option<Synthetic>,

    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Speed jitter amplitude in mph (0 disables)
    #[arg(long, value_name = "MPH")]
    jitter: Option<f64>,

    #[arg(long = "countdown-ms", value_name = "MS")]
    countdown_ms: Option<i64>,

    #[arg(long = "timeout-ms", value_name = "MS")]
    timeout_ms: Option<i64>,

    /// Print Prometheus metrics to stderr when done
    #[arg(long, action = clap::ArgAction::SetTrue)]
    metrics: bool,

    /// Print the resolved configuration as JSON and exit
    #[arg(long = "print-config", action = clap::ArgAction::SetTrue)]
    print_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> ReplayConfig {
        let mut config = ReplayConfig::from_env();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(amplitude) = self.jitter {
            config = config.with_jitter(amplitude);
        }
        if let Some(ms) = self.countdown_ms {
            config.session.countdown_ms = ms;
        }
        if let Some(ms) = self.timeout_ms {
            config.session.detection_timeout_ms = ms;
        }
        config
    }

    fn open_source(&self, config: &ReplayConfig) -> anyhow::Result<Box<dyn SampleSource>> {
        let interval = config.frame_interval_ms;
        let session = &config.session;

        let source: Box<dyn SampleSource> = match (&self.input, self.synthetic) {
            (_, Some(Synthetic::Swing)) => {
                let lead_in = (session.countdown_ms / interval) as usize + 30;
                Box::new(SyntheticSource::swing(config.seed, 0, interval, lead_in))
            }
            (_, Some(Synthetic::Noise)) => {
                let frames =
                    ((session.countdown_ms + session.detection_timeout_ms) / interval) as usize + 10;
                Box::new(SyntheticSource::noise(config.seed, 0, interval, frames))
            }
            (Some(path), None) if path.as_os_str() != "-" => Box::new(
                JsonLinesSource::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?,
            ),
            _ => Box::new(JsonLinesSource::new(BufReader::new(io::stdin()), "stdin")),
        };
        Ok(source)
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config();
    config.validate()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let metrics = if cli.metrics {
        Some(PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    let mut source = cli.open_source(&config)?;
    let stdout = io::stdout().lock();
    let summary = Replayer::new(&config, stdout)?.run(source.as_mut())?;

    info!(
        session_id = %summary.session_id,
        samples_read = summary.samples_read,
        samples_clamped = summary.samples_clamped,
        detected = summary.outcome.map(|o| o.is_detected()).unwrap_or(false),
        "Replay finished"
    );

    if let Some(handle) = metrics {
        eprint!("{}", handle.render());
    }
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Replay failed: {:#}", e);
        std::process::exit(1);
    }
}
