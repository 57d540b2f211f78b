use cardform::application::pipeline::ValidationPipeline;
use cardform::application::replay::ScriptReplay;
use cardform::config::CheckoutConfig;
use cardform::domain::expiration::YearMonth;
use cardform::domain::field::Field;
use cardform::domain::ports::ClockBox;
use cardform::infrastructure::clock::{FixedClock, SystemClock};
use cardform::infrastructure::focus::RecordingFocus;
use cardform::interfaces::csv::report_writer::{OutputFormat, ReportWriter};
use cardform::interfaces::csv::script_reader::ScriptReader;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recorded edits CSV file (at_ms,field,text)
    script: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debounce interval in milliseconds, overrides the config file
    #[arg(long)]
    throttle_ms: Option<u64>,

    /// Validate the CVV on every keystroke instead of debouncing it
    #[arg(long)]
    no_cvv_throttle: bool,

    /// Month to check expiration dates against (YYYY-MM), defaults to today
    #[arg(long)]
    today: Option<YearMonth>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CheckoutConfig::load(path).into_diagnostic()?,
        None => CheckoutConfig::default(),
    };
    if let Some(interval_ms) = cli.throttle_ms {
        config.throttle.interval_ms = interval_ms;
    }
    if cli.no_cvv_throttle {
        config.throttle.throttle_cvv = false;
    }

    let clock: ClockBox = match cli.today {
        Some(month) => Box::new(FixedClock(month)),
        None => Box::new(SystemClock),
    };
    let pipeline = ValidationPipeline::new(
        Box::new(RecordingFocus::focused_on(Field::CardNumber)),
        clock,
    );
    let mut replay = ScriptReplay::new(pipeline, &config.throttle);

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), cli.format.into());

    let file = File::open(&cli.script).into_diagnostic()?;
    let reader = ScriptReader::new(file);
    for change in reader.changes() {
        match change {
            Ok(change) => writer.write_reports(replay.feed(change)).into_diagnostic()?,
            Err(e) => {
                eprintln!("Error reading edit: {}", e);
            }
        }
    }

    let (reports, outcome) = replay.finish();
    writer.write_reports(reports).into_diagnostic()?;
    writer.flush().into_diagnostic()?;

    info!(
        card_type = %outcome.card_type,
        purchase_enabled = outcome.purchase_enabled,
        "replay finished"
    );

    Ok(())
}
