use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mediscore_core::constants::{ALERT_THRESHOLD_ENV, TRACK_DECREASES_ENV, TREND_WINDOW_ENV};
use mediscore_core::report::{render_table, trend_message};
use mediscore_core::{
    evaluate, CoreConfig, Observations, PatientName, TrendMonitor, TrendOutcome, TrendPolicy,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mediscore")]
#[command(about = "MediScore early-warning score CLI")]
struct Cli {
    /// Log scoring decisions at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single set of observations
    Score {
        #[command(flatten)]
        observations: ObservationArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Score observations and compare against an earlier final score
    Trend {
        #[command(flatten)]
        observations: ObservationArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Previous final MediScore
        #[arg(long)]
        previous: u32,
        /// How many hours ago the previous score was taken
        #[arg(long)]
        hours_ago: i64,
        /// Alert when the score changes by more than this many points
        /// [default: MEDISCORE_ALERT_THRESHOLD, or 2]
        #[arg(long)]
        threshold: Option<u32>,
        /// Only compare against previous scores taken within this many hours
        /// [default: MEDISCORE_TREND_WINDOW_HOURS, or 24]
        #[arg(long)]
        window_hours: Option<i64>,
    },
}

#[derive(Args)]
struct ObservationArgs {
    /// Air or oxygen code (0 = air, 2 = oxygen)
    #[arg(long)]
    air_or_oxygen: i64,
    /// Consciousness code (0 = alert, 1-3 = impaired)
    #[arg(long)]
    consciousness: i64,
    /// Respiration rate, breaths per minute
    #[arg(long)]
    respiration_rate: u32,
    /// Oxygen saturation, percent
    #[arg(long)]
    spo2: u8,
    /// Temperature, degrees Celsius
    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,
    /// Capillary blood glucose, mmol/L (optional)
    #[arg(long)]
    cbg: Option<f64>,
    /// The patient is fasting
    #[arg(long)]
    fasting: bool,
}

impl ObservationArgs {
    fn to_observations(&self) -> mediscore_core::ScoreResult<Observations> {
        Observations::from_codes(
            self.air_or_oxygen,
            self.consciousness,
            self.respiration_rate,
            self.spo2,
            self.temperature,
            self.cbg,
            self.fasting,
        )
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Patient name shown in the output
    #[arg(long, default_value = "Patient")]
    name: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    name: &'a str,
    observations: &'a Observations,
    breakdown: &'a mediscore_core::ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<T>,
}

fn emit<T: Serialize>(
    format: Format,
    report: &Report<'_, T>,
    table: impl FnOnce() -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Table => print!("{}", table()),
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(report)?),
    }
    Ok(())
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Apply `--threshold` and `--window-hours` on top of the configured trend policy.
fn resolve_policy(
    cfg: &CoreConfig,
    threshold: Option<u32>,
    window_hours: Option<i64>,
) -> CliResult<TrendPolicy> {
    let mut policy = cfg.trend_policy();
    if let Some(threshold) = threshold {
        policy.alert_threshold = threshold;
    }
    if let Some(hours) = window_hours {
        if hours <= 0 {
            return Err("--window-hours must be positive".into());
        }
        policy.window = Duration::try_hours(hours).ok_or("--window-hours is too large")?;
    }
    Ok(policy)
}

/// Classify `final_score` taken at `now` against `previous`, taken `hours_ago` hours earlier.
fn trend_outcome(
    previous: u32,
    hours_ago: i64,
    policy: TrendPolicy,
    final_score: u32,
    now: DateTime<Utc>,
) -> CliResult<TrendOutcome> {
    if hours_ago < 0 {
        return Err("--hours-ago cannot be negative".into());
    }
    let previous_at = Duration::try_hours(hours_ago)
        .and_then(|elapsed| now.checked_sub_signed(elapsed))
        .ok_or("--hours-ago is too large")?;

    let mut monitor = TrendMonitor::new(policy);
    monitor.record_evaluation(previous, previous_at)?;
    Ok(monitor.record_evaluation(final_score, now)?)
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Score {
            observations,
            output,
        }) => {
            let name = PatientName::new(&output.name)?;
            let observations = observations.to_observations()?;
            let breakdown = evaluate(&observations)?;

            let report = Report::<()> {
                name: name.as_str(),
                observations: &observations,
                breakdown: &breakdown,
                trend: None,
            };
            emit(output.format, &report, || {
                render_table(name.as_str(), &observations, &breakdown)
            })?;
        }
        Some(Commands::Trend {
            observations,
            output,
            previous,
            hours_ago,
            threshold,
            window_hours,
        }) => {
            let cfg = CoreConfig::from_env_values(
                std::env::var(TREND_WINDOW_ENV).ok(),
                std::env::var(ALERT_THRESHOLD_ENV).ok(),
                std::env::var(TRACK_DECREASES_ENV).ok(),
            )?;
            let policy = resolve_policy(&cfg, threshold, window_hours)?;

            let name = PatientName::new(&output.name)?;
            let observations = observations.to_observations()?;
            let breakdown = evaluate(&observations)?;

            let outcome = trend_outcome(
                previous,
                hours_ago,
                policy,
                breakdown.final_score(),
                Utc::now(),
            )?;

            let report = Report {
                name: name.as_str(),
                observations: &observations,
                breakdown: &breakdown,
                trend: Some(outcome),
            };
            emit(output.format, &report, || {
                format!(
                    "{}{}\n",
                    render_table(name.as_str(), &observations, &breakdown),
                    trend_message(name.as_str(), &outcome, &policy)
                )
            })?;
        }
        None => {
            println!("Use 'mediscore --help' for commands");
        }
    }

    Ok(())
}
