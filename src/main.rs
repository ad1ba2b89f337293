use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediscore_core::constants::{ALERT_THRESHOLD_ENV, TRACK_DECREASES_ENV, TREND_WINDOW_ENV};
use mediscore_core::report::{render_table, trend_message};
use mediscore_core::{CoreConfig, Observations, Patient};

/// Entry point for the MediScore demo run
///
/// Scores three patients on a morning round, updates the first patient's observations on an
/// afternoon round four hours later, and scores all three again. Each evaluation prints the
/// score table followed by the trend message.
///
/// # Environment Variables
/// - `MEDISCORE_TREND_WINDOW_HOURS`: comparison window in hours (default: 24)
/// - `MEDISCORE_ALERT_THRESHOLD`: change that must be exceeded to alert (default: 2)
/// - `MEDISCORE_TRACK_DECREASES`: alert on falling scores too (default: true)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediscore=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var(TREND_WINDOW_ENV).ok(),
        std::env::var(ALERT_THRESHOLD_ENV).ok(),
        std::env::var(TRACK_DECREASES_ENV).ok(),
    )?);

    tracing::info!(
        window_hours = cfg.trend_window().num_hours(),
        alert_threshold = cfg.alert_threshold(),
        "++ Starting MediScore demo"
    );

    for block in run_demo(cfg, Utc::now())? {
        println!("{block}");
    }

    Ok(())
}

/// Run the ward-round scenario and return each printed block in order.
fn run_demo(cfg: Arc<CoreConfig>, morning: DateTime<Utc>) -> anyhow::Result<Vec<String>> {
    let mut patients = vec![
        Patient::new(
            cfg.clone(),
            "Patient 1",
            Observations::from_codes(2, 0, 20, 95, 37.15638, Some(7.0), true)?,
            morning,
        )?,
        Patient::new(
            cfg.clone(),
            "Patient 2",
            Observations::from_codes(0, 2, 17, 80, 37.15638, Some(9.0), true)?,
            morning,
        )?,
        Patient::new(
            cfg.clone(),
            "Patient 3",
            Observations::from_codes(2, 1, 23, 88, 38.54, Some(6.0), true)?,
            morning,
        )?,
    ];

    let mut output = Vec::new();
    evaluate_all(&mut patients, &cfg, &mut output)?;

    let afternoon = morning + Duration::hours(4);
    patients[0].update(
        Observations::from_codes(0, 3, 30, 70, 33.15638, Some(3.9), false)?,
        afternoon,
    )?;

    evaluate_all(&mut patients, &cfg, &mut output)?;
    Ok(output)
}

fn evaluate_all(
    patients: &mut [Patient],
    cfg: &CoreConfig,
    output: &mut Vec<String>,
) -> anyhow::Result<()> {
    let policy = cfg.trend_policy();
    for patient in patients.iter_mut() {
        let evaluation = patient.evaluate()?;
        let name = patient.name().as_str();
        output.push(format!(
            "\n{}{}",
            render_table(name, patient.observations(), &evaluation.breakdown),
            trend_message(name, &evaluation.trend, &policy)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn demo_alerts_only_for_updated_patient() {
        let morning = Utc.with_ymd_and_hms(2024, 2, 21, 8, 0, 0).unwrap();
        let blocks = run_demo(Arc::new(CoreConfig::default()), morning).expect("demo runs");

        assert_eq!(blocks.len(), 6);
        for block in &blocks[..3] {
            assert!(block.contains("has no previous score to compare with."));
        }
        assert!(blocks[3].contains("ALERT!!!! Patient 1 MediScore has risen"));
        assert!(blocks[4].contains("Patient 2 MediScore has not changed by more than 2 points"));
        assert!(blocks[5].contains("Patient 3 MediScore has not changed by more than 2 points"));
    }

    #[test]
    fn demo_scores_match_ward_round() {
        let morning = Utc.with_ymd_and_hms(2024, 2, 21, 8, 0, 0).unwrap();
        let blocks = run_demo(Arc::new(CoreConfig::default()), morning).expect("demo runs");

        assert!(blocks[0].contains("The patient's final Medi score is 6."));
        assert!(blocks[1].contains("The patient's final Medi score is 9."));
        assert!(blocks[2].contains("The patient's final Medi score is 13."));
        assert!(blocks[3].contains("The patient's final Medi score is 15."));
    }
}
