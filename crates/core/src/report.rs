//! Human-readable rendering of a score breakdown.
//!
//! Everything here is a pure function of its arguments. Comment bands are kept apart from the
//! scoring tables in [`crate::rules`] because they do not always share boundaries.

use crate::breakdown::{Parameter, ScoreBreakdown};
use crate::observations::Observations;
use crate::trend::{Direction, TrendOutcome, TrendPolicy};
use mediscore_types::{Consciousness, RespiratorySupport};
use std::fmt::Write as _;

const SEPARATOR: &str = "+-------------------+-------------+-------+-----------------------------------------------------------------------------+";

const NORMAL_EITHER: &str = "This is a normal range for patients breathing either air or oxygen.";
const SLIGHTLY_LOW_EITHER: &str =
    "This is a slightly low range for patients breathing either air or oxygen.";
const LOW_EITHER: &str = "This is a low range for patients breathing either air or oxygen.";

const SPO2_ON_AIR_COMMENTS: &[(f64, &str)] = &[
    (94.0, "As the patient is breathing air, this is a normal range."),
    (88.0, NORMAL_EITHER),
    (86.0, SLIGHTLY_LOW_EITHER),
    (84.0, LOW_EITHER),
];

const SPO2_ON_OXYGEN_COMMENTS: &[(f64, &str)] = &[
    (97.0, "As the patient is breathing oxygen, this is very elevated."),
    (95.0, "As the patient is breathing oxygen, this is elevated."),
    (93.0, "As the patient is breathing oxygen, this is slightly elevated."),
    (88.0, NORMAL_EITHER),
    (86.0, SLIGHTLY_LOW_EITHER),
    (84.0, LOW_EITHER),
];

const CBG_FASTING_COMMENTS: &[(f64, &str)] = &[
    (6.0, "The patient is fasting and their blood sugar is high."),
    (5.5, "The patient is fasting and their blood sugar is slightly high."),
    (4.0, "The patient is fasting and their blood sugar is normal."),
    (3.5, "The patient is fasting and their blood sugar is slightly low."),
];

const CBG_NOT_FASTING_COMMENTS: &[(f64, &str)] = &[
    (9.0, "The patient isn't fasting so their blood sugar is high."),
    (7.9, "The patient isn't fasting so their blood sugar is slightly high."),
    (5.9, "The patient isn't fasting so their blood sugar is normal."),
    (4.5, "The patient isn't fasting so their blood sugar is slightly low."),
];

fn banded(bands: &[(f64, &'static str)], below: &'static str, value: f64) -> &'static str {
    bands
        .iter()
        .find(|(from, _)| value >= *from)
        .map_or(below, |&(_, comment)| comment)
}

pub fn respiratory_support_comment(support: RespiratorySupport) -> &'static str {
    match support {
        RespiratorySupport::Air => {
            "The patient is breathing air, and does not require supplementary oxygen."
        }
        RespiratorySupport::Oxygen => "The patient requires supplementary oxygen.",
    }
}

pub fn consciousness_comment(consciousness: Consciousness) -> &'static str {
    match consciousness {
        Consciousness::Alert => "The patient is conscious.",
        Consciousness::Impaired(_) => "The patient is unconscious or confused.",
    }
}

pub fn spo2_comment(support: RespiratorySupport, spo2: u8) -> &'static str {
    let spo2 = f64::from(spo2);
    match support {
        RespiratorySupport::Air => banded(
            SPO2_ON_AIR_COMMENTS,
            "The patient's oxygen saturation is dangerously low.",
            spo2,
        ),
        RespiratorySupport::Oxygen => banded(
            SPO2_ON_OXYGEN_COMMENTS,
            "This is a very low range for patients breathing either air or oxygen.",
            spo2,
        ),
    }
}

pub fn blood_glucose_comment(fasting: bool, cbg: f64) -> &'static str {
    if fasting {
        banded(
            CBG_FASTING_COMMENTS,
            "The patient is fasting and their blood sugar is low.",
            cbg,
        )
    } else {
        banded(
            CBG_NOT_FASTING_COMMENTS,
            "The patient isn't fasting so their blood sugar is low.",
            cbg,
        )
    }
}

fn observed_value(parameter: Parameter, observations: &Observations) -> String {
    match parameter {
        Parameter::AirOrOxygen => observations.respiratory_support().to_string(),
        Parameter::Consciousness => match observations.consciousness() {
            Consciousness::Alert => "alert".to_string(),
            Consciousness::Impaired(level) => format!("impaired {}", level.level()),
        },
        Parameter::RespirationRate => observations.respiration_rate().to_string(),
        Parameter::Spo2 => observations.oxygen_saturation().to_string(),
        Parameter::Temperature => format!("{:.1}", observations.temperature()),
        Parameter::BloodGlucose => observations
            .blood_glucose()
            .map(|cbg| format!("{:.1}", cbg.mmol_per_l()))
            .unwrap_or_default(),
    }
}

fn comment(parameter: Parameter, observations: &Observations) -> &'static str {
    match parameter {
        Parameter::AirOrOxygen => respiratory_support_comment(observations.respiratory_support()),
        Parameter::Consciousness => consciousness_comment(observations.consciousness()),
        Parameter::Spo2 => spo2_comment(
            observations.respiratory_support(),
            observations.oxygen_saturation(),
        ),
        Parameter::BloodGlucose => observations
            .blood_glucose()
            .map_or("", |cbg| blood_glucose_comment(cbg.fasting(), cbg.mmol_per_l())),
        Parameter::RespirationRate | Parameter::Temperature => "",
    }
}

fn push_row(out: &mut String, property: &str, observation: &str, score: &str, comment: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "| {property:<17} | {observation:<11} | {score:<5} | {comment:<75} |"
    );
}

/// Render a bordered table of every scored parameter followed by the final score.
pub fn render_table(
    name: &str,
    observations: &Observations,
    breakdown: &ScoreBreakdown,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {name}");
    out.push_str(SEPARATOR);
    out.push('\n');
    push_row(&mut out, "Property", "Observation", "Score", "Comment");
    out.push_str(SEPARATOR);
    out.push('\n');

    for (parameter, points) in breakdown.iter() {
        push_row(
            &mut out,
            parameter.property(),
            &observed_value(parameter, observations),
            &points.to_string(),
            comment(parameter, observations),
        );
        out.push_str(SEPARATOR);
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "The patient's final Medi score is {}.",
        breakdown.final_score()
    );
    out
}

/// One line describing a trend outcome.
pub fn trend_message(name: &str, outcome: &TrendOutcome, policy: &TrendPolicy) -> String {
    let hours = policy.window.num_hours();
    match outcome {
        TrendOutcome::NoPriorScore => format!("{name} has no previous score to compare with."),
        TrendOutcome::StalePriorScore => {
            format!("{name}: previous MediScore was taken more than {hours} hours ago.")
        }
        TrendOutcome::Alert {
            direction: Direction::Increase,
            delta,
        } => format!(
            "ALERT!!!! {name} MediScore has risen by {delta} points in the last {hours} hours."
        ),
        TrendOutcome::Alert {
            direction: Direction::Decrease,
            delta,
        } => format!(
            "ALERT!!!! {name} MediScore has fallen by {} points in the last {hours} hours.",
            delta.abs()
        ),
        TrendOutcome::NoSignificantChange { .. } => format!(
            "{name} MediScore has not changed by more than {} points in the last {hours} hours.",
            policy.alert_threshold
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::evaluate;
    use crate::observations::BloodGlucose;

    #[test]
    fn spo2_comment_bands_differ_from_scoring() {
        // 93% on air scores 0 but is below the "normal on air" comment band.
        assert_eq!(spo2_comment(RespiratorySupport::Air, 93), NORMAL_EITHER);
        assert_eq!(
            spo2_comment(RespiratorySupport::Air, 94),
            "As the patient is breathing air, this is a normal range."
        );
        assert_eq!(
            spo2_comment(RespiratorySupport::Air, 83),
            "The patient's oxygen saturation is dangerously low."
        );
        assert_eq!(
            spo2_comment(RespiratorySupport::Oxygen, 95),
            "As the patient is breathing oxygen, this is elevated."
        );
        assert_eq!(spo2_comment(RespiratorySupport::Oxygen, 86), SLIGHTLY_LOW_EITHER);
    }

    #[test]
    fn blood_glucose_comments() {
        assert_eq!(
            blood_glucose_comment(true, 3.9),
            "The patient is fasting and their blood sugar is slightly low."
        );
        assert_eq!(
            blood_glucose_comment(true, 3.4),
            "The patient is fasting and their blood sugar is low."
        );
        assert_eq!(
            blood_glucose_comment(false, 7.8),
            "The patient isn't fasting so their blood sugar is normal."
        );
        assert_eq!(
            blood_glucose_comment(false, 9.0),
            "The patient isn't fasting so their blood sugar is high."
        );
    }

    #[test]
    fn renders_table_with_all_scored_rows() {
        let obs = Observations::new(
            RespiratorySupport::Air,
            Consciousness::Alert,
            20,
            95,
            37.15638,
            Some(BloodGlucose::new(7.0, true).expect("valid glucose")),
        )
        .expect("valid observations");
        let breakdown = evaluate(&obs).expect("evaluate");

        let table = render_table("Patient 1", &obs, &breakdown);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Name: Patient 1");
        assert_eq!(lines[1], SEPARATOR);
        assert!(lines[2].starts_with("| Property          | Observation | Score | Comment"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("| Temperature       | 37.2        | 0     |")));
        assert!(lines.iter().any(|l| l.starts_with("| CBG               | 7.0         | 3     |")
            && l.contains("fasting and their blood sugar is high")));
        assert_eq!(
            lines.last().copied(),
            Some("The patient's final Medi score is 3.")
        );
        // Header, six parameter rows, each followed by a separator.
        assert_eq!(lines.len(), 1 + 3 + 6 * 2 + 1);
        assert!(lines[2..lines.len() - 1]
            .iter()
            .all(|l| l.len() == SEPARATOR.len()));
    }

    #[test]
    fn omits_cbg_row_without_reading() {
        let obs = Observations::new(
            RespiratorySupport::Oxygen,
            Consciousness::Alert,
            15,
            95,
            37.0,
            None,
        )
        .expect("valid observations");
        let breakdown = evaluate(&obs).expect("evaluate");
        let table = render_table("Patient 2", &obs, &breakdown);
        assert!(!table.contains("| CBG"));
        assert!(table.contains("| Air or Oxygen     | oxygen      | 2     |"));
    }

    #[test]
    fn trend_messages() {
        let policy = TrendPolicy::default();
        assert_eq!(
            trend_message("Patient 1", &TrendOutcome::NoPriorScore, &policy),
            "Patient 1 has no previous score to compare with."
        );
        assert_eq!(
            trend_message("Patient 1", &TrendOutcome::StalePriorScore, &policy),
            "Patient 1: previous MediScore was taken more than 24 hours ago."
        );
        assert_eq!(
            trend_message(
                "Patient 1",
                &TrendOutcome::Alert {
                    direction: Direction::Increase,
                    delta: 9
                },
                &policy
            ),
            "ALERT!!!! Patient 1 MediScore has risen by 9 points in the last 24 hours."
        );
        assert_eq!(
            trend_message(
                "Patient 1",
                &TrendOutcome::Alert {
                    direction: Direction::Decrease,
                    delta: -4
                },
                &policy
            ),
            "ALERT!!!! Patient 1 MediScore has fallen by 4 points in the last 24 hours."
        );
        assert_eq!(
            trend_message(
                "Patient 1",
                &TrendOutcome::NoSignificantChange { delta: 1 },
                &policy
            ),
            "Patient 1 MediScore has not changed by more than 2 points in the last 24 hours."
        );
    }
}
