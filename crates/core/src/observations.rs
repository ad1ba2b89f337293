//! The vital-sign record scored by MediScore.
//!
//! An `Observations` value can only be obtained through [`Observations::new`] (or
//! [`Observations::from_codes`], or deserialisation, which both route through it), so every
//! instance has already passed the physiological bound checks and had its real-valued readings
//! rounded to one decimal place.

use crate::validation::{
    round_to_one_decimal, validate_blood_glucose, validate_spo2, validate_temperature,
};
use crate::ScoreResult;
use mediscore_types::{Consciousness, RespiratorySupport};
use serde::{Deserialize, Serialize};

/// Capillary blood glucose reading together with the fasting state it was taken in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BloodGlucose {
    mmol_per_l: f64,
    fasting: bool,
}

impl BloodGlucose {
    /// Rounds `mmol_per_l` to one decimal place and checks it is within bounds.
    pub fn new(mmol_per_l: f64, fasting: bool) -> ScoreResult<Self> {
        let mmol_per_l = validate_blood_glucose(round_to_one_decimal(mmol_per_l))?;
        Ok(Self {
            mmol_per_l,
            fasting,
        })
    }

    pub fn mmol_per_l(&self) -> f64 {
        self.mmol_per_l
    }

    pub fn fasting(&self) -> bool {
        self.fasting
    }
}

/// A full set of observations for one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservationsWire")]
pub struct Observations {
    respiratory_support: RespiratorySupport,
    consciousness: Consciousness,
    respiration_rate: u32,
    oxygen_saturation: u8,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    blood_glucose: Option<BloodGlucose>,
}

impl Observations {
    /// Create a validated record.
    ///
    /// `temperature` is rounded to one decimal place before the bound check; the rounded value
    /// is what gets stored and scored.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::InvalidObservation` naming the first field that is out of bounds.
    pub fn new(
        respiratory_support: RespiratorySupport,
        consciousness: Consciousness,
        respiration_rate: u32,
        oxygen_saturation: u8,
        temperature: f64,
        blood_glucose: Option<BloodGlucose>,
    ) -> ScoreResult<Self> {
        let oxygen_saturation = validate_spo2(oxygen_saturation)?;
        let temperature = validate_temperature(round_to_one_decimal(temperature))?;

        Ok(Self {
            respiratory_support,
            consciousness,
            respiration_rate,
            oxygen_saturation,
            temperature,
            blood_glucose,
        })
    }

    /// Create a record from bedside chart codes.
    ///
    /// `air_or_oxygen` uses `0`/`2` and `consciousness` uses `0..=3`; see
    /// [`RespiratorySupport`] and [`Consciousness`].
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::InvalidMode` for an unknown code and
    /// `ScoreError::InvalidObservation` for an out-of-bounds reading.
    #[allow(clippy::too_many_arguments)]
    pub fn from_codes(
        air_or_oxygen: i64,
        consciousness: i64,
        respiration_rate: u32,
        oxygen_saturation: u8,
        temperature: f64,
        cbg: Option<f64>,
        fasting: bool,
    ) -> ScoreResult<Self> {
        let respiratory_support = RespiratorySupport::try_from(air_or_oxygen)?;
        let consciousness = Consciousness::try_from(consciousness)?;
        let blood_glucose = cbg
            .map(|value| BloodGlucose::new(value, fasting))
            .transpose()?;

        Self::new(
            respiratory_support,
            consciousness,
            respiration_rate,
            oxygen_saturation,
            temperature,
            blood_glucose,
        )
    }

    /// Re-check the stored values against the physiological bounds.
    pub fn validate(&self) -> ScoreResult<()> {
        validate_spo2(self.oxygen_saturation)?;
        validate_temperature(self.temperature)?;
        if let Some(cbg) = &self.blood_glucose {
            validate_blood_glucose(cbg.mmol_per_l)?;
        }
        Ok(())
    }

    pub fn respiratory_support(&self) -> RespiratorySupport {
        self.respiratory_support
    }

    pub fn consciousness(&self) -> Consciousness {
        self.consciousness
    }

    pub fn respiration_rate(&self) -> u32 {
        self.respiration_rate
    }

    pub fn oxygen_saturation(&self) -> u8 {
        self.oxygen_saturation
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn blood_glucose(&self) -> Option<BloodGlucose> {
        self.blood_glucose
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BloodGlucoseWire {
    mmol_per_l: f64,
    #[serde(default)]
    fasting: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ObservationsWire {
    respiratory_support: RespiratorySupport,
    consciousness: Consciousness,
    respiration_rate: u32,
    oxygen_saturation: u8,
    temperature: f64,
    #[serde(default)]
    blood_glucose: Option<BloodGlucoseWire>,
}

impl TryFrom<ObservationsWire> for Observations {
    type Error = crate::ScoreError;

    fn try_from(wire: ObservationsWire) -> Result<Self, Self::Error> {
        let blood_glucose = wire
            .blood_glucose
            .map(|cbg| BloodGlucose::new(cbg.mmol_per_l, cbg.fasting))
            .transpose()?;

        Observations::new(
            wire.respiratory_support,
            wire.consciousness,
            wire.respiration_rate,
            wire.oxygen_saturation,
            wire.temperature,
            blood_glucose,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScoreError;
    use mediscore_types::ImpairmentLevel;

    #[test]
    fn temperature_is_rounded_once_on_construction() {
        let obs = Observations::new(
            RespiratorySupport::Air,
            Consciousness::Alert,
            15,
            95,
            37.16,
            None,
        )
        .expect("valid observations");
        assert_eq!(obs.temperature(), 37.2);
    }

    #[test]
    fn blood_glucose_is_rounded_once_on_construction() {
        let cbg = BloodGlucose::new(5.449, true).expect("valid glucose");
        assert_eq!(cbg.mmol_per_l(), 5.4);
        assert!(cbg.fasting());
    }

    #[test]
    fn rejects_out_of_range_spo2() {
        let err = Observations::new(
            RespiratorySupport::Air,
            Consciousness::Alert,
            15,
            101,
            37.0,
            None,
        )
        .expect_err("spo2 101 is invalid");
        assert!(matches!(
            err,
            ScoreError::InvalidObservation {
                field: "oxygen_saturation",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_temperature() {
        let err = Observations::new(
            RespiratorySupport::Air,
            Consciousness::Alert,
            15,
            95,
            -1.0,
            None,
        )
        .expect_err("negative temperature is invalid");
        assert!(matches!(
            err,
            ScoreError::InvalidObservation {
                field: "temperature",
                ..
            }
        ));
    }

    #[test]
    fn temperature_bound_is_checked_after_rounding() {
        // 45.04 rounds to 45.0, which is in range.
        assert!(Observations::new(
            RespiratorySupport::Air,
            Consciousness::Alert,
            15,
            95,
            45.04,
            None
        )
        .is_ok());
    }

    #[test]
    fn from_codes_decodes_modes() {
        let obs = Observations::from_codes(2, 3, 23, 88, 38.54, Some(6.0), true)
            .expect("valid codes");
        assert_eq!(obs.respiratory_support(), RespiratorySupport::Oxygen);
        assert_eq!(
            obs.consciousness(),
            Consciousness::Impaired(ImpairmentLevel::Severe)
        );
        assert_eq!(obs.temperature(), 38.5);
        assert_eq!(obs.blood_glucose().map(|c| c.mmol_per_l()), Some(6.0));
    }

    #[test]
    fn from_codes_rejects_unknown_mode() {
        let err = Observations::from_codes(1, 0, 15, 95, 37.0, None, false)
            .expect_err("1 is not an air/oxygen code");
        assert!(matches!(err, ScoreError::InvalidMode(e) if e.code == 1));
    }

    #[test]
    fn from_codes_rejects_out_of_range_glucose() {
        let err = Observations::from_codes(0, 0, 15, 95, 37.0, Some(50.0), false)
            .expect_err("glucose out of range");
        assert!(matches!(
            err,
            ScoreError::InvalidObservation {
                field: "blood_glucose",
                ..
            }
        ));
    }

    #[test]
    fn deserialisation_routes_through_validation() {
        let json = r#"{
            "respiratory_support": "oxygen",
            "consciousness": "alert",
            "respiration_rate": 12,
            "oxygen_saturation": 96,
            "temperature": 36.14,
            "blood_glucose": { "mmol_per_l": 4.04, "fasting": true }
        }"#;
        let obs: Observations = serde_json::from_str(json).expect("valid json");
        assert_eq!(obs.temperature(), 36.1);
        assert_eq!(obs.blood_glucose().map(|c| c.mmol_per_l()), Some(4.0));

        let bad = r#"{
            "respiratory_support": "air",
            "consciousness": "alert",
            "respiration_rate": 12,
            "oxygen_saturation": 101,
            "temperature": 36.0
        }"#;
        let err = serde_json::from_str::<Observations>(bad).expect_err("spo2 out of range");
        assert!(err.to_string().contains("oxygen_saturation"));
    }
}
