//! Per-parameter scoring rules.
//!
//! Each rule maps one observation to its MediScore points. The numeric rules are clinically
//! defined range tables: bands are listed by descending lower bound, a value scores the points of
//! the first band whose lower bound it reaches, and anything below the last band scores the
//! table's `below` points.

use mediscore_types::{Consciousness, RespiratorySupport};

/// A band starting at `from` (inclusive) and running up to the previous band's start.
#[derive(Clone, Copy, Debug)]
pub struct Band<T> {
    pub from: T,
    pub points: u32,
}

/// A descending range table.
#[derive(Clone, Copy, Debug)]
pub struct RangeTable<T: 'static> {
    pub bands: &'static [Band<T>],
    pub below: u32,
}

impl<T: PartialOrd + Copy + 'static> RangeTable<T> {
    pub fn points(&self, value: T) -> u32 {
        self.bands
            .iter()
            .find(|band| value >= band.from)
            .map_or(self.below, |band| band.points)
    }
}

const fn band<T>(from: T, points: u32) -> Band<T> {
    Band { from, points }
}

/// ≥25 → 3, 21–24 → 2, 12–20 → 0, 9–11 → 1, ≤8 → 3.
pub const RESPIRATION_RATE: RangeTable<u32> = RangeTable {
    bands: &[band(25, 3), band(21, 2), band(12, 0), band(9, 1)],
    below: 3,
};

/// ≥93 → 0, 86–92 → 1, 84–85 → 2, <84 → 3.
pub const SPO2_ON_AIR: RangeTable<u8> = RangeTable {
    bands: &[band(93, 0), band(86, 1), band(84, 2)],
    below: 3,
};

/// ≥97 → 0, 93–96 → 1, 88–92 → 2, <88 → 3.
pub const SPO2_ON_OXYGEN: RangeTable<u8> = RangeTable {
    bands: &[band(97, 0), band(93, 1), band(88, 2)],
    below: 3,
};

/// ≥39.1 → 2, 38.1–39.0 → 1, 36.1–38.0 → 0, 35.1–36.0 → 1, ≤35.0 → 3.
pub const TEMPERATURE: RangeTable<f64> = RangeTable {
    bands: &[band(39.1, 2), band(38.1, 1), band(36.1, 0), band(35.1, 1)],
    below: 3,
};

/// ≥6.0 → 3, 5.5–5.9 → 2, 4.0–5.4 → 0, 3.5–3.9 → 2, ≤3.4 → 2.
pub const CBG_FASTING: RangeTable<f64> = RangeTable {
    bands: &[band(6.0, 3), band(5.5, 2), band(4.0, 0), band(3.5, 2)],
    below: 2,
};

/// ≥9.0 → 3, 7.9–8.9 → 2, 5.9–7.8 → 0, 4.5–5.8 → 2, ≤4.4 → 3.
pub const CBG_NOT_FASTING: RangeTable<f64> = RangeTable {
    bands: &[band(9.0, 3), band(7.9, 2), band(5.9, 0), band(4.5, 2)],
    below: 3,
};

pub fn respiratory_support_score(support: RespiratorySupport) -> u32 {
    match support {
        RespiratorySupport::Air => 0,
        RespiratorySupport::Oxygen => 2,
    }
}

/// Any degree of impaired consciousness scores 3.
pub fn consciousness_score(consciousness: Consciousness) -> u32 {
    match consciousness {
        Consciousness::Alert => 0,
        Consciousness::Impaired(_) => 3,
    }
}

pub fn respiration_rate_score(breaths_per_minute: u32) -> u32 {
    RESPIRATION_RATE.points(breaths_per_minute)
}

/// Oxygen saturation is judged against a stricter table when the patient is on oxygen.
pub fn spo2_score(support: RespiratorySupport, spo2: u8) -> u32 {
    match support {
        RespiratorySupport::Air => SPO2_ON_AIR.points(spo2),
        RespiratorySupport::Oxygen => SPO2_ON_OXYGEN.points(spo2),
    }
}

/// `temperature` must already be rounded to one decimal place.
pub fn temperature_score(temperature: f64) -> u32 {
    TEMPERATURE.points(temperature)
}

/// `cbg` must already be rounded to one decimal place.
pub fn blood_glucose_score(fasting: bool, cbg: f64) -> u32 {
    if fasting {
        CBG_FASTING.points(cbg)
    } else {
        CBG_NOT_FASTING.points(cbg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediscore_types::ImpairmentLevel;

    fn assert_table<T: PartialOrd + Copy + std::fmt::Debug>(
        rule: impl Fn(T) -> u32,
        cases: &[(T, u32)],
    ) {
        for &(value, expected) in cases {
            assert_eq!(rule(value), expected, "value {value:?}");
        }
    }

    #[test]
    fn respiratory_support_points() {
        assert_eq!(respiratory_support_score(RespiratorySupport::Air), 0);
        assert_eq!(respiratory_support_score(RespiratorySupport::Oxygen), 2);
    }

    #[test]
    fn consciousness_points() {
        assert_eq!(consciousness_score(Consciousness::Alert), 0);
        for level in [
            ImpairmentLevel::Mild,
            ImpairmentLevel::Moderate,
            ImpairmentLevel::Severe,
        ] {
            assert_eq!(consciousness_score(Consciousness::Impaired(level)), 3);
        }
    }

    #[test]
    fn respiration_rate_boundaries() {
        assert_table(
            respiration_rate_score,
            &[
                (40, 3),
                (25, 3),
                (24, 2),
                (21, 2),
                (20, 0),
                (12, 0),
                (11, 1),
                (9, 1),
                (8, 3),
                (0, 3),
            ],
        );
    }

    #[test]
    fn spo2_on_air_boundaries() {
        assert_table(
            |v| spo2_score(RespiratorySupport::Air, v),
            &[
                (100, 0),
                (93, 0),
                (92, 1),
                (86, 1),
                (85, 2),
                (84, 2),
                (83, 3),
                (0, 3),
            ],
        );
    }

    #[test]
    fn spo2_on_oxygen_boundaries() {
        assert_table(
            |v| spo2_score(RespiratorySupport::Oxygen, v),
            &[
                (100, 0),
                (97, 0),
                (96, 1),
                (93, 1),
                (92, 2),
                (88, 2),
                (87, 3),
                (70, 3),
            ],
        );
    }

    #[test]
    fn temperature_boundaries() {
        assert_table(
            temperature_score,
            &[
                (41.0, 2),
                (39.1, 2),
                (39.0, 1),
                (38.1, 1),
                (38.0, 0),
                (36.1, 0),
                (36.0, 1),
                (35.1, 1),
                (35.0, 3),
                (33.2, 3),
            ],
        );
    }

    #[test]
    fn fasting_glucose_boundaries() {
        assert_table(
            |v| blood_glucose_score(true, v),
            &[
                (6.0, 3),
                (5.9, 2),
                (5.5, 2),
                (5.4, 0),
                (4.0, 0),
                (3.9, 2),
                (3.5, 2),
                (3.4, 2),
                (0.0, 2),
            ],
        );
    }

    #[test]
    fn non_fasting_glucose_boundaries() {
        assert_table(
            |v| blood_glucose_score(false, v),
            &[
                (9.0, 3),
                (8.9, 2),
                (7.9, 2),
                (7.8, 0),
                (5.9, 0),
                (5.8, 2),
                (4.5, 2),
                (4.4, 3),
                (3.9, 3),
            ],
        );
    }
}
