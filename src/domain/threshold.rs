// Threshold profiles - Turns raw channel readings into severity tiers
use super::tier::SeverityTier;
use serde::Deserialize;

/// One measured attribute of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Ammo,
    Water,
    HeartRate,
    Spo2,
    Temperature,
    Respiration,
    Weapon,
}

impl ChannelKind {
    /// Board order, top to bottom.
    pub const ALL: [ChannelKind; 7] = [
        ChannelKind::Ammo,
        ChannelKind::Water,
        ChannelKind::HeartRate,
        ChannelKind::Spo2,
        ChannelKind::Temperature,
        ChannelKind::Respiration,
        ChannelKind::Weapon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Ammo => "Ammo",
            ChannelKind::Water => "Water",
            ChannelKind::HeartRate => "HR",
            ChannelKind::Spo2 => "SPO2",
            ChannelKind::Temperature => "Temp",
            ChannelKind::Respiration => "Resp",
            ChannelKind::Weapon => "Weapon",
        }
    }
}

/// Descending cutoff scale: higher is better.
///
/// `(amber, ..] = Normal`, `(red, amber] = Caution`, `(black, red] = Warning`,
/// `<= black = Critical`. `green` is the top of the normal band and only
/// matters when `ceiling` is set; above the ceiling a reading is out of domain.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CutoffScale {
    pub green: f64,
    pub amber: f64,
    pub red: f64,
    pub black: f64,
    #[serde(default)]
    pub ceiling: Option<f64>,
}

impl CutoffScale {
    pub fn classify(&self, value: f64) -> SeverityTier {
        if !value.is_finite() {
            return SeverityTier::Critical;
        }
        if let Some(ceiling) = self.ceiling {
            if value > ceiling {
                return SeverityTier::Critical;
            }
        }

        if value > self.amber {
            SeverityTier::Normal
        } else if value > self.red {
            SeverityTier::Caution
        } else if value > self.black {
            SeverityTier::Warning
        } else {
            SeverityTier::Critical
        }
    }
}

/// Inclusive `[low, high]` band.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Concentric bands, tightest first. Anything strictly outside `outer` is
/// Critical; anything inside `outer` but outside `warning` still reads Warning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RangeScale {
    pub normal: Band,
    pub caution: Band,
    pub warning: Band,
    pub outer: Band,
}

impl RangeScale {
    pub fn classify(&self, value: f64) -> SeverityTier {
        if !value.is_finite() {
            return SeverityTier::Critical;
        }

        if self.normal.contains(value) {
            SeverityTier::Normal
        } else if self.caution.contains(value) {
            SeverityTier::Caution
        } else if self.warning.contains(value) || self.outer.contains(value) {
            SeverityTier::Warning
        } else {
            SeverityTier::Critical
        }
    }
}

/// Weapon-state counter rule. The counter is seconds since last fire with
/// parity carrying the safety (even = safed, odd = live).
///
/// First match wins: `safe`, then `live`, then `> settled_after`; everything
/// else is the transitional window right after firing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeaponRule {
    pub safe: i64,
    pub live: i64,
    pub settled_after: i64,
}

impl WeaponRule {
    pub fn classify(&self, value: f64) -> SeverityTier {
        if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
            return SeverityTier::Critical;
        }

        let counter = value as i64;
        if counter == self.safe {
            SeverityTier::Normal
        } else if counter == self.live {
            SeverityTier::Caution
        } else if counter > self.settled_after {
            SeverityTier::Warning
        } else {
            SeverityTier::Critical
        }
    }
}

/// The complete set of per-channel profiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdProfiles {
    pub ammo: CutoffScale,
    pub water: CutoffScale,
    pub spo2: CutoffScale,
    pub heart_rate: RangeScale,
    pub respiration: RangeScale,
    pub temperature: RangeScale,
    pub weapon: WeaponRule,
}

impl Default for ThresholdProfiles {
    fn default() -> Self {
        Self {
            // Rounds of ammunition
            ammo: CutoffScale {
                green: 270.0,
                amber: 202.0,
                red: 135.0,
                black: 68.0,
                ceiling: None,
            },
            // Quarts
            water: CutoffScale {
                green: 3.0,
                amber: 2.0,
                red: 1.0,
                black: 0.0,
                ceiling: None,
            },
            spo2: CutoffScale {
                green: 100.0,
                amber: 92.0,
                red: 85.0,
                black: 80.0,
                ceiling: Some(100.0),
            },
            // Beats per minute
            heart_rate: RangeScale {
                normal: Band::new(60.0, 100.0),
                caution: Band::new(50.0, 120.0),
                warning: Band::new(40.0, 160.0),
                outer: Band::new(30.0, 200.0),
            },
            // Breaths per minute
            respiration: RangeScale {
                normal: Band::new(12.0, 15.0),
                caution: Band::new(10.0, 18.0),
                warning: Band::new(8.0, 21.0),
                outer: Band::new(0.0, 25.0),
            },
            // Degrees F
            temperature: RangeScale {
                normal: Band::new(96.0, 99.0),
                caution: Band::new(93.0, 101.0),
                warning: Band::new(85.0, 103.0),
                outer: Band::new(80.0, 104.0),
            },
            weapon: WeaponRule {
                safe: 0,
                live: 1,
                settled_after: 11,
            },
        }
    }
}

impl ThresholdProfiles {
    pub fn classify(&self, kind: ChannelKind, value: f64) -> SeverityTier {
        match kind {
            ChannelKind::Ammo => self.ammo.classify(value),
            ChannelKind::Water => self.water.classify(value),
            ChannelKind::Spo2 => self.spo2.classify(value),
            ChannelKind::HeartRate => self.heart_rate.classify(value),
            ChannelKind::Respiration => self.respiration.classify(value),
            ChannelKind::Temperature => self.temperature.classify(value),
            ChannelKind::Weapon => self.weapon.classify(value),
        }
    }
}

/// Classify against the reference profiles.
pub fn classify(kind: ChannelKind, value: f64) -> SeverityTier {
    ThresholdProfiles::default().classify(kind, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SeverityTier::*;

    fn assert_tiers(kind: ChannelKind, cases: &[(f64, SeverityTier)]) {
        for (value, expected) in cases {
            assert_eq!(
                classify(kind, *value),
                *expected,
                "{:?} reading {} should be {:?}",
                kind,
                value,
                expected
            );
        }
    }

    #[test]
    fn test_ammo_boundaries() {
        assert_tiers(
            ChannelKind::Ammo,
            &[
                (271.0, Normal),
                (270.0, Normal),
                (203.0, Normal),
                (202.0, Caution),
                (136.0, Caution),
                (135.0, Warning),
                (69.0, Warning),
                (68.0, Critical),
                (67.0, Critical),
                (-5.0, Critical),
            ],
        );
    }

    #[test]
    fn test_water_boundaries() {
        assert_tiers(
            ChannelKind::Water,
            &[
                (4.0, Normal),
                (3.0, Normal),
                (2.0, Caution),
                (1.0, Warning),
                (0.0, Critical),
                (-1.0, Critical),
            ],
        );
    }

    #[test]
    fn test_spo2_boundaries() {
        assert_tiers(
            ChannelKind::Spo2,
            &[
                (100.0, Normal),
                (93.0, Normal),
                (92.0, Caution),
                (86.0, Caution),
                (85.0, Warning),
                (81.0, Warning),
                (80.0, Critical),
                (65.0, Critical),
                (101.0, Critical),
            ],
        );
    }

    #[test]
    fn test_heart_rate_boundaries() {
        assert_tiers(
            ChannelKind::HeartRate,
            &[
                (60.0, Normal),
                (59.0, Caution),
                (50.0, Caution),
                (49.0, Warning),
                (40.0, Warning),
                (39.0, Warning),
                (30.0, Warning),
                (29.0, Critical),
                (100.0, Normal),
                (101.0, Caution),
                (120.0, Caution),
                (121.0, Warning),
                (160.0, Warning),
                (161.0, Warning),
                (200.0, Warning),
                (201.0, Critical),
            ],
        );
    }

    #[test]
    fn test_respiration_and_temperature() {
        assert_tiers(
            ChannelKind::Respiration,
            &[
                (15.0, Normal),
                (8.0, Warning),
                (9.0, Warning),
                (30.0, Critical),
                (45.0, Critical),
                (-1.0, Critical),
            ],
        );
        assert_tiers(
            ChannelKind::Temperature,
            &[
                (98.6, Normal),
                (99.2, Caution),
                (90.1, Warning),
                (87.8, Warning),
                (83.4, Warning),
                (79.9, Critical),
                (104.5, Critical),
            ],
        );
    }

    #[test]
    fn test_weapon_state_precedence() {
        assert_tiers(
            ChannelKind::Weapon,
            &[
                (0.0, Normal),
                (1.0, Caution),
                (2.0, Critical),
                (10.0, Critical),
                (11.0, Critical),
                (12.0, Warning),
                (13.0, Warning),
                (-2.0, Critical),
                (1.5, Critical),
            ],
        );
    }

    #[test]
    fn test_non_finite_readings_are_critical() {
        for kind in ChannelKind::ALL {
            assert_eq!(classify(kind, f64::NAN), Critical);
            assert_eq!(classify(kind, f64::INFINITY), Critical);
            assert_eq!(classify(kind, f64::NEG_INFINITY), Critical);
        }
    }

    #[test]
    fn test_cutoff_scales_are_monotonic() {
        // Walking down from the normal band never lowers severity
        for kind in [ChannelKind::Ammo, ChannelKind::Water, ChannelKind::Spo2] {
            let mut previous = Normal;
            let mut value = match kind {
                ChannelKind::Ammo => 300.0,
                ChannelKind::Water => 5.0,
                _ => 100.0,
            };
            while value > -10.0 {
                let tier = classify(kind, value);
                assert!(tier >= previous, "{:?} at {} dropped to {:?}", kind, value, tier);
                previous = tier;
                value -= 0.5;
            }
        }
    }

    #[test]
    fn test_range_scales_are_monotonic_both_ways() {
        let profiles = ThresholdProfiles::default();
        for (kind, scale) in [
            (ChannelKind::HeartRate, profiles.heart_rate),
            (ChannelKind::Respiration, profiles.respiration),
            (ChannelKind::Temperature, profiles.temperature),
        ] {
            let mid = (scale.normal.low + scale.normal.high) / 2.0;
            for step in [0.25, -0.25] {
                let mut previous = Normal;
                let mut value = mid;
                for _ in 0..1000 {
                    let tier = classify(kind, value);
                    assert!(tier >= previous, "{:?} at {} dropped to {:?}", kind, value, tier);
                    previous = tier;
                    value += step;
                }
                assert_eq!(previous, Critical);
            }
        }
    }

    #[test]
    fn test_profiles_override_from_toml() {
        let profiles: ThresholdProfiles = toml::from_str(
            r#"
            [water]
            green = 6.0
            amber = 4.0
            red = 2.0
            black = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(profiles.classify(ChannelKind::Water, 3.0), Caution);
        // Untouched profiles keep the reference values
        assert_eq!(profiles.classify(ChannelKind::Ammo, 202.0), Caution);
    }
}
