use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Difficulty tiers exposed to front-ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn preset(self) -> DifficultyPreset {
        match self {
            Self::Easy => DifficultyPreset {
                size: 8,
                probability_range: (0.05, 0.2),
                max_probability: 0.2,
            },
            Self::Medium => DifficultyPreset {
                size: 12,
                probability_range: (0.2, 0.35),
                max_probability: 0.35,
            },
            Self::Hard => DifficultyPreset {
                size: 16,
                probability_range: (0.35, 0.5),
                max_probability: 0.5,
            },
        }
    }
}

/// Board size and mine-probability window for one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub size: Coord,
    pub probability_range: (f64, f64),
    pub max_probability: f64,
}

impl DifficultyPreset {
    /// Lowers the probability cap. Draws above the cap are clamped to it,
    /// even when the cap sits below the whole range.
    pub const fn with_max_probability(mut self, max_probability: f64) -> Self {
        self.max_probability = max_probability;
        self
    }

    /// Draws a game's mine probability: uniform over the range, rounded to
    /// two decimal places, clamped to the cap.
    pub fn roll_probability<R: Rng>(&self, rng: &mut R) -> f64 {
        let (min, max) = self.probability_range;
        let drawn = rng.random_range(min..=max);
        round_to_two_decimals(drawn).min(self.max_probability)
    }
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn presets_carry_the_expected_sizes_and_ranges() {
        assert_eq!(Difficulty::Easy.preset().size, 8);
        assert_eq!(Difficulty::Medium.preset().size, 12);
        assert_eq!(Difficulty::Hard.preset().size, 16);

        assert_eq!(Difficulty::Easy.preset().probability_range, (0.05, 0.2));
        assert_eq!(Difficulty::Hard.preset().max_probability, 0.5);
    }

    #[test]
    fn rolled_probability_stays_in_range_and_on_two_decimals() {
        let preset = Difficulty::Medium.preset();
        let mut rng = SmallRng::seed_from_u64(9);

        for _ in 0..200 {
            let p = preset.roll_probability(&mut rng);

            assert!(p >= 0.2 && p <= 0.35, "out of range: {p}");
            let scaled = p * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "not two decimals: {p}"
            );
        }
    }

    #[test]
    fn lowered_cap_clamps_every_draw() {
        let preset = Difficulty::Hard.preset().with_max_probability(0.1);
        let mut rng = SmallRng::seed_from_u64(9);

        for _ in 0..50 {
            assert_eq!(preset.roll_probability(&mut rng), 0.1);
        }
    }

    #[test]
    fn rolled_probability_always_builds_a_valid_config() {
        let preset = Difficulty::Easy.preset();
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..50 {
            let p = preset.roll_probability(&mut rng);
            assert!(BoardConfig::new(preset.size, p).is_ok());
        }
    }
}
