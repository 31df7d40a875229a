// Wellness simulation: four bounded metrics nudged by the playing animation and by care actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::types::HealthProfile;

pub const METRIC_MIN: f64 = 0.0;
pub const METRIC_MAX: f64 = 100.0;

/// Additive change to each metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthDelta {
    pub energy: f64,
    pub mood: f64,
    pub fitness: f64,
    pub hydration: f64,
}

impl HealthDelta {
    pub const ZERO: HealthDelta = HealthDelta::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(energy: f64, mood: f64, fitness: f64, hydration: f64) -> Self {
        HealthDelta {
            energy,
            mood,
            fitness,
            hydration,
        }
    }

    pub const fn mood(mood: f64) -> Self {
        HealthDelta::new(0.0, mood, 0.0, 0.0)
    }
}

impl HealthProfile {
    /// Apply `delta` and clamp every metric into [0, 100].
    pub fn apply(&mut self, delta: HealthDelta) {
        self.energy = clamp_metric(self.energy + delta.energy);
        self.mood = clamp_metric(self.mood + delta.mood);
        self.fitness = clamp_metric(self.fitness + delta.fitness);
        self.hydration = clamp_metric(self.hydration + delta.hydration);
    }

    /// Weighted composite, rounded to a whole number.
    pub fn score(&self) -> u32 {
        let weighted =
            self.energy * 0.34 + self.mood * 0.28 + self.fitness * 0.23 + self.hydration * 0.15;
        weighted.round().clamp(METRIC_MIN, METRIC_MAX) as u32
    }

    pub fn status(&self) -> HealthStatus {
        HealthStatus::from_score(self.score())
    }
}

fn clamp_metric(value: f64) -> f64 {
    if value.is_nan() {
        return METRIC_MIN;
    }
    value.clamp(METRIC_MIN, METRIC_MAX)
}

/// Label for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Stable,
    NeedsCare,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => HealthStatus::Excellent,
            70..=84 => HealthStatus::Stable,
            50..=69 => HealthStatus::NeedsCare,
            _ => HealthStatus::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Stable => "Stable",
            HealthStatus::NeedsCare => "Needs Care",
            HealthStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How demanding the playing animation is, judged from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exertion {
    High,
    Moderate,
    Restorative,
    Baseline,
}

const HIGH_KEYWORDS: [&str; 4] = ["run", "jump", "attack", "gallop"];
const MODERATE_KEYWORDS: [&str; 2] = ["walk", "survey"];
const RESTORATIVE_KEYWORDS: [&str; 3] = ["idle", "rest", "sleep"];

impl Exertion {
    /// Keyword groups are checked in order; the first containing match wins.
    pub fn classify(animation: &str) -> Self {
        let name = animation.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));
        if has(&HIGH_KEYWORDS) {
            Exertion::High
        } else if has(&MODERATE_KEYWORDS) {
            Exertion::Moderate
        } else if has(&RESTORATIVE_KEYWORDS) {
            Exertion::Restorative
        } else {
            Exertion::Baseline
        }
    }

    pub fn delta(&self) -> HealthDelta {
        match self {
            Exertion::High => HealthDelta::new(-2.6, 0.8, 1.3, -1.1),
            Exertion::Moderate => HealthDelta::new(-1.2, 0.5, 0.7, -0.6),
            Exertion::Restorative => HealthDelta::new(1.2, 0.3, 0.1, -0.2),
            Exertion::Baseline => HealthDelta::new(-0.4, 0.0, 0.0, -0.3),
        }
    }
}

/// User-triggered care action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthAction {
    Feed,
    Water,
    Play,
    Rest,
}

impl HealthAction {
    pub const ALL: [HealthAction; 4] = [
        HealthAction::Feed,
        HealthAction::Water,
        HealthAction::Play,
        HealthAction::Rest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthAction::Feed => "feed",
            HealthAction::Water => "water",
            HealthAction::Play => "play",
            HealthAction::Rest => "rest",
        }
    }

    pub fn delta(&self) -> HealthDelta {
        match self {
            HealthAction::Feed => HealthDelta::new(14.0, 6.0, 0.0, -2.0),
            HealthAction::Water => HealthDelta::new(2.0, 3.0, 0.0, 20.0),
            HealthAction::Play => HealthDelta::new(-8.0, 12.0, 6.0, -5.0),
            HealthAction::Rest => HealthDelta::new(16.0, 3.0, -1.0, -2.0),
        }
    }
}

impl FromStr for HealthAction {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| StudioError::UnknownAction(s.to_string()))
    }
}

/// Metrics of the active subject.
#[derive(Debug)]
pub struct WellnessSimulator {
    profile: HealthProfile,
}

impl WellnessSimulator {
    pub fn new(base: HealthProfile) -> Self {
        let mut profile = base;
        // Clamp in case a base profile sits out of range.
        profile.apply(HealthDelta::ZERO);
        WellnessSimulator { profile }
    }

    pub fn reset(&mut self, base: HealthProfile) {
        *self = WellnessSimulator::new(base);
    }

    /// Passive tick driven by whatever animation is playing.
    pub fn tick(&mut self, active_animation: &str) -> Exertion {
        let exertion = Exertion::classify(active_animation);
        self.profile.apply(exertion.delta());
        exertion
    }

    pub fn perform(&mut self, action: HealthAction) {
        self.profile.apply(action.delta());
    }

    pub fn boost_mood(&mut self, amount: f64) {
        self.profile.apply(HealthDelta::mood(amount));
    }

    pub fn profile(&self) -> HealthProfile {
        self.profile
    }

    pub fn score(&self) -> u32 {
        self.profile.score()
    }

    pub fn status(&self) -> HealthStatus {
        self.profile.status()
    }
}
