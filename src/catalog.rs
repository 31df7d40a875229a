// Static catalogs: subjects with their assets and base wellness, camera presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::types::{CameraOrbit, HealthProfile, SubjectView};

/// Catalog key of a viewable subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectId {
    Dog,
    Cat,
}

impl SubjectId {
    pub const ALL: [SubjectId; 2] = [SubjectId::Dog, SubjectId::Cat];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectId::Dog => "dog",
            SubjectId::Cat => "cat",
        }
    }

    pub fn subject(&self) -> &'static Subject {
        match self {
            SubjectId::Dog => &DOG,
            SubjectId::Cat => &CAT,
        }
    }
}

impl FromStr for SubjectId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubjectId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StudioError::UnknownSubject(s.to_string()))
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A viewable pet: its assets and the wellness it starts from.
#[derive(Debug)]
pub struct Subject {
    pub id: SubjectId,
    pub label: &'static str,
    pub model_path: &'static str,
    pub icon_path: &'static str,
    pub sound_path: &'static str,
    pub accent: &'static str,
    pub base_health: HealthProfile,
}

impl Subject {
    pub fn view(&self) -> SubjectView {
        SubjectView {
            id: self.id.as_str().to_string(),
            label: self.label.to_string(),
            model_path: self.model_path.to_string(),
            icon_path: self.icon_path.to_string(),
            accent: self.accent.to_string(),
        }
    }
}

static DOG: Subject = Subject {
    id: SubjectId::Dog,
    label: "Dog",
    model_path: "/models/dog.glb",
    icon_path: "/assets/icons/dog.png",
    sound_path: "/assets/sounds/bark.mp3",
    accent: "sunset",
    base_health: HealthProfile::new(82.0, 78.0, 74.0, 70.0),
};

static CAT: Subject = Subject {
    id: SubjectId::Cat,
    label: "Cat",
    model_path: "/models/cat.glb",
    icon_path: "/assets/icons/cat.png",
    sound_path: "/assets/sounds/meow.mp3",
    accent: "sea",
    base_health: HealthProfile::new(70.0, 74.0, 66.0, 80.0),
};

/// Catalog key of a camera preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    Front,
    Left,
    Back,
    Right,
    Top,
}

impl PresetId {
    pub const ALL: [PresetId; 5] = [
        PresetId::Front,
        PresetId::Left,
        PresetId::Back,
        PresetId::Right,
        PresetId::Top,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::Front => "front",
            PresetId::Left => "left",
            PresetId::Back => "back",
            PresetId::Right => "right",
            PresetId::Top => "top",
        }
    }

    /// Orbit the camera settles on for this preset.
    pub fn target(&self) -> CameraOrbit {
        match self {
            PresetId::Front => CameraOrbit::new(0.0, 75.0, 105.0),
            PresetId::Left => CameraOrbit::new(-90.0, 75.0, 105.0),
            PresetId::Back => CameraOrbit::new(180.0, 75.0, 105.0),
            PresetId::Right => CameraOrbit::new(90.0, 75.0, 105.0),
            PresetId::Top => CameraOrbit::new(30.0, 18.0, 125.0),
        }
    }
}

impl FromStr for PresetId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StudioError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_ids_parse() {
        assert_eq!("dog".parse::<SubjectId>().unwrap(), SubjectId::Dog);
        assert_eq!("cat".parse::<SubjectId>().unwrap(), SubjectId::Cat);
        assert!(matches!(
            "Dog".parse::<SubjectId>(),
            Err(StudioError::UnknownSubject(_))
        ));
    }

    #[test]
    fn catalog_entries_match_ids() {
        for id in SubjectId::ALL {
            assert_eq!(id.subject().id, id);
        }
        assert_eq!(SubjectId::Cat.subject().sound_path, "/assets/sounds/meow.mp3");
    }

    #[test]
    fn base_profiles_in_bounds() {
        for id in SubjectId::ALL {
            let h = id.subject().base_health;
            for v in [h.energy, h.mood, h.fitness, h.hydration] {
                assert!((0.0..=100.0).contains(&v));
            }
        }
    }

    #[test]
    fn five_presets_round_trip_through_str() {
        assert_eq!(PresetId::ALL.len(), 5);
        for id in PresetId::ALL {
            assert_eq!(id.as_str().parse::<PresetId>().unwrap(), id);
        }
        assert!(matches!(
            "orbit".parse::<PresetId>(),
            Err(StudioError::UnknownPreset(_))
        ));
    }

    #[test]
    fn subject_view_carries_assets() {
        let view = SubjectId::Dog.subject().view();
        assert_eq!(view.id, "dog");
        assert_eq!(view.model_path, "/models/dog.glb");
        assert_eq!(view.accent, "sunset");
    }
}
