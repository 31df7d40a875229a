// Strong typing over strings. Newtypes for timestamps, orbit values, and host commands.

use serde::{Deserialize, Serialize};

/// Timestamp in microseconds on the host's monotonic clock. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms.saturating_mul(1000))
    }

    /// From a `performance.now()` reading. Negative and NaN readings map to zero.
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms > 0.0 {
            Timestamp((ms * 1000.0).round() as u64)
        } else {
            Timestamp(0)
        }
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Micros elapsed since `earlier`, zero if the clock went backwards.
    pub fn micros_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn saturating_add_micros(&self, us: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(us))
    }
}

/// Camera position around the subject: azimuth and polar angle in degrees,
/// radius as a percentage of the framed distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOrbit {
    pub theta: f64,
    pub phi: f64,
    pub radius: f64,
}

impl CameraOrbit {
    pub fn new(theta: f64, phi: f64, radius: f64) -> Self {
        CameraOrbit { theta, phi, radius }
    }

    /// Same orbit with theta wrapped into [0, 360).
    pub fn wrapped(&self) -> Self {
        CameraOrbit {
            theta: wrap_degrees(self.theta),
            ..*self
        }
    }

    /// Viewer `cameraOrbit` attribute, e.g. `"90.00deg 75.00deg 105.00%"`.
    pub fn to_viewer_string(&self) -> String {
        format!(
            "{:.2}deg {:.2}deg {:.2}%",
            self.theta, self.phi, self.radius
        )
    }
}

impl Default for CameraOrbit {
    fn default() -> Self {
        CameraOrbit {
            theta: 0.0,
            phi: 75.0,
            radius: 105.0,
        }
    }
}

/// Wrap an angle into [0, 360).
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// The four simulated wellness metrics, each kept in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub energy: f64,
    pub mood: f64,
    pub fitness: f64,
    pub hydration: f64,
}

impl HealthProfile {
    pub const fn new(energy: f64, mood: f64, fitness: f64, hydration: f64) -> Self {
        HealthProfile {
            energy,
            mood,
            fitness,
            hydration,
        }
    }
}

/// Easing function for camera transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EasingType {
    Linear,
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingType {
    /// Map linear progress in [0, 1] onto the eased curve.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseOut => 1.0 - (1.0 - t).powi(3),
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default = "default_initial_subject")]
    pub initial_subject: String,
    #[serde(default = "default_initial_preset")]
    pub initial_preset: String,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub wellness: WellnessSettings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            initial_subject: default_initial_subject(),
            initial_preset: default_initial_preset(),
            camera: CameraSettings::default(),
            wellness: WellnessSettings::default(),
        }
    }
}

fn default_initial_subject() -> String {
    "dog".to_string()
}

fn default_initial_preset() -> String {
    "front".to_string()
}

/// Camera behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Duration of a preset transition.
    #[serde(default = "default_tween_duration")]
    pub tween_duration_ms: u64,
    /// Azimuth rate while touring.
    #[serde(default = "default_tour_speed")]
    pub tour_speed_deg_per_sec: f64,
    #[serde(default)]
    pub tween_easing: EasingType,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            tween_duration_ms: default_tween_duration(),
            tour_speed_deg_per_sec: default_tour_speed(),
            tween_easing: EasingType::default(),
        }
    }
}

fn default_tween_duration() -> u64 {
    700
}

fn default_tour_speed() -> f64 {
    24.0
}

/// Wellness simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessSettings {
    /// Period of the passive tick.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Mood added when a sound starts playing.
    #[serde(default = "default_sound_mood_boost")]
    pub sound_mood_boost: f64,
}

impl Default for WellnessSettings {
    fn default() -> Self {
        WellnessSettings {
            tick_interval_ms: default_tick_interval(),
            sound_mood_boost: default_sound_mood_boost(),
        }
    }
}

fn default_tick_interval() -> u64 {
    2500
}

fn default_sound_mood_boost() -> f64 {
    2.5
}

/// Identifies one audio playback instance so late host reports can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundInstanceId(u32);

impl SoundInstanceId {
    pub fn new(id: u32) -> Self {
        SoundInstanceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Imperative side effect for the JS host to apply, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Write `animationName` on the viewer.
    SetAnimation { name: String },
    /// Call `play()` on the viewer.
    PlayAnimation,
    /// Write `cameraOrbit` on the viewer.
    SetCameraOrbit { orbit: String },
    /// Create an audio element for `path` and start it.
    PlaySound {
        instance: SoundInstanceId,
        path: String,
    },
    /// Pause, rewind, and release the audio element.
    StopSound { instance: SoundInstanceId },
}

/// Which camera loop, if any, is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPhaseKind {
    Idle,
    Tweening,
    Touring,
}

/// Subject fields the page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectView {
    pub id: String,
    pub label: String,
    pub model_path: String,
    pub icon_path: String,
    pub accent: String,
}

/// Everything the page needs to render, returned to JS after each interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSnapshot {
    pub subject: SubjectView,
    pub is_loading: bool,
    pub model_status: String,
    pub available_animations: Vec<String>,
    pub active_animation: String,
    pub is_playing_sound: bool,
    pub orbit: CameraOrbit,
    pub camera_orbit: String,
    pub active_preset: String,
    pub camera_phase: CameraPhaseKind,
    pub health: HealthProfile,
    pub health_score: u32,
    pub health_status: String,
}
