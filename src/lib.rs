// pet_studio_core: AR Pet Studio Rust/WASM engine.
// All viewer behavior lives here; the page only forwards events and applies commands.

mod animation;
mod camera;
mod catalog;
mod error;
mod scheduler;
mod sound;
mod studio;
mod types;
mod wellness;

use log::debug;
use wasm_bindgen::prelude::*;

pub use animation::{order_animations, AnimationSelector, PREFERRED_ANIMATIONS};
pub use camera::{shortest_delta, CameraDirector};
pub use catalog::{PresetId, Subject, SubjectId};
pub use error::StudioError;
pub use scheduler::{FrameHandle, FrameLoop, IntervalTimer};
pub use sound::SoundController;
pub use studio::Studio;
pub use types::*;
pub use wellness::{Exertion, HealthAction, HealthDelta, HealthStatus, WellnessSimulator};

/// Initialize panic hook and console logging for the browser.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Ignored when a logger is already installed.
    #[cfg(all(feature = "console_log", target_arch = "wasm32"))]
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Main studio interface exposed to JavaScript.
///
/// Every mutating call may queue host commands; the page applies them after
/// each call via `drain_commands()` and re-renders from `snapshot()`.
///
/// # Example JSON Config
/// ```json
/// {
///   "initial_subject": "dog",
///   "initial_preset": "front",
///   "camera": { "tween_duration_ms": 700, "tour_speed_deg_per_sec": 24.0 },
///   "wellness": { "tick_interval_ms": 2500, "sound_mood_boost": 2.5 }
/// }
/// ```
#[wasm_bindgen]
pub struct PetStudio {
    inner: Studio,
}

#[wasm_bindgen]
impl PetStudio {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<PetStudio, JsValue> {
        let inner = Studio::from_json(config_json).map_err(to_js)?;
        Ok(PetStudio { inner })
    }

    pub fn select_subject(&mut self, subject_id: &str) {
        self.inner.select_subject_by_id(subject_id);
    }

    pub fn attach_viewer(&mut self) {
        self.inner.attach_viewer();
    }

    pub fn detach_viewer(&mut self) {
        self.inner.detach_viewer();
    }

    /// Viewer `load` event. `animations_json` is the viewer's `availableAnimations`
    /// as a JSON array; anything that is not an array of strings counts as empty.
    pub fn model_loaded(&mut self, animations_json: &str, now_ms: f64) {
        let names: Vec<String> = match serde_json::from_str(animations_json) {
            Ok(names) => names,
            Err(e) => {
                debug!("studio: unreadable animation list: {}", e);
                Vec::new()
            }
        };
        self.inner
            .model_loaded(names.as_slice(), Timestamp::from_millis_f64(now_ms));
    }

    /// Viewer `load` event taking the `availableAnimations` array directly.
    /// Non-string entries are skipped.
    pub fn model_loaded_with(&mut self, animations: &js_sys::Array, now_ms: f64) {
        let names: Vec<String> = animations.iter().filter_map(|v| v.as_string()).collect();
        self.inner
            .model_loaded(names.as_slice(), Timestamp::from_millis_f64(now_ms));
    }

    /// Viewer `error` event.
    pub fn model_failed(&mut self) {
        self.inner.model_failed();
    }

    pub fn play_animation(&mut self, name: &str) -> bool {
        self.inner.play_animation(name)
    }

    /// Start a transition to the named preset. Returns the camera loop handle,
    /// or `undefined` for an unknown preset.
    pub fn apply_preset(&mut self, preset_id: &str, now_ms: f64) -> Option<u32> {
        self.inner
            .apply_preset_by_id(preset_id, Timestamp::from_millis_f64(now_ms))
            .map(|h| h.as_u32())
    }

    /// Returns the camera loop handle when a tour was started.
    pub fn toggle_tour(&mut self) -> Option<u32> {
        self.inner.toggle_tour().map(|h| h.as_u32())
    }

    pub fn perform_action(&mut self, action_id: &str) {
        self.inner.perform_action_by_id(action_id);
    }

    pub fn toggle_sound(&mut self) {
        self.inner.toggle_sound();
    }

    pub fn stop_sound(&mut self) {
        self.inner.stop_sound();
    }

    /// `play()` promise resolved for `instance`.
    pub fn sound_started(&mut self, instance: u32) {
        self.inner.sound_started(SoundInstanceId::new(instance));
    }

    /// `play()` promise rejected for `instance`.
    pub fn sound_failed(&mut self, instance: u32) {
        self.inner.sound_failed(SoundInstanceId::new(instance));
    }

    /// Audio `ended` event for `instance`.
    pub fn sound_ended(&mut self, instance: u32) {
        self.inner.sound_ended(SoundInstanceId::new(instance));
    }

    /// requestAnimationFrame callback for the camera loop started under `handle`.
    /// Returns false once the loop finished or was replaced; the page should then
    /// stop requesting frames for this handle.
    pub fn camera_frame(&mut self, handle: u32, now_ms: f64) -> bool {
        match self.inner.camera_frame_handle() {
            Some(current) if current.as_u32() == handle => self
                .inner
                .camera_frame(current, Timestamp::from_millis_f64(now_ms)),
            _ => false,
        }
    }

    /// Passive wellness tick, for a `setInterval` at the configured period.
    /// Returns true if a tick was applied.
    pub fn poll_wellness(&mut self, now_ms: f64) -> bool {
        self.inner.poll_wellness(Timestamp::from_millis_f64(now_ms))
    }

    /// Combined driver for pages that run one continuous requestAnimationFrame loop:
    /// advances the camera loop, if any, and polls the wellness timer. The return
    /// value covers the camera only; keep calling `tick` (or `poll_wellness`) even
    /// when it is false, or wellness stops advancing.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.inner.tick(Timestamp::from_millis_f64(now_ms))
    }

    /// Component unmount.
    pub fn teardown(&mut self) {
        self.inner.teardown();
    }

    /// Queued host commands as a JSON array, oldest first.
    pub fn drain_commands(&mut self) -> Result<String, JsValue> {
        let commands = self.inner.drain_commands();
        serde_json::to_string(&commands).map_err(|e| to_js(StudioError::from(e)))
    }

    /// Render state as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(|e| to_js(StudioError::from(e)))
    }
}

fn to_js(err: StudioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
