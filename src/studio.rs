// The viewer controller: one state bag shared by animation selection, camera direction,
// wellness simulation, and sound. All host effects go through the command outbox.

use log::{debug, info, warn};

use crate::animation::AnimationSelector;
use crate::camera::CameraDirector;
use crate::catalog::{PresetId, Subject, SubjectId};
use crate::error::StudioError;
use crate::scheduler::{FrameHandle, IntervalTimer};
use crate::sound::SoundController;
use crate::types::*;
use crate::wellness::{HealthAction, WellnessSimulator};

/// Complete pet studio state.
pub struct Studio {
    subject: SubjectId,
    is_loading: bool,
    viewer_attached: bool,
    /// The first successful load snaps the camera; later loads keep the orbit.
    framed: bool,
    animations: AnimationSelector,
    camera: CameraDirector,
    wellness: WellnessSimulator,
    wellness_timer: IntervalTimer,
    sound: SoundController,
    sound_mood_boost: f64,
    outbox: Vec<HostCommand>,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Result<Self, StudioError> {
        validate(&config)?;
        let subject: SubjectId = config
            .initial_subject
            .parse()
            .map_err(|e: StudioError| StudioError::InvalidConfig(e.to_string()))?;
        let preset: PresetId = config
            .initial_preset
            .parse()
            .map_err(|e: StudioError| StudioError::InvalidConfig(e.to_string()))?;

        Ok(Studio {
            subject,
            is_loading: true,
            viewer_attached: false,
            framed: false,
            animations: AnimationSelector::new(),
            camera: CameraDirector::new(config.camera, preset),
            wellness: WellnessSimulator::new(subject.subject().base_health),
            wellness_timer: IntervalTimer::new(config.wellness.tick_interval_ms),
            sound: SoundController::new(),
            sound_mood_boost: config.wellness.sound_mood_boost,
            outbox: Vec::new(),
        })
    }

    pub fn from_json(config_json: &str) -> Result<Self, StudioError> {
        let config: StudioConfig = serde_json::from_str(config_json)
            .map_err(|e| StudioError::InvalidConfig(e.to_string()))?;
        Studio::new(config)
    }

    // ----- subject -----

    pub fn subject(&self) -> &'static Subject {
        self.subject.subject()
    }

    /// Switch subjects. Loops and sound from the old subject are torn down before
    /// anything is reinitialized. The camera preset carries over.
    pub fn select_subject(&mut self, id: SubjectId) {
        if id == self.subject {
            return;
        }
        info!("studio: switching subject {} -> {}", self.subject, id);
        self.teardown();
        self.subject = id;
        self.is_loading = true;
        self.animations.clear();
        self.wellness.reset(id.subject().base_health);
    }

    /// Like [`Studio::select_subject`]; unknown ids are ignored.
    pub fn select_subject_by_id(&mut self, id: &str) {
        match id.parse() {
            Ok(id) => self.select_subject(id),
            Err(e) => debug!("studio: ignoring subject selection: {}", e),
        }
    }

    // ----- viewer lifecycle -----

    pub fn attach_viewer(&mut self) {
        self.viewer_attached = true;
    }

    pub fn detach_viewer(&mut self) {
        self.viewer_attached = false;
        self.camera.cancel();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The viewer finished loading the model and reports its clips.
    pub fn model_loaded<S: AsRef<str>>(&mut self, raw_animations: &[S], now: Timestamp) {
        if !self.viewer_attached {
            debug!("studio: load event without an attached viewer");
            return;
        }

        if let Some(first) = self.animations.on_loaded(raw_animations) {
            self.outbox.push(HostCommand::SetAnimation { name: first });
            self.outbox.push(HostCommand::PlayAnimation);
        }
        info!(
            "studio: {} loaded with {} animations",
            self.subject,
            self.animations.available().len()
        );

        self.is_loading = false;
        // A repeated load report for the same model keeps the running cadence.
        if !self.wellness_timer.is_armed() {
            self.wellness_timer.start(now);
        }

        if !self.framed {
            self.framed = true;
            let preset = self.camera.active_preset();
            self.camera.snap_to(preset, &mut self.outbox);
        }
    }

    /// The viewer could not load the model. No retry.
    pub fn model_failed(&mut self) {
        warn!("studio: model for {} failed to load", self.subject);
        self.is_loading = false;
        self.animations.clear();
        self.wellness_timer.stop();
    }

    // ----- animation -----

    pub fn available_animations(&self) -> &[String] {
        self.animations.available()
    }

    pub fn active_animation(&self) -> &str {
        self.animations.active()
    }

    /// Play a listed clip. No effect without a viewer or for empty/unlisted names.
    pub fn play_animation(&mut self, name: &str) -> bool {
        if !self.viewer_attached || !self.animations.select(name) {
            return false;
        }
        self.outbox.push(HostCommand::SetAnimation {
            name: name.to_string(),
        });
        self.outbox.push(HostCommand::PlayAnimation);
        true
    }

    // ----- camera -----

    pub fn orbit(&self) -> CameraOrbit {
        self.camera.orbit()
    }

    pub fn camera_phase(&self) -> CameraPhaseKind {
        self.camera.phase()
    }

    pub fn active_preset(&self) -> PresetId {
        self.camera.active_preset()
    }

    /// Start an eased move to `preset`, stopping a tour or earlier move.
    pub fn apply_preset(&mut self, preset: PresetId, now: Timestamp) -> FrameHandle {
        self.camera.apply_preset(preset, now)
    }

    /// Like [`Studio::apply_preset`]; unknown ids are ignored.
    pub fn apply_preset_by_id(&mut self, id: &str, now: Timestamp) -> Option<FrameHandle> {
        match id.parse() {
            Ok(preset) => Some(self.apply_preset(preset, now)),
            Err(e) => {
                debug!("studio: ignoring preset: {}", e);
                None
            }
        }
    }

    pub fn toggle_tour(&mut self) -> Option<FrameHandle> {
        self.camera.toggle_tour()
    }

    pub fn stop_tour(&mut self) {
        self.camera.stop_tour();
    }

    /// Handle of the running camera loop, if any.
    pub fn camera_frame_handle(&self) -> Option<FrameHandle> {
        self.camera.frame_handle()
    }

    /// Run one camera frame for `handle`. Returns true while more frames are wanted.
    pub fn camera_frame(&mut self, handle: FrameHandle, now: Timestamp) -> bool {
        self.camera.on_frame(handle, now, &mut self.outbox)
    }

    // ----- wellness -----

    pub fn health(&self) -> HealthProfile {
        self.wellness.profile()
    }

    pub fn perform_action(&mut self, action: HealthAction) {
        debug!("studio: {} for {}", action.as_str(), self.subject);
        self.wellness.perform(action);
    }

    /// Like [`Studio::perform_action`]; unknown ids are ignored.
    pub fn perform_action_by_id(&mut self, id: &str) {
        match id.parse() {
            Ok(action) => self.perform_action(action),
            Err(e) => debug!("studio: ignoring action: {}", e),
        }
    }

    /// Apply the passive wellness tick if it is due.
    pub fn poll_wellness(&mut self, now: Timestamp) -> bool {
        if self.is_loading || !self.wellness_timer.poll(now) {
            return false;
        }
        self.wellness.tick(self.animations.active());
        true
    }

    // ----- sound -----

    pub fn is_playing_sound(&self) -> bool {
        self.sound.is_playing()
    }

    pub fn current_sound(&self) -> Option<SoundInstanceId> {
        self.sound.current_instance()
    }

    pub fn toggle_sound(&mut self) {
        let path = self.subject().sound_path;
        self.sound.toggle(path, &mut self.outbox);
    }

    pub fn start_sound(&mut self) -> SoundInstanceId {
        let path = self.subject().sound_path;
        self.sound.start(path, &mut self.outbox)
    }

    pub fn stop_sound(&mut self) {
        self.sound.stop(&mut self.outbox);
    }

    pub fn sound_started(&mut self, instance: SoundInstanceId) {
        if self.sound.on_started(instance) {
            self.wellness.boost_mood(self.sound_mood_boost);
        }
    }

    pub fn sound_failed(&mut self, instance: SoundInstanceId) {
        self.sound.on_failed(instance);
    }

    pub fn sound_ended(&mut self, instance: SoundInstanceId) {
        self.sound.on_ended(instance);
    }

    // ----- frame driver -----

    /// Host frame callback: advances the running camera loop and the wellness
    /// timer. Returns true while the camera wants more frames.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        let camera_running = match self.camera.frame_handle() {
            Some(handle) => self.camera.on_frame(handle, now, &mut self.outbox),
            None => false,
        };
        self.poll_wellness(now);
        camera_running
    }

    /// Cancel every loop and silence sound. Used on subject switch and unmount.
    pub fn teardown(&mut self) {
        self.camera.cancel();
        self.wellness_timer.stop();
        self.sound.stop(&mut self.outbox);
    }

    /// Commands emitted since the last drain, in order.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> StudioSnapshot {
        let orbit = self.camera.orbit();
        StudioSnapshot {
            subject: self.subject().view(),
            is_loading: self.is_loading,
            model_status: if self.is_loading {
                "Loading model...".to_string()
            } else {
                "Model ready".to_string()
            },
            available_animations: self.animations.available().to_vec(),
            active_animation: self.animations.active().to_string(),
            is_playing_sound: self.sound.is_playing(),
            orbit,
            camera_orbit: orbit.to_viewer_string(),
            active_preset: self.camera.active_preset().as_str().to_string(),
            camera_phase: self.camera.phase(),
            health: self.wellness.profile(),
            health_score: self.wellness.score(),
            health_status: self.wellness.status().label().to_string(),
        }
    }
}

fn validate(config: &StudioConfig) -> Result<(), StudioError> {
    if config.camera.tween_duration_ms == 0 {
        return Err(StudioError::InvalidConfig(
            "camera.tween_duration_ms must be positive".to_string(),
        ));
    }
    if !config.camera.tour_speed_deg_per_sec.is_finite() {
        return Err(StudioError::InvalidConfig(
            "camera.tour_speed_deg_per_sec must be finite".to_string(),
        ));
    }
    if config.wellness.tick_interval_ms == 0 {
        return Err(StudioError::InvalidConfig(
            "wellness.tick_interval_ms must be positive".to_string(),
        ));
    }
    if !config.wellness.sound_mood_boost.is_finite() {
        return Err(StudioError::InvalidConfig(
            "wellness.sound_mood_boost must be finite".to_string(),
        ));
    }
    Ok(())
}
