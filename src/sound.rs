// Single-flight sound playback. The host owns the audio element; this tracks which
// instance is current and whether it is audibly playing.

use log::{debug, warn};

use crate::types::{HostCommand, SoundInstanceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackState {
    /// `play()` issued, host has not reported back yet.
    Pending,
    Playing,
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    instance: SoundInstanceId,
    state: PlaybackState,
}

/// Tracks at most one live audio instance.
#[derive(Debug, Default)]
pub struct SoundController {
    current: Option<Playback>,
    issued: u32,
}

impl SoundController {
    pub fn new() -> Self {
        SoundController::default()
    }

    pub fn is_playing(&self) -> bool {
        matches!(
            self.current,
            Some(Playback {
                state: PlaybackState::Playing,
                ..
            })
        )
    }

    /// The live instance, pending or playing.
    pub fn current_instance(&self) -> Option<SoundInstanceId> {
        self.current.map(|p| p.instance)
    }

    /// Stop whatever is alive, then start `path` as a new instance.
    pub fn start(&mut self, path: &str, out: &mut Vec<HostCommand>) -> SoundInstanceId {
        self.stop(out);
        self.issued = self.issued.wrapping_add(1);
        let instance = SoundInstanceId::new(self.issued);
        self.current = Some(Playback {
            instance,
            state: PlaybackState::Pending,
        });
        debug!("sound: start {} as instance {}", path, instance.as_u32());
        out.push(HostCommand::PlaySound {
            instance,
            path: path.to_string(),
        });
        instance
    }

    /// Halt and rewind the live instance, if any. Idempotent.
    pub fn stop(&mut self, out: &mut Vec<HostCommand>) {
        if let Some(playback) = self.current.take() {
            out.push(HostCommand::StopSound {
                instance: playback.instance,
            });
        }
    }

    /// Stop when playing, otherwise start. Returns true if a new instance was started.
    pub fn toggle(&mut self, path: &str, out: &mut Vec<HostCommand>) -> bool {
        if self.is_playing() {
            self.stop(out);
            false
        } else {
            self.start(path, out);
            true
        }
    }

    /// Host resolved `play()`. Returns true if this made the current instance audible.
    pub fn on_started(&mut self, instance: SoundInstanceId) -> bool {
        match self.current.as_mut() {
            Some(p) if p.instance == instance && p.state == PlaybackState::Pending => {
                p.state = PlaybackState::Playing;
                true
            }
            _ => false,
        }
    }

    /// Host rejected `play()`, e.g. blocked by autoplay policy.
    pub fn on_failed(&mut self, instance: SoundInstanceId) {
        if self.current_instance() == Some(instance) {
            warn!("sound: playback of instance {} rejected", instance.as_u32());
            self.current = None;
        }
    }

    /// Playback reached its natural end.
    pub fn on_ended(&mut self, instance: SoundInstanceId) {
        if self.current_instance() == Some(instance) {
            self.current = None;
        }
    }
}
