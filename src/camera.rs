// Camera direction: preset transitions and the turntable tour.
// Tween and tour share one frame loop, so at most one of them runs at a time.

use log::debug;

use crate::catalog::PresetId;
use crate::scheduler::{FrameHandle, FrameLoop};
use crate::types::*;

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: CameraOrbit,
    /// Unwrapped target: theta is `from.theta` plus the shortest signed delta.
    to: CameraOrbit,
    started: Timestamp,
}

#[derive(Debug, Clone, Copy)]
enum CameraPhase {
    Idle,
    Tweening(Tween),
    Touring { last_frame: Option<Timestamp> },
}

/// Owns the camera orbit and drives it toward presets or around the subject.
pub struct CameraDirector {
    settings: CameraSettings,
    orbit: CameraOrbit,
    active_preset: PresetId,
    phase: CameraPhase,
    frames: FrameLoop,
}

impl CameraDirector {
    pub fn new(settings: CameraSettings, initial_preset: PresetId) -> Self {
        CameraDirector {
            settings,
            orbit: initial_preset.target().wrapped(),
            active_preset: initial_preset,
            phase: CameraPhase::Idle,
            frames: FrameLoop::new(),
        }
    }

    pub fn orbit(&self) -> CameraOrbit {
        self.orbit
    }

    pub fn active_preset(&self) -> PresetId {
        self.active_preset
    }

    pub fn phase(&self) -> CameraPhaseKind {
        match self.phase {
            CameraPhase::Idle => CameraPhaseKind::Idle,
            CameraPhase::Tweening(_) => CameraPhaseKind::Tweening,
            CameraPhase::Touring { .. } => CameraPhaseKind::Touring,
        }
    }

    pub fn is_touring(&self) -> bool {
        matches!(self.phase, CameraPhase::Touring { .. })
    }

    /// Handle of the running loop, if the host should keep requesting frames.
    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.frames.current()
    }

    /// Jump straight to `preset`, stopping any loop.
    pub fn snap_to(&mut self, preset: PresetId, out: &mut Vec<HostCommand>) {
        self.cancel();
        self.active_preset = preset;
        self.set_orbit(preset.target(), out);
    }

    /// Start an eased transition from the current orbit to `preset`.
    pub fn apply_preset(&mut self, preset: PresetId, now: Timestamp) -> FrameHandle {
        self.cancel();
        self.active_preset = preset;

        let from = self.orbit;
        let target = preset.target();
        let to = CameraOrbit {
            theta: from.theta + shortest_delta(from.theta, target.theta),
            ..target
        };
        debug!("camera: tween to preset {}", preset);

        self.phase = CameraPhase::Tweening(Tween {
            from,
            to,
            started: now,
        });
        self.frames.start()
    }

    /// Begin continuous rotation. Any tween in flight is dropped where it is.
    pub fn start_tour(&mut self) -> FrameHandle {
        self.cancel();
        debug!("camera: tour started");
        self.phase = CameraPhase::Touring { last_frame: None };
        self.frames.start()
    }

    pub fn stop_tour(&mut self) {
        if self.is_touring() {
            debug!("camera: tour stopped");
            self.cancel();
        }
    }

    /// Returns the new loop handle when the tour was started.
    pub fn toggle_tour(&mut self) -> Option<FrameHandle> {
        if self.is_touring() {
            self.stop_tour();
            None
        } else {
            Some(self.start_tour())
        }
    }

    /// Stop whichever loop is running. Idempotent.
    pub fn cancel(&mut self) {
        self.frames.cancel();
        self.phase = CameraPhase::Idle;
    }

    /// Advance the running loop. Returns true while more frames are wanted.
    /// Callbacks carrying a stale handle are ignored.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now: Timestamp,
        out: &mut Vec<HostCommand>,
    ) -> bool {
        if !self.frames.is_current(handle) {
            return false;
        }

        match self.phase {
            CameraPhase::Idle => {
                self.frames.cancel();
                false
            }
            CameraPhase::Tweening(tween) => {
                let duration = self.settings.tween_duration_ms.saturating_mul(1000).max(1);
                let ratio = (now.micros_since(tween.started) as f64 / duration as f64).min(1.0);
                let eased = self.settings.tween_easing.apply(ratio);

                let orbit = CameraOrbit {
                    theta: lerp(tween.from.theta, tween.to.theta, eased),
                    phi: lerp(tween.from.phi, tween.to.phi, eased),
                    radius: lerp(tween.from.radius, tween.to.radius, eased),
                };
                self.set_orbit(orbit, out);

                if ratio >= 1.0 {
                    self.cancel();
                    false
                } else {
                    true
                }
            }
            CameraPhase::Touring { last_frame } => {
                if let Some(last) = last_frame {
                    let dt = now.micros_since(last) as f64 / 1_000_000.0;
                    let orbit = CameraOrbit {
                        theta: self.orbit.theta + self.settings.tour_speed_deg_per_sec * dt,
                        ..self.orbit
                    };
                    self.set_orbit(orbit, out);
                }
                self.phase = CameraPhase::Touring {
                    last_frame: Some(now),
                };
                true
            }
        }
    }

    /// Single funnel for orbit writes: update state and mirror it to the viewer.
    fn set_orbit(&mut self, orbit: CameraOrbit, out: &mut Vec<HostCommand>) {
        self.orbit = orbit.wrapped();
        out.push(HostCommand::SetCameraOrbit {
            orbit: self.orbit.to_viewer_string(),
        });
    }
}

/// Signed angular difference `to - from`, normalized into (-180, 180].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn director_at(orbit: CameraOrbit) -> CameraDirector {
        let mut director = CameraDirector::new(CameraSettings::default(), PresetId::Front);
        director.orbit = orbit.wrapped();
        director
    }

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn shortest_delta_range() {
        assert_eq!(shortest_delta(170.0, -170.0), 20.0);
        assert_eq!(shortest_delta(-170.0, 170.0), -20.0);
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(180.0, 0.0), 180.0);
        assert_eq!(shortest_delta(10.0, 10.0), 0.0);
    }

    #[test]
    fn snap_writes_preset_immediately() {
        let mut director = director_at(CameraOrbit::new(45.0, 60.0, 90.0));
        let mut out = Vec::new();
        director.snap_to(PresetId::Right, &mut out);
        assert_eq!(director.orbit(), PresetId::Right.target());
        assert_eq!(director.active_preset(), PresetId::Right);
        assert_eq!(director.phase(), CameraPhaseKind::Idle);
        assert_eq!(
            out,
            vec![HostCommand::SetCameraOrbit {
                orbit: "90.00deg 75.00deg 105.00%".to_string()
            }]
        );
    }

    #[test]
    fn tween_takes_short_way_round() {
        let mut director = director_at(CameraOrbit::new(170.0, 75.0, 105.0));
        let mut out = Vec::new();
        let start = ms(1000);
        // Back preset is at 180; aim further, at -170, through a custom tween.
        let handle = director.apply_preset(PresetId::Back, start);
        if let CameraPhase::Tweening(ref mut tween) = director.phase {
            tween.to.theta = tween.from.theta + shortest_delta(170.0, -170.0);
        }

        let mut thetas = Vec::new();
        let mut t = 1000;
        while director.on_frame(handle, ms(t), &mut out) {
            thetas.push(director.orbit().theta);
            t += 16;
        }
        thetas.push(director.orbit().theta);

        assert!(thetas.iter().all(|&th| (170.0..=190.0).contains(&th)));
        assert!((director.orbit().theta - 190.0).abs() < 1e-9);
        assert_eq!(director.phase(), CameraPhaseKind::Idle);
    }

    #[test]
    fn tween_finishes_after_duration() {
        let mut director = director_at(CameraOrbit::new(0.0, 75.0, 105.0));
        let mut out = Vec::new();
        let handle = director.apply_preset(PresetId::Top, ms(0));

        assert!(director.on_frame(handle, ms(350), &mut out));
        let mid = director.orbit();
        // Ease-out at half time covers 87.5% of the way.
        assert!((mid.phi - (75.0 + (18.0 - 75.0) * 0.875)).abs() < 1e-9);

        assert!(!director.on_frame(handle, ms(700), &mut out));
        assert_eq!(director.orbit(), PresetId::Top.target());
        assert_eq!(director.frame_handle(), None);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn tween_to_negative_theta_wraps() {
        let mut director = director_at(CameraOrbit::new(0.0, 75.0, 105.0));
        let mut out = Vec::new();
        let handle = director.apply_preset(PresetId::Left, ms(0));
        director.on_frame(handle, ms(700), &mut out);
        assert!((director.orbit().theta - 270.0).abs() < 1e-9);
        assert_eq!(
            out.last(),
            Some(&HostCommand::SetCameraOrbit {
                orbit: "270.00deg 75.00deg 105.00%".to_string()
            })
        );
    }

    #[test]
    fn tour_advances_at_fixed_rate() {
        let mut director = director_at(CameraOrbit::new(350.0, 75.0, 105.0));
        let mut out = Vec::new();
        let handle = director.start_tour();

        assert!(director.on_frame(handle, ms(10_000), &mut out));
        assert!(out.is_empty(), "first frame only records the timestamp");
        assert!(director.on_frame(handle, ms(10_500), &mut out));
        assert!((director.orbit().theta - 2.0).abs() < 1e-9);
        assert_eq!(director.orbit().phi, 75.0);
        assert_eq!(director.orbit().radius, 105.0);
    }

    #[test]
    fn restarted_tour_recomputes_delta() {
        let mut director = director_at(CameraOrbit::new(0.0, 75.0, 105.0));
        let mut out = Vec::new();
        let handle = director.start_tour();
        director.on_frame(handle, ms(0), &mut out);
        director.on_frame(handle, ms(1000), &mut out);
        assert!((director.orbit().theta - 24.0).abs() < 1e-9);

        director.stop_tour();
        let handle = director.start_tour();
        director.on_frame(handle, ms(60_000), &mut out);
        assert!((director.orbit().theta - 24.0).abs() < 1e-9);
    }

    #[test]
    fn tour_cancels_tween() {
        let mut director = director_at(CameraOrbit::new(0.0, 75.0, 105.0));
        let mut out = Vec::new();
        let tween = director.apply_preset(PresetId::Back, ms(0));
        director.on_frame(tween, ms(100), &mut out);

        let tour = director.start_tour();
        assert_eq!(director.phase(), CameraPhaseKind::Touring);
        assert!(!director.on_frame(tween, ms(200), &mut out), "stale tween frame");
        assert!(director.on_frame(tour, ms(200), &mut out));
    }

    #[test]
    fn preset_stops_tour() {
        let mut director = director_at(CameraOrbit::new(0.0, 75.0, 105.0));
        let mut out = Vec::new();
        let tour = director.start_tour();
        director.on_frame(tour, ms(0), &mut out);

        let tween = director.apply_preset(PresetId::Front, ms(50));
        assert_eq!(director.phase(), CameraPhaseKind::Tweening);
        assert!(!director.on_frame(tour, ms(60), &mut out));
        assert!(director.on_frame(tween, ms(60), &mut out));
    }

    #[test]
    fn toggle_tour_flips() {
        let mut director = director_at(CameraOrbit::default());
        assert!(director.toggle_tour().is_some());
        assert!(director.is_touring());
        assert!(director.toggle_tour().is_none());
        assert_eq!(director.phase(), CameraPhaseKind::Idle);
    }

    proptest! {
        #[test]
        fn shortest_delta_is_half_open(from in -720.0f64..720.0, to in -720.0f64..720.0) {
            let d = shortest_delta(from, to);
            prop_assert!(d > -180.0 && d <= 180.0);
        }

        #[test]
        fn tween_never_leaves_short_arc(
            from in 0.0f64..360.0,
            to in 0.0f64..360.0,
            steps in prop::collection::vec(1u64..120, 1..30)
        ) {
            let mut director = director_at(CameraOrbit::new(from, 75.0, 105.0));
            let mut out = Vec::new();
            let handle = director.apply_preset(PresetId::Front, ms(0));
            let delta = shortest_delta(from, to);
            if let CameraPhase::Tweening(ref mut tween) = director.phase {
                tween.to.theta = from + delta;
            }
            let mut t = 0;
            for step in steps {
                t += step;
                director.on_frame(handle, ms(t), &mut out);
                let travelled = shortest_delta(from, director.orbit().theta);
                prop_assert!(travelled.abs() <= delta.abs() + 1e-6);
                prop_assert!(travelled * delta >= -1e-6);
            }
        }

        #[test]
        fn tour_theta_stays_wrapped(steps in prop::collection::vec(1u64..5000, 1..40)) {
            let mut director = director_at(CameraOrbit::default());
            let mut out = Vec::new();
            let handle = director.start_tour();
            let mut t = 0;
            for step in steps {
                t += step;
                director.on_frame(handle, ms(t), &mut out);
                let theta = director.orbit().theta;
                prop_assert!((0.0..360.0).contains(&theta));
            }
        }
    }
}
