// Animation selection: deterministic ordering of whatever clips the model exposes.

/// Clips shown first, in this order, when the model has them (case-insensitive).
pub const PREFERRED_ANIMATIONS: [&str; 4] = ["Idle", "Walk", "Run", "Jump"];

/// Order raw clip names for display.
///
/// Empty names and case-insensitive duplicates are dropped, keeping the casing
/// seen first. Names matching [`PREFERRED_ANIMATIONS`] come first in that fixed
/// order; everything else follows in original relative order.
pub fn order_animations<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut unique: Vec<(String, String)> = Vec::with_capacity(raw.len());
    for name in raw {
        let name = name.as_ref();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if unique.iter().all(|(seen, _)| *seen != key) {
            unique.push((key, name.to_string()));
        }
    }

    let mut ordered = Vec::with_capacity(unique.len());
    for preferred in PREFERRED_ANIMATIONS {
        let key = preferred.to_lowercase();
        if let Some((_, original)) = unique.iter().find(|(seen, _)| *seen == key) {
            ordered.push(original.clone());
        }
    }

    let is_preferred = |key: &str| {
        PREFERRED_ANIMATIONS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(key))
    };
    ordered.extend(
        unique
            .into_iter()
            .filter(|(key, _)| !is_preferred(key))
            .map(|(_, original)| original),
    );

    ordered
}

/// Tracks the ordered clip list of the loaded model and the clip playing.
#[derive(Debug, Default)]
pub struct AnimationSelector {
    available: Vec<String>,
    active: String,
}

impl AnimationSelector {
    pub fn new() -> Self {
        AnimationSelector::default()
    }

    /// Model finished loading. Returns the clip to start, if any.
    pub fn on_loaded<S: AsRef<str>>(&mut self, raw: &[S]) -> Option<String> {
        self.available = order_animations(raw);
        self.active = self.available.first().cloned().unwrap_or_default();
        if self.active.is_empty() {
            None
        } else {
            Some(self.active.clone())
        }
    }

    /// Model failed to load, or a new one is about to.
    pub fn clear(&mut self) {
        self.available.clear();
        self.active.clear();
    }

    /// Mark `name` as playing. Returns false for empty or unlisted names.
    pub fn select(&mut self, name: &str) -> bool {
        if name.is_empty() || !self.available.iter().any(|a| a == name) {
            return false;
        }
        self.active = name.to_string();
        true
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Active clip name, empty when nothing plays.
    pub fn active(&self) -> &str {
        &self.active
    }
}
