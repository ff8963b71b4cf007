//! Auto-save scheduling.
//!
//! Decides when the current project is due to be written again. The actual
//! write goes through [`super::ProjectStore`].

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Tracks unsaved changes and the time of the last save.
#[derive(Debug, Clone)]
pub struct AutoSaveManager {
    enabled: bool,
    interval: Duration,
    last_save: Instant,
    dirty: bool,
}

impl Default for AutoSaveManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS))
    }
}

impl AutoSaveManager {
    pub fn new(interval: Duration) -> Self {
        Self {
            enabled: true,
            interval,
            last_save: Instant::now(),
            dirty: false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record an unsaved change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a save is due at `now`: enabled, dirty, and a full interval
    /// since the last save.
    pub fn should_save_at(&self, now: Instant) -> bool {
        self.enabled && self.dirty && now.saturating_duration_since(self.last_save) >= self.interval
    }

    pub fn should_save(&self) -> bool {
        self.should_save_at(Instant::now())
    }

    /// Record a completed save at `now`.
    pub fn mark_saved_at(&mut self, now: Instant) {
        self.last_save = now;
        self.dirty = false;
    }

    pub fn mark_saved(&mut self) {
        self.mark_saved_at(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosave_manager_creation() {
        let manager = AutoSaveManager::default();
        assert!(manager.is_enabled());
        assert!(!manager.is_dirty());
        assert_eq!(manager.interval(), Duration::from_secs(30));
        assert!(!manager.should_save());
    }

    #[test]
    fn test_waits_full_interval() {
        let mut manager = AutoSaveManager::default();
        let start = Instant::now();
        manager.mark_saved_at(start);
        manager.mark_dirty();
        assert!(!manager.should_save_at(start + Duration::from_secs(29)));
        assert!(manager.should_save_at(start + Duration::from_secs(30)));
    }

    #[test]
    fn test_clean_never_saves() {
        let mut manager = AutoSaveManager::default();
        let start = Instant::now();
        manager.mark_saved_at(start);
        assert!(!manager.should_save_at(start + Duration::from_secs(300)));
    }

    #[test]
    fn test_save_clears_dirty() {
        let mut manager = AutoSaveManager::default();
        let start = Instant::now();
        manager.mark_dirty();
        manager.mark_saved_at(start);
        assert!(!manager.is_dirty());
        assert!(!manager.should_save_at(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_disabled() {
        let mut manager = AutoSaveManager::new(Duration::from_secs(1));
        let start = Instant::now();
        manager.mark_saved_at(start);
        manager.mark_dirty();
        manager.set_enabled(false);
        assert!(!manager.should_save_at(start + Duration::from_secs(5)));
        manager.set_enabled(true);
        assert!(manager.should_save_at(start + Duration::from_secs(5)));
    }
}
