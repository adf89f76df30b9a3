//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Storage (LocalStorage on web)
//! - Animation-frame handles

/// Milliseconds of wall-clock time, comparable across calls
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Browser LocalStorage, when available
#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}

/// Owner of a scheduled animation-frame callback id.
///
/// Cancelling is take-once: the id comes out exactly one time no matter how
/// often disposal runs, which is what makes `dispose` idempotent.
#[derive(Debug, Default)]
pub struct FrameHandle {
    id: Option<i32>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self { id: None }
    }

    /// Record the id of the next scheduled frame, replacing any previous one
    pub fn arm(&mut self, id: i32) {
        self.id = Some(id);
    }

    /// Take the pending id for cancellation. Subsequent calls return `None`.
    pub fn take(&mut self) -> Option<i32> {
        self.id.take()
    }

    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_handle_cancels_once() {
        let mut handle = FrameHandle::new();
        assert!(!handle.is_armed());

        handle.arm(42);
        assert!(handle.is_armed());
        assert_eq!(handle.take(), Some(42));

        // Double disposal sees nothing to cancel
        assert_eq!(handle.take(), None);
        assert!(!handle.is_armed());
    }

    #[test]
    fn test_rearm_replaces_previous_id() {
        let mut handle = FrameHandle::new();
        handle.arm(1);
        handle.arm(2);
        assert_eq!(handle.take(), Some(2));
        assert_eq!(handle.take(), None);
    }

    #[test]
    fn test_now_ms_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
