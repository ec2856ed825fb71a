// Monitoring state shared by the message dispatcher, the tab observer
// and the lifecycle hooks. Single-threaded service worker, so Cell is enough.

use std::cell::Cell;
use std::rc::Rc;

use crate::clock::Clock;
use crate::protocol::{StatusResponse, ToggleResponse};

const MS_PER_MINUTE: f64 = 60_000.0;

pub struct MonitoringState {
    clock: Rc<dyn Clock>,
    monitoring: Cell<bool>,
    session_start_ms: Cell<f64>,
}

impl MonitoringState {
    pub fn new(clock: Rc<dyn Clock>, monitoring_on_load: bool) -> Self {
        let session_start_ms = clock.now_ms();
        Self {
            clock,
            monitoring: Cell::new(monitoring_on_load),
            session_start_ms: Cell::new(session_start_ms),
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.get()
    }

    /// Whole minutes since the session started (clock skew reads as 0)
    pub fn session_duration_minutes(&self) -> u64 {
        let elapsed = self.clock.now_ms() - self.session_start_ms.get();
        if elapsed <= 0.0 {
            return 0;
        }
        (elapsed / MS_PER_MINUTE).floor() as u64
    }

    #[cfg(test)]
    pub(crate) fn session_start_ms(&self) -> f64 {
        self.session_start_ms.get()
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            success: true,
            monitoring: self.is_monitoring(),
            session_duration: self.session_duration_minutes(),
        }
    }

    pub fn toggle(&self) -> ToggleResponse {
        let monitoring = !self.monitoring.get();
        self.monitoring.set(monitoring);
        log::info!(
            "Monitoring {}",
            if monitoring { "enabled" } else { "disabled" }
        );

        ToggleResponse {
            success: true,
            monitoring,
        }
    }

    /// Restart the session clock. A clock that went backwards leaves the start untouched.
    pub fn reset_session(&self) {
        let now = self.clock.now_ms();
        if now >= self.session_start_ms.get() {
            self.session_start_ms.set(now);
        } else {
            log::warn!(
                "Clock moved backwards ({} < {}), keeping session start",
                now,
                self.session_start_ms.get()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn state_with_clock(start_ms: f64) -> (Rc<ManualClock>, MonitoringState) {
        let clock = Rc::new(ManualClock::new(start_ms));
        let state = MonitoringState::new(clock.clone(), true);
        (clock, state)
    }

    #[test]
    fn test_toggle_parity() {
        for toggles in 0..7 {
            let (_clock, state) = state_with_clock(0.0);
            for _ in 0..toggles {
                state.toggle();
            }
            assert_eq!(state.is_monitoring(), toggles % 2 == 0, "after {} toggles", toggles);
        }
    }

    #[test]
    fn test_toggle_returns_new_value() {
        let (_clock, state) = state_with_clock(0.0);

        let response = state.toggle();
        assert!(response.success);
        assert!(!response.monitoring);

        let response = state.toggle();
        assert!(response.monitoring);
    }

    #[test]
    fn test_status_does_not_mutate_flag() {
        let (_clock, state) = state_with_clock(0.0);
        for _ in 0..5 {
            assert!(state.status().monitoring);
        }
        assert!(state.is_monitoring());

        state.toggle();
        for _ in 0..5 {
            assert!(!state.status().monitoring);
        }
        assert!(!state.is_monitoring());
    }

    #[test]
    fn test_session_duration_floors_to_minutes() {
        let (clock, state) = state_with_clock(10_000.0);
        assert_eq!(state.status().session_duration, 0);

        clock.advance_ms(59_999.0);
        assert_eq!(state.status().session_duration, 0);

        clock.advance_ms(1.0);
        assert_eq!(state.status().session_duration, 1);

        clock.advance_ms(4.0 * 60_000.0 + 30_000.0);
        assert_eq!(state.status().session_duration, 5);
    }

    #[test]
    fn test_reset_session_zeroes_duration() {
        let (clock, state) = state_with_clock(0.0);
        clock.advance_ms(30.0 * 60_000.0);
        assert_eq!(state.status().session_duration, 30);

        state.reset_session();
        assert_eq!(state.status().session_duration, 0);
        assert_eq!(state.session_start_ms(), 30.0 * 60_000.0);
    }

    #[test]
    fn test_reset_session_never_moves_backwards() {
        let (clock, state) = state_with_clock(100_000.0);
        clock.set_ms(50_000.0);

        state.reset_session();
        assert_eq!(state.session_start_ms(), 100_000.0);
        // Skewed clock reports zero rather than a negative duration
        assert_eq!(state.session_duration_minutes(), 0);
    }

    #[test]
    fn test_initial_flag_follows_constructor() {
        let clock = Rc::new(ManualClock::new(0.0));
        let state = MonitoringState::new(clock, false);
        assert!(!state.is_monitoring());
    }
}
