// Tab navigation observer
// Watches completed page loads on the overlay site while monitoring is on

use std::rc::Rc;

use serde::Deserialize;

use crate::state::MonitoringState;

pub const STATUS_COMPLETE: &str = "complete";

/// Subset of `chrome.tabs.onUpdated` changeInfo
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeInfo {
    #[serde(default)]
    pub status: Option<String>,
}

/// Subset of `chrome.tabs.Tab`
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tab {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MonitoringInactive,
    NotComplete,
    NoUrl,
    OtherSite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Overlay site finished loading in this tab
    TargetLoaded { tab_id: i32 },
    Skipped(SkipReason),
}

pub trait NavigationHandler {
    fn on_tab_updated(&self, tab_id: i32, change_info: &ChangeInfo, tab: &Tab)
        -> NavigationOutcome;
}

#[derive(Clone)]
pub struct NavigationObserver {
    state: Rc<MonitoringState>,
    target_origin: String,
}

impl NavigationObserver {
    pub fn new(state: Rc<MonitoringState>, target_origin: impl Into<String>) -> Self {
        Self {
            state,
            target_origin: target_origin.into(),
        }
    }
}

impl NavigationHandler for NavigationObserver {
    fn on_tab_updated(
        &self,
        tab_id: i32,
        change_info: &ChangeInfo,
        tab: &Tab,
    ) -> NavigationOutcome {
        if !self.state.is_monitoring() {
            return NavigationOutcome::Skipped(SkipReason::MonitoringInactive);
        }

        if change_info.status.as_deref() != Some(STATUS_COMPLETE) {
            return NavigationOutcome::Skipped(SkipReason::NotComplete);
        }

        let url = match tab.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return NavigationOutcome::Skipped(SkipReason::NoUrl),
        };

        if !url.starts_with(&self.target_origin) {
            return NavigationOutcome::Skipped(SkipReason::OtherSite);
        }

        // Overlay activation hooks in here
        log::debug!("Target site loaded in tab {}", tab_id);
        log::info!("Wplace tab loaded - overlay can be activated");
        NavigationOutcome::TargetLoaded { tab_id }
    }
}
