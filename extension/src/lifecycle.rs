// Service worker lifecycle hooks (onStartup / onInstalled)

use serde::Deserialize;

use crate::state::MonitoringState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallReason {
    Install,
    Update,
    ChromeUpdate,
    SharedModuleUpdate,
    Other,
}

impl InstallReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallReason::Install => "install",
            InstallReason::Update => "update",
            InstallReason::ChromeUpdate => "chrome_update",
            InstallReason::SharedModuleUpdate => "shared_module_update",
            InstallReason::Other => "other",
        }
    }
}

impl From<&str> for InstallReason {
    fn from(reason: &str) -> Self {
        match reason {
            "install" => InstallReason::Install,
            "update" => InstallReason::Update,
            "chrome_update" => InstallReason::ChromeUpdate,
            "shared_module_update" => InstallReason::SharedModuleUpdate,
            _ => InstallReason::Other,
        }
    }
}

/// `chrome.runtime.onInstalled` details
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstalledDetails {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub previous_version: Option<String>,
}

impl InstalledDetails {
    pub fn reason(&self) -> InstallReason {
        self.reason
            .as_deref()
            .map(InstallReason::from)
            .unwrap_or(InstallReason::Other)
    }
}

pub fn on_startup(state: &MonitoringState) {
    state.reset_session();
    log::info!("Wplace overlay extension started");
}

pub fn on_installed(state: &MonitoringState, details: &InstalledDetails) -> InstallReason {
    state.reset_session();

    let reason = details.reason();
    match details.previous_version.as_deref() {
        Some(previous) => log::info!(
            "Wplace overlay extension installed ({}, previous version {})",
            reason.as_str(),
            previous
        ),
        None => log::info!("Wplace overlay extension installed ({})", reason.as_str()),
    }
    reason
}
