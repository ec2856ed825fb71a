// Composition root for the background worker
// Owns the shared monitoring state and hands it to each event handler

use std::rc::Rc;

use serde_json::Value;

use crate::clock::Clock;
use crate::config::ExtensionConfig;
use crate::dispatcher::{CommandHandler, Dispatch, Dispatcher, Responder};
use crate::lifecycle::{self, InstallReason, InstalledDetails};
use crate::navigation::{
    ChangeInfo, NavigationHandler, NavigationObserver, NavigationOutcome, Tab,
};
use crate::state::MonitoringState;

#[derive(Clone)]
pub struct Background {
    config: Rc<ExtensionConfig>,
    state: Rc<MonitoringState>,
    dispatcher: Dispatcher,
    observer: NavigationObserver,
}

impl Background {
    pub fn new(config: ExtensionConfig, clock: Rc<dyn Clock>) -> Self {
        let state = Rc::new(MonitoringState::new(clock, config.monitoring_on_load));
        let dispatcher = Dispatcher::new(state.clone());
        let observer = NavigationObserver::new(state.clone(), config.target_origin.clone());

        log::info!(
            "Background initialized (monitoring: {}, target: {})",
            state.is_monitoring(),
            config.target_origin
        );

        Self {
            config: Rc::new(config),
            state,
            dispatcher,
            observer,
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn state(&self) -> &MonitoringState {
        &self.state
    }

    pub fn handle_message(&self, request: &Value, responder: &mut dyn Responder) -> Dispatch {
        self.dispatcher.handle(request, responder)
    }

    pub fn handle_tab_updated(
        &self,
        tab_id: i32,
        change_info: &ChangeInfo,
        tab: &Tab,
    ) -> NavigationOutcome {
        self.observer.on_tab_updated(tab_id, change_info, tab)
    }

    pub fn handle_startup(&self) {
        lifecycle::on_startup(&self.state);
    }

    pub fn handle_install(&self, details: &InstalledDetails) -> InstallReason {
        lifecycle::on_installed(&self.state, details)
    }
}
