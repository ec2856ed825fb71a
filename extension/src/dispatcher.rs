// Command dispatch for runtime messages
// Responses go through an explicit Responder instead of the host's
// "return true to keep the channel open" convention

use std::rc::Rc;

use serde_json::Value;

use crate::protocol::{Command, Response};
use crate::state::MonitoringState;

/// Response channel a command handler fulfils
pub trait Responder {
    fn respond(&mut self, response: Response);
}

impl<F> Responder for F
where
    F: FnMut(Response),
{
    fn respond(&mut self, response: Response) {
        self(response)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A response was delivered for this command
    Responded(Command),
    /// Unknown or malformed message, nothing delivered
    Ignored,
}

impl Dispatch {
    /// Whether the host should keep the message channel open
    pub fn keeps_channel_open(&self) -> bool {
        matches!(self, Dispatch::Responded(_))
    }
}

pub trait CommandHandler {
    fn handle(&self, request: &Value, responder: &mut dyn Responder) -> Dispatch;
}

#[derive(Clone)]
pub struct Dispatcher {
    state: Rc<MonitoringState>,
}

impl Dispatcher {
    pub fn new(state: Rc<MonitoringState>) -> Self {
        Self { state }
    }
}

impl CommandHandler for Dispatcher {
    fn handle(&self, request: &Value, responder: &mut dyn Responder) -> Dispatch {
        let Some(command) = Command::from_request(request) else {
            log::debug!("Ignoring message: {}", request);
            return Dispatch::Ignored;
        };

        log::debug!("Handling {}", command.action());

        let response = match command {
            Command::GetStatus => Response::from(self.state.status()),
            Command::ToggleMonitoring => Response::from(self.state.toggle()),
        };
        responder.respond(response);

        Dispatch::Responded(command)
    }
}
