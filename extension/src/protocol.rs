// Message protocol between extension contexts and the background worker
// Requests carry an `action` field; responses are camelCase JSON

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    GetStatus,
    ToggleMonitoring,
}

impl Command {
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "getStatus" => Some(Command::GetStatus),
            "toggleMonitoring" => Some(Command::ToggleMonitoring),
            _ => None,
        }
    }

    /// Decode a raw message; anything without a known string `action` is `None`
    pub fn from_request(request: &Value) -> Option<Self> {
        request
            .get("action")
            .and_then(Value::as_str)
            .and_then(Self::from_action)
    }

    pub fn action(&self) -> &'static str {
        match self {
            Command::GetStatus => "getStatus",
            Command::ToggleMonitoring => "toggleMonitoring",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub monitoring: bool,
    pub session_duration: u64, // whole minutes
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ToggleResponse {
    pub success: bool,
    pub monitoring: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Response {
    Status(StatusResponse),
    Toggle(ToggleResponse),
}

impl Response {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<StatusResponse> for Response {
    fn from(response: StatusResponse) -> Self {
        Response::Status(response)
    }
}

impl From<ToggleResponse> for Response {
    fn from(response: ToggleResponse) -> Self {
        Response::Toggle(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_actions() {
        assert_eq!(
            Command::from_request(&json!({"action": "getStatus"})),
            Some(Command::GetStatus)
        );
        assert_eq!(
            Command::from_request(&json!({"action": "toggleMonitoring", "extra": 1})),
            Some(Command::ToggleMonitoring)
        );
    }

    #[test]
    fn test_unrecognised_requests() {
        assert_eq!(Command::from_request(&json!({"action": "unknown"})), None);
        assert_eq!(Command::from_request(&json!({"action": "GetStatus"})), None);
        assert_eq!(Command::from_request(&json!({"action": 7})), None);
        assert_eq!(Command::from_request(&json!({})), None);
        assert_eq!(Command::from_request(&json!("getStatus")), None);
        assert_eq!(Command::from_request(&Value::Null), None);
    }

    #[test]
    fn test_action_names_match_decoder() {
        for command in [Command::GetStatus, Command::ToggleMonitoring] {
            assert_eq!(Command::from_action(command.action()), Some(command));
        }
    }

    #[test]
    fn test_wire_field_names() {
        let status = Response::from(StatusResponse {
            success: true,
            monitoring: false,
            session_duration: 12,
        });
        let value: Value = serde_json::from_str(&status.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "monitoring": false, "sessionDuration": 12})
        );

        let toggle = Response::from(ToggleResponse {
            success: true,
            monitoring: true,
        });
        let value: Value = serde_json::from_str(&toggle.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"success": true, "monitoring": true}));
    }
}
