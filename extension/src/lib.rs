//! Background core for the Wplace overlay extension.
//!
//! Everything here is plain Rust so it can be unit tested natively. The
//! `background` binary is the wasm-bindgen shell that forwards Chrome events
//! into [`Background`].

pub mod checksum;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod protocol;
pub mod runtime;
pub mod state;

pub use checksum::hash_string;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ExtensionConfig;
pub use dispatcher::{CommandHandler, Dispatch, Dispatcher, Responder};
pub use error::{ExtensionError, Result};
pub use lifecycle::{InstallReason, InstalledDetails};
pub use navigation::{ChangeInfo, NavigationHandler, NavigationObserver, NavigationOutcome, Tab};
pub use protocol::{Command, Response, StatusResponse, ToggleResponse};
pub use runtime::Background;
pub use state::MonitoringState;
