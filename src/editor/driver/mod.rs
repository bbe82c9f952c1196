//! Drivers feed external input into an [`EditorSession`](super::EditorSession).

pub mod script;

pub use script::{DriverResult, ScriptCommand, ScriptDriver, ScriptDriverError, ScriptResponse};
