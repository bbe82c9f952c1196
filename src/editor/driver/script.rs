use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::{EditorEvent, EditorSession, EventOutcome};
use crate::error::BentoError;
use crate::geometry::{PixelSize, Point};
use crate::logging::{DRIVER_TARGET, LogLevel, Logger, event_with_fields, field, text_field};

pub type DriverResult<T> = std::result::Result<T, ScriptDriverError>;

#[derive(Debug, Error)]
pub enum ScriptDriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error on line {line}: {message}")]
    Decode { line: usize, message: String },
    #[error("editor error: {0}")]
    Editor(#[from] BentoError),
}

/// One line of a script. Pointer coordinates are page pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ScriptCommand {
    Add,
    Remove { id: String },
    Select { id: String },
    Move { id: String, x: i32, y: i32 },
    Resize { id: String, w: i32, h: i32 },
    DragStart { id: String },
    DragMove { x: f32, y: f32 },
    Drop { x: f32, y: f32 },
    DragCancel,
    ResizeStart { id: String, x: f32, y: f32 },
    ResizeMove { x: f32, y: f32 },
    ResizeEnd,
    /// Shorthand for a full start/input/commit rename.
    Rename { id: String, label: String },
    Container {
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    },
    Clear,
    Generate,
}

impl ScriptCommand {
    pub fn into_events(self) -> Vec<EditorEvent> {
        match self {
            Self::Add => vec![EditorEvent::AddBlock],
            Self::Remove { id } => vec![EditorEvent::Remove { id }],
            Self::Select { id } => vec![EditorEvent::Select { id }],
            Self::Move { id, x, y } => vec![EditorEvent::MoveTo { id, x, y }],
            Self::Resize { id, w, h } => vec![EditorEvent::SetSpan { id, w, h }],
            Self::DragStart { id } => vec![EditorEvent::DragStart { id }],
            Self::DragMove { x, y } => vec![EditorEvent::DragMove {
                pointer: Point::new(x, y),
            }],
            Self::Drop { x, y } => vec![EditorEvent::Drop {
                pointer: Point::new(x, y),
            }],
            Self::DragCancel => vec![EditorEvent::DragCancel],
            Self::ResizeStart { id, x, y } => vec![EditorEvent::ResizeStart {
                id,
                pointer: Point::new(x, y),
            }],
            Self::ResizeMove { x, y } => vec![EditorEvent::ResizeMove {
                pointer: Point::new(x, y),
            }],
            Self::ResizeEnd => vec![EditorEvent::ResizeEnd],
            Self::Rename { id, label } => vec![
                EditorEvent::RenameStart { id },
                EditorEvent::RenameInput { text: label },
                EditorEvent::RenameCommit,
            ],
            Self::Container {
                left,
                top,
                width,
                height,
            } => vec![EditorEvent::ContainerResized {
                origin: Point::new(left, top),
                size: PixelSize::new(width, height),
            }],
            Self::Clear => vec![EditorEvent::ClearAll],
            Self::Generate => vec![EditorEvent::GenerateCode],
        }
    }
}

/// Response line written after each command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptResponse {
    pub outcome: &'static str,
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

/// Line-oriented driver: one JSON command in, one JSON response out.
pub struct ScriptDriver {
    session: EditorSession,
    logger: Option<Logger>,
}

impl ScriptDriver {
    pub fn new(session: EditorSession) -> Self {
        let logger = session.config().logger.clone();
        Self { session, logger }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn into_session(self) -> EditorSession {
        self.session
    }

    /// Process every line from `input`, writing responses to `output`.
    /// Returns the number of commands executed.
    pub fn run<R, W>(&mut self, input: R, mut output: W) -> DriverResult<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut executed = 0;
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command: ScriptCommand =
                serde_json::from_str(&line).map_err(|err| ScriptDriverError::Decode {
                    line: index + 1,
                    message: err.to_string(),
                })?;
            let response = self.execute(command);
            let encoded = serde_json::to_string(&response).map_err(BentoError::from)?;
            output.write_all(encoded.as_bytes())?;
            output.write_all(b"\n")?;
            executed += 1;
        }
        output.flush()?;
        self.log(
            LogLevel::Info,
            "script_finished",
            [field("commands", executed)],
        );
        Ok(executed)
    }

    /// Dispatch one command. The response reports the last event's outcome.
    pub fn execute(&mut self, command: ScriptCommand) -> ScriptResponse {
        let generate = matches!(command, ScriptCommand::Generate);
        let outcomes = self.session.run_scripted(command.into_events());
        let outcome = outcomes.last().copied().unwrap_or(EventOutcome::Ignored);

        let error = match outcome {
            EventOutcome::Failed(err) => Some(err.to_string()),
            _ => None,
        };
        let markup = if generate {
            self.session.generated_code().map(str::to_string)
        } else {
            None
        };
        self.log(
            LogLevel::Debug,
            "command_executed",
            [
                text_field("outcome", outcome.name()),
                field("items", self.session.store().len()),
            ],
        );

        ScriptResponse {
            outcome: outcome.name(),
            items: self.session.store().len(),
            error,
            markup,
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, DRIVER_TARGET, message, fields));
        }
    }
}
