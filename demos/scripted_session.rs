//! Runs a small JSON-lines script through the editor and prints the
//! responses, the exported markup, and the structured log.
//!
//! ```bash
//! cargo run --example scripted_session
//! # write the log to a rotating file instead of stdout
//! BENTO_LOG_FILE=/tmp/bento.jsonl BENTO_LOG_LEVEL=debug cargo run --example scripted_session
//! ```

use std::io;

use bento_grid::{
    EditorConfig, EditorSession, GridSettings, LayoutSnapshot, Logger, MemorySink, ScriptDriver,
    logging::LOG_FILE_ENV,
};

const SCRIPT: &str = r#"
{"type":"container","left":0,"top":0,"width":800,"height":600}
{"type":"add"}
{"type":"add"}
{"type":"add"}
{"type":"rename","id":"item-1","label":"Hero"}
{"type":"resize","id":"item-1","w":4,"h":2}
{"type":"resize","id":"item-2","w":3,"h":3}
{"type":"drag_start","id":"item-3"}
{"type":"drag_move","x":500,"y":400}
{"type":"drop","x":500,"y":400}
{"type":"generate"}
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink = MemorySink::new();
    let file_logger = Logger::from_env()?;
    let logger = file_logger
        .clone()
        .unwrap_or_else(|| Logger::new(sink.clone()));
    let settings = GridSettings::new(8, 6)?.with_gap(2.0);
    let mut config = EditorConfig::default()
        .with_settings(settings)
        .with_logger(logger);
    config.enable_metrics();

    let mut driver = ScriptDriver::new(EditorSession::new(config));
    let stdout = io::stdout();
    let executed = driver.run(SCRIPT.as_bytes(), stdout.lock())?;

    let session = driver.into_session();
    println!("\n-- {executed} commands --");
    println!("{}", LayoutSnapshot::of(session.store()).to_json_pretty()?);
    if let Some(code) = session.generated_code() {
        println!("\n{code}");
    }
    if let Some(snapshot) = session.metrics_snapshot() {
        println!("\nmoves={} rejected_moves={}", snapshot.moves, snapshot.rejected_moves);
    }

    if file_logger.is_some() {
        let path = std::env::var(LOG_FILE_ENV).unwrap_or_default();
        println!("\n-- log written to {path} --");
        return Ok(());
    }
    println!("\n-- log --");
    for line in sink.lines() {
        println!("{line}");
    }
    Ok(())
}
