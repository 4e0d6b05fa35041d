use std::sync::Arc;

use serde::Serialize;
use structured_facade::{ContextValue, JsonSink, LogSink, Sink, StructuredLogger, Target};

#[derive(Debug, Serialize)]
struct Operation {
    action: String,
    name: String,
}

fn try_init_logger() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = log::LevelFilter::Info;

    let logger = structured_logger::Builder::with_level(level.as_str())
        .with_target_writer("*", structured_logger::json::new_writer(std::io::stdout()))
        .build();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    try_init_logger()?;

    // Records forwarded to the installed `structured-logger` JSON writer.
    let forwarded: Arc<dyn Sink> = Arc::new(LogSink::new().with_target("demo"));
    // Records rendered directly as JSON lines.
    let direct: Arc<dyn Sink> = Arc::new(JsonSink::stdout().with_name("demo"));

    for sink in [forwarded, direct] {
        let logger = StructuredLogger::with_sink(Some(Target::new("demo.json")?), sink)?
            .with_context("instance", "structured_log_json");

        let alice = logger
            .with_context("name", "Alice")
            .with_context("age", 25)
            .with_context("married", true);
        alice.info("Another user pending")?;

        alice
            .with_context(
                "operation",
                ContextValue::serde(Operation {
                    action: "logout".to_owned(),
                    name: "Alice".to_owned(),
                }),
            )
            .warn("User logged out")?;

        logger.info("Last call completed")?;
    }

    Ok(())
}
