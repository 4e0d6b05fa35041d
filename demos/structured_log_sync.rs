use serde::Serialize;
use structured_facade::{ContextValue, StructuredLogger};

#[derive(Debug, Serialize)]
struct Operation {
    action: String,
    name: String,
}

fn try_init_logger() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .build();
    let level = env_logger.filter();

    log::set_boxed_logger(Box::new(env_logger))?;
    log::set_max_level(level);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    try_init_logger()?;

    let logger = StructuredLogger::for_target("demo.sync")?;
    logger.info("Initialized structured logger")?;

    let user_logger = logger.with_context("user_id", "12345");
    user_logger.info("Logging in")?;

    user_logger
        .with_context(
            "action",
            ContextValue::serde(Operation {
                action: "login".to_string(),
                name: "user".to_string(),
            }),
        )
        .info("User logged in successfully")?;

    // Filtered out by env_logger, the operation above is not serialized again.
    user_logger.debug("Session details")?;
    user_logger.info("Login completed")?;

    Ok(())
}
