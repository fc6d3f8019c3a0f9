//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Cosmos API key from leaking into logs or error details.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const REDACTED: &str = "[REDACTED_API_KEY]";

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Sanitizes an API key out of a message.
///
/// Replaces every occurrence of `secret` with a `\[REDACTED_API_KEY\]`
/// placeholder, as well as the value of any `apikey` header or field the
/// platform echoes back.
///
/// # Arguments
///
/// * `input` - The raw string that may contain the key.
/// * `secret` - The key to scrub.
pub fn sanitize(input: &str, secret: &str) -> String {
    let mut result = if secret.is_empty() {
        input.to_string()
    } else {
        input.replace(secret, REDACTED)
    };

    // Echoed header or JSON field, e.g. `apikey: abc` or `"apikey":"abc"`.
    // Prose such as "apikey is invalid" has no separator and is left alone.
    let mut search_from = 0;
    while let Some(found) = result[search_from..].to_ascii_lowercase().find("apikey") {
        let key_end = search_from + found + "apikey".len();
        search_from = key_end;

        let Some(separator) = echoed_value_start(&result[key_end..]) else {
            continue;
        };
        let value_start = key_end + separator;
        let value_end = result[value_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',' || c == '}')
            .map(|i| value_start + i)
            .unwrap_or(result.len());

        if value_start < value_end && &result[value_start..value_end] != REDACTED {
            result.replace_range(value_start..value_end, REDACTED);
            search_from = value_start + REDACTED.len();
        } else {
            search_from = value_end.max(key_end);
        }
    }

    result
}

/// Offset of the value following an `apikey` name, if the name is followed
/// by an optional closing quote and a `:` or `=` separator.
fn echoed_value_start(rest: &str) -> Option<usize> {
    let after_quote = rest.trim_start_matches(|c: char| c == '"' || c == '\'');
    let after_space = after_quote.trim_start();
    let after_separator = after_space
        .strip_prefix(':')
        .or_else(|| after_space.strip_prefix('='))?;
    let value = after_separator.trim_start_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace());
    Some(rest.len() - value.len())
}
