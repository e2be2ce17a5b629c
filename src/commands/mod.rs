use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::closet::Closet;

pub mod account;
pub mod completions;
pub mod config;
pub mod item;
pub mod outfit;

/// Report a rejected operation and exit non-zero
pub(crate) fn fail(message: &str) -> ! {
    eprintln!("{} {}", "✗".red(), message);
    std::process::exit(1);
}

/// The logged-in username, or exit with a hint
pub(crate) fn require_user(closet: &Closet) -> Result<String> {
    match closet.current_user()? {
        Some(user) => Ok(user),
        None => fail("Not logged in. Run `wardrobe login <username>` first."),
    }
}

/// Print `value` as JSON or YAML; returns false for text output so the
/// caller can render it
pub(crate) fn print_structured<T: Serialize>(format: OutputFormat, value: &T) -> Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Text => return Ok(false),
    }
    Ok(true)
}
