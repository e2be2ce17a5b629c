use colored::*;
use eyre::{Context, Result};
use std::fs;

use super::{fail, print_structured};
use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
        ConfigAction::Set { key, value } => set(&key, &value, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    if print_structured(format, config)? {
        return Ok(());
    }

    println!("{}", "Wardrobe Configuration".bold());
    println!();

    println!("{}:", "paths".cyan());
    println!("  data: {}", config.paths.data.display());
    println!();

    println!("{}:", "outfit".cyan());
    println!("  required: {}", config.outfit.required.join(", "));
    println!("  optional: {}", config.outfit.optional.join(", "));
    println!();

    println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());

    Ok(())
}

fn lookup(key: &str, config: &Config) -> Option<String> {
    match key {
        "paths.data" => Some(config.paths.data.display().to_string()),
        "outfit.required" => Some(config.outfit.required.join(",")),
        "outfit.optional" => Some(config.outfit.optional.join(",")),
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        _ => None,
    }
}

fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config) {
        Some(v) => println!("{}", v),
        None => fail(&format!("Unknown config key: {}", key)),
    }

    Ok(())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn apply(key: &str, value: &str, config: &Config) -> Result<Config> {
    let mut new_config = config.clone();

    match key {
        "paths.data" => new_config.paths.data = value.into(),
        "outfit.required" => new_config.outfit.required = parse_list(value),
        "outfit.optional" => new_config.outfit.optional = parse_list(value),
        "log_level" | "log-level" => new_config.log_level = value.parse()?,
        _ => {
            eyre::bail!("Unknown config key: {}", key);
        }
    }

    new_config.validate()?;
    Ok(new_config)
}

fn set(key: &str, value: &str, config: &Config) -> Result<()> {
    println!("{} Setting {} = {}", "→".blue(), key.cyan(), value.green());

    let new_config = apply(key, value, config)?;

    let config_path = Config::wardrobe_dir().join("wardrobe.yaml");
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let yaml_str = serde_yaml::to_string(&new_config).context("Failed to serialize config")?;
    fs::write(&config_path, yaml_str).context("Failed to write config file")?;

    println!("  {} Saved to {}", "✓".green(), config_path.display());

    Ok(())
}
