use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "wardrobe",
    about = "Personal wardrobe tracker - store your clothes and draw random outfits",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/wardrobe/logs/wardrobe.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to wardrobe.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in as it
    Signup {
        /// Account name
        username: String,

        /// Password (falls back to WARDROBE_PASSWORD, then a prompt)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in to an existing account
    Login {
        /// Account name
        username: String,

        /// Password (falls back to WARDROBE_PASSWORD, then a prompt)
        #[arg(long)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Manage clothing items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Generate outfits
    Outfit {
        #[command(subcommand)]
        action: OutfitAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add an item from an image file
    Add {
        /// Image file (png, jpg, gif, webp, bmp, svg)
        image: PathBuf,

        /// Category (Shirt, Pant, Shoes, Jacket, Accessory, or any other)
        #[arg(long, short = 'C')]
        category: String,

        /// Free-form note
        #[arg(long, short = 'n')]
        note: Option<String>,
    },

    /// List items in the wardrobe
    List {
        /// Only show this category
        #[arg(long, short = 'C')]
        category: Option<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Remove every item with the given id
    Remove {
        /// Item id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum OutfitAction {
    /// Draw a random outfit
    Generate {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the last generated outfit
    Last {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// New value (comma separated for category lists)
        value: String,
    },
}
