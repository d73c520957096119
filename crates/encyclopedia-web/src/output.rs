//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use encyclopedia_core::Config;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print entry names
    pub fn print_entries(&self, names: &[String]) -> Result<()> {
        print!("{}", self.format_entries(names)?);
        Ok(())
    }

    fn format_entries(&self, names: &[String]) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Human => {
                if names.is_empty() {
                    return Ok("No entries found.\n".to_string());
                }
                let mut out = String::new();
                for name in names {
                    out.push_str(&format!("  {}\n", name));
                }
                out.push_str(&format!(
                    "\n{} {}\n",
                    names.len(),
                    if names.len() == 1 { "entry" } else { "entries" }
                ));
                out
            }
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(names)?),
            OutputFormat::Quiet => names.iter().map(|name| format!("{}\n", name)).collect(),
        })
    }

    /// Print the effective configuration
    pub fn print_config(&self, config: &Config) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Entries directory: {}", config.entries_dir.display());
                println!("Bind address:      {}", config.bind_address);
                println!("Log level:         {}", config.log_level());
                println!(
                    "Config file:       {}",
                    Config::config_file_path().display()
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            OutputFormat::Quiet => {
                print!("{}", toml::to_string_pretty(config)?);
            }
        }
        Ok(())
    }
}
