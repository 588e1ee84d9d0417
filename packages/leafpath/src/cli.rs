//! Command-line interface for leafpath.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::Config;
use crate::error::Result;
use crate::extractor::extract_from_file;
use crate::output::{format_line, save_rows, OutputFormat};

/// leafpath - Turn XML leaf elements into (text, path) rows.
#[derive(Parser)]
#[command(name = "leafpath")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a row for every leaf element of an XML file.
    Extract {
        /// XML input file
        input: PathBuf,

        /// Configuration file (JSON or YAML) or inline JSON object
        config: Option<String>,

        /// Write rows to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inline JSON configuration
        #[arg(long, conflicts_with = "config")]
        options: Option<String>,

        /// Output format (default: typed-csv for .csv files, text otherwise)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Enable debug logging of path construction
        #[arg(long)]
        debug: bool,
    },

    /// Print the normalized configuration as JSON.
    Config {
        /// Configuration file (JSON or YAML) or inline JSON object
        config: Option<String>,

        /// Inline JSON configuration
        #[arg(long, conflicts_with = "config")]
        options: Option<String>,
    },
}

impl Cli {
    /// Load the configuration named on the command line.
    ///
    /// Without a configuration argument the defaults apply. `--debug` turns
    /// on the configuration's debug flag.
    pub fn load_config(&self) -> Result<Config> {
        match &self.command {
            Commands::Extract {
                config,
                options,
                debug,
                ..
            } => {
                let mut loaded = load(config.as_deref().or(options.as_deref()))?;
                loaded.debug |= *debug;
                Ok(loaded)
            }
            Commands::Config { config, options } => load(config.as_deref().or(options.as_deref())),
        }
    }
}

fn load(argument: Option<&str>) -> Result<Config> {
    match argument {
        Some(arg) => Config::from_argument(arg),
        None => Ok(Config::default()),
    }
}

/// Run a parsed command with its loaded configuration.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Extract {
            input,
            output,
            format,
            ..
        } => extract_command(input, output.as_deref(), *format, config),
        Commands::Config { .. } => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
    }
}

/// Execute the extract command.
fn extract_command(
    input: &Path,
    output: Option<&Path>,
    format: Option<OutputFormat>,
    config: &Config,
) -> Result<()> {
    let rows = extract_from_file(input, config)?;

    let Some(output_path) = output else {
        for row in &rows {
            println!("{}", format_line(row));
        }
        return Ok(());
    };

    let format = format.unwrap_or_else(|| OutputFormat::from_path(output_path));
    let written = save_rows(&rows, output_path, format)?;

    println!(
        "{} {} rows from {}",
        style("Extracted").bold(),
        style(rows.len()).cyan(),
        style(input.display()).green()
    );
    println!("{} {}", style("Saved to:").green().bold(), written.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from(["leafpath", "extract", "input.xml"]);

        let Commands::Extract {
            input,
            config,
            output,
            options,
            format,
            debug,
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(input, PathBuf::from("input.xml"));
        assert!(config.is_none());
        assert!(output.is_none());
        assert!(options.is_none());
        assert!(format.is_none());
        assert!(!debug);
    }

    #[test]
    fn test_cli_parse_extract_with_format() {
        let cli = Cli::parse_from([
            "leafpath",
            "extract",
            "input.xml",
            "-o",
            "rows.txt",
            "--format",
            "typed-csv",
        ]);

        let Commands::Extract { output, format, .. } = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(output, Some(PathBuf::from("rows.txt")));
        assert_eq!(format, Some(OutputFormat::TypedCsv));
    }

    #[test]
    fn test_cli_options_conflict_with_config() {
        let result = Cli::try_parse_from([
            "leafpath",
            "extract",
            "input.xml",
            "config.json",
            "--options",
            "{}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_debug_flag() {
        let cli = Cli::parse_from([
            "leafpath",
            "extract",
            "input.xml",
            "--options",
            r#"{"namespace": "x"}"#,
            "--debug",
        ]);

        let config = cli.load_config().unwrap();
        assert_eq!(config.namespace, "x");
        assert!(config.debug);
    }

    #[test]
    fn test_load_config_defaults() {
        let cli = Cli::parse_from(["leafpath", "config"]);
        assert_eq!(cli.load_config().unwrap(), Config::default());
    }
}
