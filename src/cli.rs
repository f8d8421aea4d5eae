//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::validate_course_code;
use crate::error::{HarvestError, Result};
use crate::harvester::harvest_course_with_client;
use crate::http::create_client;
use crate::record::{Outcome, Value};
use crate::yaml::{save_record, to_yaml_string};

/// KU Course Harvester - Download course descriptions from the University
/// of Copenhagen catalogue.
#[derive(Parser)]
#[command(name = "kucourse-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest courses by code and convert to YAML.
    Harvest {
        /// Course codes (e.g., NDAB24002U)
        #[arg(required = true)]
        course_codes: Vec<String>,

        /// Output directory (default: print YAML to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            course_codes,
            output,
        } => harvest_command(&course_codes, output.as_deref()),
    }
}

/// Execute the harvest command.
fn harvest_command(course_codes: &[String], output: Option<&Path>) -> Result<()> {
    // Validate all inputs before making HTTP requests
    for course_code in course_codes {
        validate_course_code(course_code)?;
    }

    // Validate output directory exists (if specified) before downloading
    if let Some(output_dir) = output {
        if !output_dir.exists() {
            return Err(HarvestError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
        if !output_dir.is_dir() {
            return Err(HarvestError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    let client = create_client()?;

    for course_code in course_codes {
        println!(
            "{} {}",
            style("Harvesting").bold(),
            style(course_code).cyan()
        );

        // Create progress spinner
        let pb = ProgressBar::new_spinner();
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message("Downloading course page...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let outcome = match harvest_course_with_client(&client, course_code) {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };
        pb.finish_and_clear();

        match outcome {
            Outcome::Rejected { faculty } => {
                println!(
                    "  {} course belongs to {}",
                    style("Skipped:").yellow().bold(),
                    style(&faculty).yellow()
                );
            }
            Outcome::Course(record) => {
                if let Some(title) = record.get("primary title").and_then(Value::as_text) {
                    println!("  Title: {}", style(title).green());
                }
                if let Some(credit) = record.get("credit").and_then(Value::as_number) {
                    println!("  Credit: {credit} ECTS");
                }

                if let Some(output_dir) = output {
                    let path = output_dir.join(format!("{}.yaml", course_code.to_uppercase()));
                    save_record(&record, &path)?;
                    println!(
                        "  {} {}",
                        style("Saved to:").green().bold(),
                        path.display()
                    );
                } else {
                    println!();
                    print!("{}", to_yaml_string(&record)?);
                }
            }
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_harvest() {
        let cli = Cli::parse_from(["kucourse-harvester", "harvest", "NDAB24002U"]);

        let Commands::Harvest {
            course_codes,
            output,
        } = cli.command;
        assert_eq!(course_codes, vec!["NDAB24002U"]);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_harvest_multiple_with_output() {
        let cli = Cli::parse_from([
            "kucourse-harvester",
            "harvest",
            "NDAB24002U",
            "NDAA04010U",
            "--output",
            "courses",
        ]);

        let Commands::Harvest {
            course_codes,
            output,
        } = cli.command;
        assert_eq!(course_codes, vec!["NDAB24002U", "NDAA04010U"]);
        assert_eq!(output, Some(PathBuf::from("courses")));
    }

    #[test]
    fn test_cli_requires_at_least_one_code() {
        assert!(Cli::try_parse_from(["kucourse-harvester", "harvest"]).is_err());
    }
}
