use std::path::PathBuf;

use clap::ValueEnum;
use serde_json::json;
use tracing::instrument;
use wcagsite::{Level, Source, Technology};

use super::terminal::{terminal_width, Colorize};

/// Command arguments for `wcag-build techniques`.
#[derive(Debug, clap::Parser)]
#[command(about = "List the technique catalog per technology")]
pub struct Techniques {
    /// Restrict output to a single technology (directory name, e.g. 'css').
    #[arg(long, value_parser = parse_technology)]
    technology: Option<Technology>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Quiet mode: output only ID and title, tab-separated.
    #[arg(long, short)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Parse a technology from a string, normalizing to lowercase.
///
/// This is a CLI boundary function that accepts mixed-case input and
/// normalizes it before parsing.
fn parse_technology(s: &str) -> Result<Technology, String> {
    s.to_lowercase().parse().map_err(|e| format!("{e}"))
}

impl Techniques {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let graph = Source::new(root).load()?;

        let selected: Vec<Technology> = self
            .technology
            .map_or_else(|| Technology::ALL.to_vec(), |technology| vec![technology]);

        if self.format == OutputFormat::Json {
            let output: Vec<_> = selected
                .iter()
                .map(|&technology| {
                    let techniques: Vec<_> = graph
                        .catalog()
                        .get(technology)
                        .iter()
                        .map(|technique| {
                            json!({
                                "id": technique.id.to_string(),
                                "title": technique.title_html,
                            })
                        })
                        .collect();
                    json!({
                        "technology": technology.as_str(),
                        "title": technology.title(),
                        "techniques": techniques,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let width = usize::from(terminal_width().unwrap_or(100));

        for (i, &technology) in selected.iter().enumerate() {
            let techniques = graph.catalog().get(technology);

            if self.quiet {
                for technique in techniques {
                    println!("{}\t{}", technique.id, technique.title_html);
                }
                continue;
            }

            if i > 0 {
                println!();
            }
            println!(
                "{}  {}",
                technology.title(),
                format!("({})", techniques.len()).dim()
            );

            for technique in techniques {
                let id = technique.id.to_string();
                println!(
                    "  {id:<8} {}",
                    truncate(&technique.title_html, width.saturating_sub(12))
                );
            }
        }

        Ok(())
    }
}

/// Command arguments for `wcag-build outline`.
#[derive(Debug, clap::Parser)]
#[command(about = "Print the numbered taxonomy outline")]
pub struct Outline {
    /// Show only success criteria of the given conformance level.
    #[arg(long, value_parser = parse_level)]
    level: Option<Level>,
}

/// Parse a conformance level from a string, normalizing to uppercase.
fn parse_level(s: &str) -> Result<Level, String> {
    s.to_uppercase().parse().map_err(|e| format!("{e}"))
}

impl Outline {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let graph = Source::new(root).load()?;

        for principle in graph.taxonomy().principles() {
            println!("{} {}", principle.num, principle.name);

            for guideline in &principle.guidelines {
                println!(
                    "  {} {} {}",
                    guideline.num,
                    guideline.name,
                    format!("({})", guideline.version).dim()
                );

                for criterion in &guideline.success_criteria {
                    if self.level.is_some_and(|level| criterion.level != level) {
                        continue;
                    }
                    println!(
                        "    {} {} [{}] {}",
                        criterion.num,
                        criterion.name,
                        criterion.level,
                        format!("({})", criterion.version).dim()
                    );
                }
            }
        }

        Ok(())
    }
}

/// Truncate a string to `max` characters, appending an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
