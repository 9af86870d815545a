use std::path::PathBuf;

mod list;
mod terminal;

use clap::ArgAction;
use list::{Outline, Techniques};
use tracing::instrument;
use wcagsite::{domain::load_rules, Rule, SiteGraph, Source, WcagVersion};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the publication source tree
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Build(Build::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Build the full document graph and print a summary (default)
    Build(Build),

    /// Build the graph and report diagnostics without rendering
    ///
    /// Exits with code 2 when unresolved citations are found, for CI use.
    Check(Check),

    /// List the technique catalog per technology
    Techniques(Techniques),

    /// Print the numbered taxonomy outline
    Outline(Outline),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Build(command) => command.run(root)?,
            Self::Check(command) => command.run(root)?,
            Self::Techniques(command) => command.run(root)?,
            Self::Outline(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Resolve the rule table path: an explicit flag wins over the configured
/// location.
fn rules_path(source: &Source, flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| {
        source
            .config()
            .rules_table()
            .map(|relative| source.root().join(relative))
    })
}

fn load_rule_table(source: &Source, flag: Option<PathBuf>) -> anyhow::Result<Vec<Rule>> {
    match rules_path(source, flag) {
        Some(path) => Ok(load_rules(&path)?),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Build {
    /// Path to the rule-mapping table (JSON); overrides the configured
    /// location.
    #[clap(long)]
    rules: Option<PathBuf>,
}

impl Build {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        use terminal::Colorize;

        let source = Source::new(root);
        let rules = load_rule_table(&source, self.rules)?;

        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_message("loading source documents");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        let loaded = source.load();
        spinner.finish_and_clear();

        let graph = loaded?;
        let refs = graph.resolve(&rules);

        println!("Principles:        {}", graph.taxonomy().principles().len());
        println!("Guidelines:        {}", graph.taxonomy().guidelines().count());
        println!(
            "Success criteria:  {}",
            graph.taxonomy().success_criteria().count()
        );
        println!("Techniques:        {}", graph.catalog().len());
        println!("Rules:             {}", rules.len());

        if refs.dropped_citations() == 0 {
            println!("{}", "✅ Graph resolved with no dropped citations.".success());
        } else {
            println!(
                "{}",
                format!(
                    "⚠️  {} citations dropped (rerun with -v for details)",
                    refs.dropped_citations()
                )
                .warning()
            );
        }

        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Check {
    /// Path to the rule-mapping table (JSON); overrides the configured
    /// location.
    #[clap(long)]
    rules: Option<PathBuf>,

    /// Suppress output
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        use terminal::Colorize;

        let source = Source::new(root);
        let rules = load_rule_table(&source, self.rules)?;

        let graph = source.load()?;
        let refs = graph.resolve(&rules);

        let duplicates = duplicate_basenames(&graph);

        if refs.dropped_citations() == 0 && duplicates.is_empty() {
            if !self.quiet {
                println!("{}", "✅ All citations and versions resolved.".success());
            }
            return Ok(());
        }

        if !self.quiet {
            if refs.dropped_citations() > 0 {
                println!(
                    "{}",
                    format!(
                        "⚠️  {} unresolved citations (rerun with -v for details)",
                        refs.dropped_citations()
                    )
                    .warning()
                );
            }
            if !duplicates.is_empty() {
                println!(
                    "{}",
                    format!(
                        "⚠️  {} basenames appear under more than one version:",
                        duplicates.len()
                    )
                    .warning()
                );
                for id in &duplicates {
                    println!("  • {id}");
                }
            }
        }

        std::process::exit(2);
    }
}

/// Basenames recorded under more than one version partition, sorted.
fn duplicate_basenames(graph: &SiteGraph) -> Vec<String> {
    use std::collections::HashMap;

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for version in WcagVersion::ALL {
        for stem in graph.versions().basenames(version) {
            *seen.entry(stem.as_str()).or_insert(0) += 1;
        }
    }

    let mut duplicates: Vec<String> = seen
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    duplicates.sort_unstable();
    duplicates
}
