//! Kindred CLI
//!
//! Command-line front end for:
//! - Asking who stands in a named relation to a person
//! - Walking ancestors and descendants by generation
//! - Inspecting the built-in fact bases and their diagnostics
//! - Running the expectation suite against a fact base

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kindred_engine::{suite, FactBaseName, Gender, Kinship, ParentRole, Relation};

mod output;

use output::Output;

#[derive(Parser)]
#[command(name = "kindred")]
#[command(author, version, about = "Kindred: kinship queries over a family fact base")]
struct Cli {
    /// Built-in fact base to query (classic|extended).
    #[arg(
        long,
        global = true,
        env = "KINDRED_FACT_BASE",
        default_value = "extended"
    )]
    fact_base: FactBaseName,

    /// Output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "KINDRED_FORMAT",
        default_value_t = OutputFormat::Text
    )]
    format: OutputFormat,

    /// Log query evaluation at debug level (overridden by `KINDRED_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Everyone standing in RELATION to PERSON.
    ///
    /// Relation names are matched ignoring case and separators, so
    /// `sister-in-law`, `sister_in_law` and `SisterInLaw` are the same.
    Query {
        relation: Relation,
        person: String,
        /// Also print the relation's expression and each evaluation step.
        #[arg(long)]
        explain: bool,
    },

    /// Ancestors LEVEL generations up, ending in ROLE.
    Ancestors {
        person: String,
        #[arg(long, default_value = "father")]
        role: ParentRole,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        level: i64,
    },

    /// Descendants LEVEL generations down.
    Descendants {
        person: String,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        level: i64,
        /// Keep only this gender in the final generation.
        #[arg(long)]
        gender: Option<Gender>,
    },

    /// List everyone in the fact base with their gender.
    People,

    /// List the relation names `query` accepts.
    Relations,

    /// Print soft diagnostics found while loading the fact base.
    Validate,

    /// Run the expectation suite for the selected fact base.
    Check,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "kindred_facts=debug,kindred_engine=debug,kindred=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("KINDRED_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!(fact_base = %cli.fact_base, "loading fact base");
    let kinship = Kinship::new(cli.fact_base.load()?);
    let out = Output::new(cli.format);

    match cli.command {
        Commands::Query {
            relation,
            person,
            explain,
        } => {
            if explain {
                out.explanation(&kinship.explain(relation, &person)?)?;
            } else {
                let relatives = kinship.relatives(relation, &person)?;
                out.relatives(&relation.to_string(), &person, &relatives)?;
            }
        }
        Commands::Ancestors {
            person,
            role,
            level,
        } => {
            let found = kinship.ancestors_at_level(&person, role, level)?;
            out.relatives(&format!("{role}@{level}"), &person, &found)?;
        }
        Commands::Descendants {
            person,
            level,
            gender,
        } => {
            let found = kinship.descendants_at_level(&person, level, gender)?;
            let label = match gender {
                Some(gender) => format!("descendants@{level}[{gender}]"),
                None => format!("descendants@{level}"),
            };
            out.relatives(&label, &person, &found)?;
        }
        Commands::People => out.people(&kinship.facts().people())?,
        Commands::Relations => out.relations(&Relation::ALL)?,
        Commands::Validate => out.issues(kinship.facts().issues())?,
        Commands::Check => {
            let report = suite::run(&kinship, suite::expectations_for(cli.fact_base));
            out.report(cli.fact_base, &report)?;
            if !report.is_success() {
                bail!(
                    "{} of {} expectations failed for the {} fact base",
                    report.failed(),
                    report.cases.len(),
                    cli.fact_base
                );
            }
        }
    }

    Ok(())
}
