//! Text and JSON rendering for command results.

use anyhow::Result;
use colored::Colorize;
use kindred_engine::{Explanation, FactBaseName, Relation, SuiteReport};
use kindred_facts::{FactIssue, PersonView, Severity};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::OutputFormat;

#[derive(Serialize)]
struct RelativesJson<'a> {
    relation: &'a str,
    person: &'a str,
    relatives: &'a BTreeSet<String>,
}

pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Text mode prints one name per line and nothing for an empty answer.
    pub fn relatives(&self, relation: &str, person: &str, relatives: &BTreeSet<String>) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&RelativesJson {
                relation,
                person,
                relatives,
            }),
            OutputFormat::Text => {
                for name in relatives {
                    println!("{name}");
                }
                if relatives.is_empty() {
                    eprintln!("{} {relation}({person})", "none:".dimmed());
                }
                Ok(())
            }
        }
    }

    pub fn explanation(&self, explanation: &Explanation) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(explanation),
            OutputFormat::Text => {
                println!(
                    "{} {}({}) = {}",
                    "relation".cyan().bold(),
                    explanation.relation,
                    explanation.person,
                    explanation.expr
                );
                for event in &explanation.trace {
                    let people: Vec<&str> = event.people.iter().map(String::as_str).collect();
                    println!(
                        "  {}{} -> {{{}}}",
                        "  ".repeat(event.depth),
                        event.step.dimmed(),
                        people.join(", ")
                    );
                }
                for name in &explanation.relatives {
                    println!("{name}");
                }
                Ok(())
            }
        }
    }

    pub fn people(&self, people: &[PersonView]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(people),
            OutputFormat::Text => {
                for person in people {
                    let gender = person
                        .gender
                        .map(|g| g.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    println!("{}\t{gender}", person.name);
                }
                Ok(())
            }
        }
    }

    pub fn relations(&self, relations: &[Relation]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(relations),
            OutputFormat::Text => {
                for relation in relations {
                    println!("{relation}");
                }
                Ok(())
            }
        }
    }

    pub fn issues(&self, issues: &[FactIssue]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(issues),
            OutputFormat::Text => {
                if issues.is_empty() {
                    println!("{}", "No issues.".green());
                }
                for issue in issues {
                    let tag = match issue.severity() {
                        Severity::Info => "info".blue().bold(),
                        Severity::Warning => "warning".yellow().bold(),
                    };
                    println!("{tag}: {issue}");
                }
                Ok(())
            }
        }
    }

    pub fn report(&self, fact_base: FactBaseName, report: &SuiteReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(report),
            OutputFormat::Text => {
                for case in &report.cases {
                    let status = if case.passed() {
                        "ok".green().bold()
                    } else {
                        "FAIL".red().bold()
                    };
                    println!("{status} {}({})", case.query, case.person);
                    if !case.passed() {
                        println!("     expected: {:?}", case.expected);
                        match &case.actual {
                            Ok(actual) => println!("     actual:   {actual:?}"),
                            Err(err) => println!("     error:    {err}"),
                        }
                    }
                }
                println!(
                    "{} {fact_base}: {} passed, {} failed",
                    "Checked".green().bold(),
                    report.passed(),
                    report.failed()
                );
                Ok(())
            }
        }
    }
}
