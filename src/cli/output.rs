use crate::{Report, UNRESOLVED_MARKER};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonCorrection {
    post_id: u64,
    title: String,
    row: usize,
    column: usize,
    original: String,
    suggestion: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    posts_checked: usize,
    total_flagged: usize,
    corrections: Vec<JsonCorrection>,
}

/// Print the corrections of every report that has any.
pub fn print_reports(reports: &[Report], colored_output: bool, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for report in reports {
                print_text_report(report, colored_output);
            }
        }
        OutputFormat::Json => print_json_reports(reports),
    }
}

fn print_text_report(report: &Report, colored_output: bool) {
    if report.corrections.is_empty() {
        return;
    }

    let heading = format!("#{} {}", report.document_id, report.title);
    if colored_output {
        println!("\n{}", heading.bold().underline());
    } else {
        println!("\n{}", heading);
    }

    for correction in &report.corrections {
        if colored_output {
            let position = format!("{}:{}", correction.row, correction.column);
            let suggestion = match correction.suggestion.replacement.as_deref() {
                Some(replacement) => replacement.green().to_string(),
                None => UNRESOLVED_MARKER.yellow().to_string(),
            };
            println!(
                "  {} {} {} {}",
                position.blue().bold(),
                correction.original.red().bold(),
                "=>".dimmed(),
                suggestion
            );
        } else {
            println!("  {}", correction);
        }
    }
}

fn print_json_reports(reports: &[Report]) {
    let corrections: Vec<JsonCorrection> = reports
        .iter()
        .flat_map(|report| {
            report.corrections.iter().map(|c| JsonCorrection {
                post_id: report.document_id,
                title: report.title.clone(),
                row: c.row,
                column: c.column,
                original: c.original.clone(),
                suggestion: c.suggestion.replacement.clone(),
            })
        })
        .collect();

    let output = JsonOutput {
        posts_checked: reports.len(),
        total_flagged: corrections.len(),
        corrections,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

pub fn print_check_summary(total_flagged: usize, posts: usize, colored: bool) {
    println!();
    if total_flagged == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_flagged == 1 { "word" } else { "words" };
        if colored {
            println!(
                "{} {} {} flagged in {} {}",
                "✗".red().bold(),
                total_flagged.to_string().red().bold(),
                error_word,
                posts,
                if posts == 1 { "post" } else { "posts" }
            );
        } else {
            println!(
                "✗ {} {} flagged in {} {}",
                total_flagged,
                error_word,
                posts,
                if posts == 1 { "post" } else { "posts" }
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, posts_written: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = if total_fixed == 1 { "correction" } else { "corrections" };
        if colored {
            println!(
                "{} {} {} written to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                posts_written,
                if posts_written == 1 { "post" } else { "posts" }
            );
        } else {
            println!(
                "✓ {} {} written to {} {}",
                total_fixed,
                fix_word,
                posts_written,
                if posts_written == 1 { "post" } else { "posts" }
            );
        }
    }
}
