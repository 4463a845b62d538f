use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use log::LevelFilter;
use proofread::cli::output::{self, OutputFormat};
use proofread::cli::{self, RunOptions};
use proofread::config::Overrides;
use proofread::Config;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "proofread")]
#[command(version, about = "Proofread a directory of Markdown blog posts", long_about = None)]
struct Cli {
    /// Directory of Markdown posts to check
    #[arg(short, long, value_name = "DIR")]
    posts: Option<PathBuf>,

    /// Bulk word list, plain or gzip-compressed
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Curated additions file (`stem/ending` lines)
    #[arg(short, long, value_name = "FILE")]
    additions: Option<PathBuf>,

    /// Posts mined for vocabulary (defaults to the posts directory)
    #[arg(long, value_name = "DIR")]
    corpus: Option<PathBuf>,

    /// Occurrences a corpus word needs before it counts as known
    #[arg(long, value_name = "N")]
    min_frequency: Option<u32>,

    /// Write resolved corrections back to the posts
    #[arg(short, long)]
    write: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if words are flagged
    #[arg(long)]
    no_fail: bool,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "proofread", &mut io::stdout());
        return Ok(());
    }

    init_logger(cli.verbose);

    let config = Config::load(Overrides {
        dictionary: cli.dictionary.clone(),
        additions: cli.additions.clone(),
        posts_dir: cli.posts.clone(),
        corpus_dir: cli.corpus.clone(),
        min_frequency: cli.min_frequency,
        ignore_patterns: cli.ignore_pattern.clone(),
    })?;

    let colored = !cli.no_color;
    let summary = cli::run(
        &config,
        RunOptions {
            write: cli.write,
            colored,
            format: cli.format,
        },
    )?;

    if cli.format == OutputFormat::Text {
        if cli.write {
            output::print_fix_summary(summary.fixed, summary.posts_written, colored);
        } else {
            output::print_check_summary(summary.flagged, summary.posts_checked, colored);
        }
    }

    if summary.flagged > 0 && !cli.no_fail && !cli.write {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
