pub mod output;

use crate::checker::Proofreader;
use crate::posts::{FilePostRepository, PostRepository};
use crate::{dict, Config, Report};
use anyhow::{Context, Result};
use output::OutputFormat;
use rayon::prelude::*;

/// Options of one proofreading run, beyond what [`Config`] holds.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub write: bool,
    pub colored: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub posts_checked: usize,
    pub flagged: usize,
    pub fixed: usize,
    pub posts_written: usize,
}

/// Load posts and vocabulary, proofread every post, report, and optionally
/// write corrected bodies back.
pub fn run(config: &Config, options: RunOptions) -> Result<RunSummary> {
    let posts_path = config.posts_path()?;
    let repository = FilePostRepository::open(posts_path)
        .with_context(|| format!("Failed to open posts directory: {}", posts_path.display()))?;
    log::info!("found {} posts in {}", repository.len(), posts_path.display());

    let corpus_path = config.corpus_path()?;
    let corpus_repository = if corpus_path == posts_path {
        None
    } else {
        Some(FilePostRepository::open(corpus_path).with_context(|| {
            format!("Failed to open corpus directory: {}", corpus_path.display())
        })?)
    };

    let documents = repository.load_all().context("Failed to load posts")?;
    let corpus = match &corpus_repository {
        Some(corpus_repository) => corpus_repository
            .load_all()
            .context("Failed to load corpus")?,
        None => documents.clone(),
    };

    let dictionary = dict::build_dictionary(config, &corpus)?;
    let proofreader = Proofreader::new(&dictionary).with_ignore_patterns(&config.ignore_patterns);

    log::info!("proofreading {} posts", documents.len());
    let reports: Vec<Report> = documents
        .par_iter()
        .map(|document| proofreader.proofread(document))
        .collect();

    output::print_reports(&reports, options.colored, options.format);

    let mut summary = RunSummary {
        posts_checked: reports.len(),
        flagged: reports.iter().map(Report::flagged_count).sum(),
        ..Default::default()
    };

    if options.write {
        for (document, report) in documents.iter().zip(&reports) {
            if report.resolved_count() == 0 {
                continue;
            }
            let body = report.corrected_body(&document.markdown_body);
            repository
                .save_body(document, &body)
                .with_context(|| format!("Failed to save post {}", document.id))?;
            summary.fixed += report.resolved_count();
            summary.posts_written += 1;
        }
    }

    Ok(summary)
}
