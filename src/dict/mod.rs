pub mod loader;

use crate::checker::dictionary::{Dictionary, DictionaryBuilder};
use crate::posts::Document;
use crate::Config;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Build the run's dictionary from the configured word lists and a corpus.
pub fn build_dictionary(config: &Config, corpus: &[Document]) -> Result<Dictionary> {
    let dictionary_path = config.dictionary_path()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}", dictionary_path.display()));

    let mut builder = DictionaryBuilder::new().min_frequency(config.min_frequency);

    let words = loader::read_word_list(dictionary_path).context("Failed to load word list")?;
    let accepted = builder.add_bulk_words(&words);
    log::info!("{} of {} bulk words accepted", accepted, words.len());

    if let Some(additions_path) = &config.additions {
        pb.set_message(format!("Reading {}", additions_path.display()));
        let lines = loader::read_additions(additions_path).context("Failed to load additions")?;
        let added = builder.add_curated_lines(&lines);
        log::info!("{} curated words added", added);
    }

    pb.set_message(format!("Mining {} posts", corpus.len()));
    for document in corpus {
        builder.mine_document(&document.markdown_body);
    }

    pb.set_message("Building dictionary...");
    let dictionary = builder.build().context("Failed to build dictionary")?;
    pb.finish_and_clear();

    log::info!("dictionary ready with {} words", dictionary.len());
    Ok(dictionary)
}
