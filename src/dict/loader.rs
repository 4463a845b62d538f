use crate::error::{ProofreadError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read a newline-delimited word list, gzip-compressed or plain.
///
/// Lines that are not valid UTF-8 are skipped.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let io_error = |source| ProofreadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if !path.is_file() {
        return Err(ProofreadError::MissingFile(path.to_path_buf()));
    }

    let file = File::open(path).map_err(io_error)?;
    let mut reader = BufReader::new(file);
    let compressed = reader.fill_buf().map_err(io_error)?.starts_with(&GZIP_MAGIC);

    let reader: Box<dyn BufRead> = if compressed {
        Box::new(BufReader::new(GzDecoder::new(reader)))
    } else {
        Box::new(reader)
    };

    read_lines(reader).map_err(io_error)
}

/// Read the curated additions file. Expansion happens in the builder.
pub fn read_additions(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(ProofreadError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| ProofreadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_lines(BufReader::new(file)).map_err(|source| ProofreadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_lines<R: BufRead>(mut reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut skipped = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        match std::str::from_utf8(&buf) {
            Ok(line) => lines.push(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("skipped {} undecodable lines", skipped);
    }
    Ok(lines)
}
