use crate::error::{ProofreadError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A post as handed over by the post repository.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub markdown_body: String,
    pub last_modified: SystemTime,
}

/// Where posts come from and where corrected bodies go.
pub trait PostRepository {
    fn load_all(&self) -> Result<Vec<Document>>;

    fn save_body(&self, document: &Document, body: &str) -> Result<()>;
}

/// Posts stored as Markdown files under a directory.
///
/// A file named `<number>.md` gets that number as its id; other files are
/// numbered after the highest numeric id, in path order.
#[derive(Debug, Clone)]
pub struct FilePostRepository {
    entries: Vec<(u64, PathBuf)>,
}

impl FilePostRepository {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProofreadError::MissingFile(root));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| ProofreadError::Io {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                source: e.into(),
            })?;
            if entry.file_type().is_file() && is_markdown(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        let numeric_id = |path: &Path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
        };
        let mut next_id = paths.iter().filter_map(|p| numeric_id(p)).max().unwrap_or(0);
        let entries = paths
            .into_iter()
            .map(|path| {
                let id = numeric_id(&path).unwrap_or_else(|| {
                    next_id += 1;
                    next_id
                });
                (id, path)
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn path_of(&self, id: u64) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, path)| path.as_path())
    }
}

impl PostRepository for FilePostRepository {
    fn load_all(&self) -> Result<Vec<Document>> {
        self.entries
            .iter()
            .map(|(id, path)| {
                let io_error = |source| ProofreadError::Io {
                    path: path.clone(),
                    source,
                };
                let markdown_body = fs::read_to_string(path).map_err(io_error)?;
                let last_modified = fs::metadata(path)
                    .and_then(|m| m.modified())
                    .map_err(io_error)?;

                Ok(Document {
                    id: *id,
                    title: title_of(&markdown_body, path),
                    markdown_body,
                    last_modified,
                })
            })
            .collect()
    }

    fn save_body(&self, document: &Document, body: &str) -> Result<()> {
        let path = self
            .path_of(document.id)
            .ok_or(ProofreadError::UnknownPost(document.id))?;
        fs::write(path, body).map_err(|source| ProofreadError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref(),
        Some("md" | "markdown")
    )
}

/// First level-one heading, falling back to the file stem.
fn title_of(body: &str, path: &Path) -> String {
    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string()
        })
}
