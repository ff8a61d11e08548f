//! Command-line surface over the kernel.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use labmark::app::Session;
use labmark::kernel::markup::{self, render_preview};
use labmark::kernel::services::adapters::{resolve_data_dir, CmarkRenderer, JsonFileStorage};
use labmark::kernel::services::ports::{AppConfig, StorageError};
use labmark::kernel::{generate_index, scan_lab_files, Action, FileOp, LabError, NoticeLevel};
use labmark::models::{build_tree, path_key, ExpansionState, FileStore, Submission, TreeRow};

/// labmark - turn raw lab notes into platform Markdown
#[derive(Parser, Debug)]
#[command(name = "labmark", version)]
#[command(about = "Convert raw lab notes into platform Markdown and manage lab workspaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding persisted workspace state
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a raw notes file ("-" for stdin) and print the result
    Convert {
        input: PathBuf,
        /// Print the HTML preview instead of Markdown
        #[arg(long)]
        html: bool,
        /// Skip heuristic tag detection
        #[arg(long)]
        no_detect: bool,
    },
    /// Copy a local file into the workspace
    Import {
        file: PathBuf,
        /// Workspace path, defaults to the file name
        #[arg(long = "as")]
        target: Option<String>,
    },
    /// Print the workspace tree
    Tree {
        /// Expand every folder regardless of saved state
        #[arg(long)]
        all: bool,
    },
    /// List previous submissions, most recent first
    History,
    /// Print an index.json descriptor for the workspace
    Index {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "ubuntu")]
        image: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Lab(#[from] LabError),
    #[error("{0}")]
    Rejected(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Lab(LabError::Storage(e))
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(io_err)
}

/// Markdown or HTML for one raw file. Detection keys off the file name.
pub fn convert_source(name: &str, raw: &str, detect: bool, html: bool) -> String {
    let markdown = markup::convert(name, raw, detect);
    if html {
        render_preview(&CmarkRenderer::new(), &markdown)
    } else {
        markdown
    }
}

pub fn render_tree(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "  ".repeat(usize::from(row.depth.saturating_sub(1)));
        let marker = match (row.is_dir, row.is_expanded) {
            (true, true) => "v ",
            (true, false) => "> ",
            (false, _) => "  ",
        };
        let suffix = if row.is_dir { "/" } else { "" };
        let _ = writeln!(out, "{indent}{marker}{}{suffix}", row.name);
    }
    out
}

pub fn render_history<'a>(history: impl Iterator<Item = &'a Submission>) -> String {
    let mut out = String::new();
    for submission in history {
        let author = if submission.author_name.is_empty() {
            "-"
        } else {
            submission.author_name.as_str()
        };
        let _ = writeln!(
            out,
            "{}  {}  {}  {}  {} file(s)",
            submission.id,
            submission.timestamp.format("%Y-%m-%d %H:%M:%S"),
            submission.lab_name,
            author,
            submission.files.len()
        );
    }
    out
}

fn expand_everything(files: &FileStore) -> ExpansionState {
    let mut expansion = ExpansionState::new();
    for record in files.iter() {
        if record.is_directory {
            expansion.set(&record.path, true);
        }
        let mut parent = path_key::parent(&record.path);
        while let Some(dir) = parent {
            expansion.set(dir, true);
            parent = path_key::parent(dir);
        }
    }
    expansion
}

fn open_session(config: &AppConfig) -> Result<Session, CliError> {
    let dir = resolve_data_dir(config);
    let storage = JsonFileStorage::open(&dir)?;
    tracing::debug!(dir = %dir.display(), "workspace opened");
    Ok(Session::open(Box::new(storage), config)?)
}

fn rejected_by(session: &Session) -> Option<String> {
    session
        .state()
        .ui
        .notice
        .as_ref()
        .filter(|n| n.level == NoticeLevel::Error)
        .map(|n| n.message.clone())
}

pub fn run(command: Commands, config: &AppConfig) -> Result<String, CliError> {
    match command {
        Commands::Convert {
            input,
            html,
            no_detect,
        } => {
            let raw = read_input(&input)?;
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut out = convert_source(&name, &raw, !no_detect, html);
            out.push('\n');
            Ok(out)
        }
        Commands::Import { file, target } => {
            let content = read_input(&file)?;
            let path = match target {
                Some(target) => target,
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            let mut session = open_session(config)?;
            session.handle(Action::File(FileOp::CreateFile {
                path: path.clone(),
                content,
            }));
            if let Some(message) = rejected_by(&session) {
                return Err(CliError::Rejected(message));
            }
            Ok(format!("imported {path}\n"))
        }
        Commands::Tree { all } => {
            let session = open_session(config)?;
            let rows = if all {
                let files = &session.state().files;
                build_tree(files, &expand_everything(files)).flatten_for_view()
            } else {
                session.tree_rows()
            };
            Ok(render_tree(&rows))
        }
        Commands::History => {
            let session = open_session(config)?;
            Ok(render_history(session.state().history.iter()))
        }
        Commands::Index {
            title,
            description,
            image,
        } => {
            let session = open_session(config)?;
            let lab = scan_lab_files(&session.state().files);
            let index = generate_index(&title, &description, &image, &lab);
            let mut out = serde_json::to_string_pretty(&index)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
