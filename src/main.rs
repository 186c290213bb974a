use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use webcode::kernel::persist;
use webcode::kernel::services::adapters::{
    ensure_data_dir, ensure_settings_file, load_settings, load_settings_from, FileKeyValueStore,
    LocalDirectoryHandle,
};
use webcode::kernel::services::ports::{Settings, StorageError};
use webcode::kernel::{Action, DispatchResult, EditorTab, Store, StoreError, TabId};
use webcode::models::{path, ClipboardOp, NodeKind, VfsError};

mod logging;

/// Headless workspace for a browser code editor: a virtual file tree, open
/// tabs and a run history, persisted between invocations.
#[derive(Parser, Debug)]
#[command(name = "webcode", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding persisted state (overrides the settings file)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Settings file to use instead of the default one
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Do not echo warnings to stderr
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tree
    Tree {
        /// Dump the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a file's content
    Cat { path: String },
    /// Replace a file's content (reads stdin without --content)
    Write {
        path: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Create a file
    Touch {
        path: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Create a directory
    Mkdir { path: String },
    /// Delete a file or directory with everything below it
    Rm { path: String },
    /// Move a node into another directory
    Mv { source: String, target_dir: String },
    /// Rename a node in place
    Rename { path: String, new_name: String },
    /// Put a copy of a node on the clipboard
    Copy { path: String },
    /// Put a node on the clipboard to be moved by the next paste
    Cut { path: String },
    /// Paste the clipboard into a directory
    Paste { target_dir: String },
    /// Select a node, or clear the selection without a path
    Select { path: Option<String> },
    /// Open a file in a tab
    Open { path: String },
    /// List open tabs
    Tabs,
    /// Close a tab
    Close { id: u64 },
    /// Save a tab back into the tree
    Save {
        id: u64,
        /// Recreate the file if it was deleted
        #[arg(long)]
        recreate: bool,
    },
    /// Run a file and record it in the history
    Run { path: String },
    /// Show (or clear) the run history of the current user
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Replace the whole tree with a local directory
    Import { dir: PathBuf },
    /// Start over from the default tree
    Reset {
        /// Start from an empty root instead
        #[arg(long)]
        empty: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<VfsError> for CliError {
    fn from(e: VfsError) -> Self {
        CliError::Store(e.into())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_from(path),
        None => {
            let _ = ensure_settings_file();
            load_settings()
        }
    }
    .unwrap_or_default();

    let _logging = logging::init(&settings.log_filter, cli.quiet);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Leading slash added when missing, so `src/a.js` and `/src/a.js` agree.
fn absolute(p: &str) -> String {
    if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{p}")
    }
}

fn split(p: &str) -> Result<(String, String), VfsError> {
    let p = absolute(p);
    let parent = path::parent_of(&p).map(str::to_string);
    match parent {
        Some(parent) => Ok((parent, path::basename(&p).to_string())),
        None => Err(VfsError::InvalidName(p)),
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<(), CliError> {
    let dir = ensure_data_dir(cli.storage_dir.or_else(|| settings.storage_dir.clone()))?;
    let mut kv = FileKeyValueStore::new(dir);
    let state = persist::load_state(&kv, &settings)?;
    let mut store = Store::new(state).with_user(settings.user_id.clone());

    let action = match cli.command {
        Command::Tree { json } => {
            print_tree(&store, json)?;
            return Ok(());
        }
        Command::Cat { path } => {
            let path = absolute(&path);
            let node = store
                .state()
                .tree
                .lookup(&path)
                .ok_or_else(|| VfsError::NotFound(path.clone()))?;
            let content = node.content().ok_or(StoreError::NotAFile(path))?;
            print!("{content}");
            return Ok(());
        }
        Command::Tabs => {
            print_tabs(&store);
            return Ok(());
        }
        Command::History { clear: false } => {
            for entry in store.state().history.for_user(store.user_id()) {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.created_at, entry.language, entry.file_path, entry.id
                );
            }
            return Ok(());
        }
        Command::Import { dir } => {
            let handle = LocalDirectoryHandle::open(dir).with_ignore(settings.import_ignore.clone());
            let (result, report) = store.import(handle).await?;
            println!(
                "imported {}: {} files, {} directories",
                report.root_name, report.files, report.directories
            );
            for skipped in &report.skipped {
                println!("skipped {}: {}", skipped.path, skipped.reason);
            }
            finish(&store, &mut kv, &result)?;
            return Ok(());
        }
        Command::History { clear: true } => Action::ClearHistory,
        Command::Write { path, content } => {
            let path = absolute(&path);
            let is_file = store.state().tree.lookup(&path).is_some_and(|n| n.is_file());
            if !is_file {
                return Err(StoreError::NotAFile(path).into());
            }
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            Action::UpdateFileContent { path, content }
        }
        Command::Touch { path, content } => {
            let (parent, name) = split(&path)?;
            Action::CreateFile {
                parent,
                name,
                content,
            }
        }
        Command::Mkdir { path } => {
            let (parent, name) = split(&path)?;
            Action::CreateDirectory { parent, name }
        }
        Command::Rm { path } => Action::DeleteNode {
            path: absolute(&path),
        },
        Command::Mv { source, target_dir } => Action::MoveNode {
            source: absolute(&source),
            target_dir: absolute(&target_dir),
        },
        Command::Rename { path, new_name } => Action::RenameNode {
            path: absolute(&path),
            new_name,
        },
        Command::Copy { path } => Action::CopyToClipboard {
            path: absolute(&path),
            op: ClipboardOp::Copy,
        },
        Command::Cut { path } => Action::CopyToClipboard {
            path: absolute(&path),
            op: ClipboardOp::Cut,
        },
        Command::Paste { target_dir } => Action::Paste {
            target_dir: absolute(&target_dir),
        },
        Command::Select { path } => Action::Select {
            path: path.as_deref().map(absolute),
        },
        Command::Open { path } => Action::OpenFile {
            path: absolute(&path),
        },
        Command::Close { id } => Action::CloseTab { id: TabId::new(id) },
        Command::Save { id, recreate } => Action::SaveTab {
            id: TabId::new(id),
            recreate,
        },
        Command::Run { path } => Action::RunFile {
            path: absolute(&path),
        },
        Command::Reset { empty } => Action::ResetWorkspace { seed: !empty },
    };

    let result = store.dispatch(action)?;
    finish(&store, &mut kv, &result)
}

fn finish(store: &Store, kv: &mut FileKeyValueStore, result: &DispatchResult) -> Result<(), CliError> {
    let outputs = persist::apply_effects(store, kv, &result.effects)?;
    if outputs.is_empty() {
        if let Some(line) = result_line(result) {
            println!("{line}");
        }
    }
    for output in outputs {
        println!("{output}");
    }
    Ok(())
}

fn print_tree(store: &Store, json: bool) -> Result<(), CliError> {
    let tree = &store.state().tree;
    if json {
        let text = serde_json::to_string_pretty(&tree.snapshot()).map_err(StorageError::from)?;
        println!("{text}");
        return Ok(());
    }

    let selected = tree.selected_path();
    let clipboard = tree.clipboard().map(|c| c.source_path.as_str());
    for row in tree.rows() {
        let indent = "  ".repeat(row.depth as usize);
        let suffix = if row.kind == NodeKind::Directory && row.depth > 0 {
            "/"
        } else {
            ""
        };
        let mut marks = String::new();
        if selected == Some(row.path.as_str()) {
            marks.push_str(" *");
        }
        if clipboard == Some(row.path.as_str()) {
            marks.push_str(" [clipboard]");
        }
        println!("{indent}{}{suffix}{marks}", row.name);
    }
    Ok(())
}

/// Tab ids are printed bare so they can be passed back to `close`/`save`.
fn result_line(result: &DispatchResult) -> Option<String> {
    match (&result.path, result.tab) {
        (Some(path), Some(tab)) => Some(format!("{path}\t{}", tab.raw())),
        (Some(path), None) => Some(path.clone()),
        (None, Some(tab)) => Some(tab.raw().to_string()),
        (None, None) => None,
    }
}

fn tab_line(tab: &EditorTab, active: bool) -> String {
    let marker = if active { ">" } else { " " };
    format!(
        "{marker} {}\t{}\t{}\t{}",
        tab.id.raw(),
        tab.display_title(),
        tab.language.display_name(),
        tab.path
    )
}

fn print_tabs(store: &Store) {
    let tabs = &store.state().tabs;
    let active = tabs.active_tab().map(|t| t.id);
    for tab in tabs.tabs() {
        println!("{}", tab_line(tab, Some(tab.id) == active));
    }
}
