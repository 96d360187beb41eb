use anyhow::Context;
use clap::Parser;
use smartmark_core::{
    validate, validate_edit, Bookmark, BookmarkForm, BookmarkPatch, BookmarkStore, Category,
    CategoryFilter, Config, FormErrors,
};
use smartmark_storage::{KvStore, MemoryKvStore, SqliteKvStore};
use smartmark_tui::{App, Store};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smartmark")]
#[command(version, about = "Terminal bookmark manager", long_about = None)]
struct Cli {
    /// SQLite database holding the bookmarks
    #[arg(long, global = true, env = "SMARTMARK_DB")]
    db: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List bookmarks, optionally filtered
    List {
        /// Case-insensitive text matched against title and url
        #[arg(short, long, default_value = "")]
        search: String,
        /// All, AI, Dev, Learning or Tools
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
        /// Print the raw JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a bookmark
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// AI, Dev, Learning or Tools (defaults to the configured category)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Edit fields of an existing bookmark
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// AI, Dev, Learning or Tools
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Delete a bookmark
    Delete { id: u64 },
    /// Interactive terminal UI (the default)
    Tui,
}

/// Strict category parse; clap would otherwise go through the lenient
/// `From<String>` used for stored data
fn parse_category(name: &str) -> Result<Category, smartmark_core::Error> {
    name.parse()
}

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);

    // The TUI owns the screen, so its logs go to a file instead of stderr
    let (default_filter, writer) = if interactive {
        ("smartmark=warn", tui_log_writer())
    } else {
        ("smartmark=info", BoxMakeWriter::new(io::stderr))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!interactive),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let mut store = open_store(&cli, &config);

    match command {
        Commands::Tui => {
            let mouse_enabled = config.ui.mouse_enabled;
            smartmark_tui::run_tui(App::new(store, &config.ui), mouse_enabled)
        }
        command => run(command, &mut store, &config, &mut io::stdout().lock()),
    }
}

/// Append-only log file under the data dir, or nowhere if it can't be opened
fn tui_log_writer() -> BoxMakeWriter {
    let file = Config::log_path().ok().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

/// Execute one non-interactive subcommand against the store
fn run<W: Write>(
    command: Commands,
    store: &mut Store,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Commands::List {
            search,
            category,
            json,
        } => {
            let hits = store.search(&search, &category);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&hits)?)?;
            } else if hits.is_empty() {
                writeln!(out, "No bookmarks match.")?;
            } else {
                for bookmark in hits {
                    print_bookmark(out, bookmark)?;
                }
            }
        }
        Commands::Add {
            title,
            url,
            category,
        } => {
            let form = BookmarkForm {
                title,
                url,
                category: Some(category.unwrap_or_else(|| config.ui.default_category.clone())),
            };
            let draft = validate(&form).map_err(invalid)?;
            let added = store.add(draft);
            tracing::info!("Bookmark added successfully");
            warn_if_unsaved(store);
            print_bookmark(out, &added)?;
        }
        Commands::Edit {
            id,
            title,
            url,
            category,
        } => {
            let requested = BookmarkPatch {
                title,
                url,
                category,
            };
            if requested.is_empty() {
                anyhow::bail!("Nothing to change. Pass --title, --url or --category");
            }

            let existing = store
                .get(id)
                .ok_or(smartmark_core::Error::NotFound(id))?;

            // Validate the merged record, the same way the edit form does
            let mut merged = existing.clone();
            requested.apply(&mut merged);
            let form = BookmarkForm::from_bookmark(&merged);

            let draft = validate_edit(&form, existing).map_err(invalid)?;
            store.update(id, BookmarkPatch::from(draft));
            tracing::info!("Bookmark updated");
            warn_if_unsaved(store);
            if let Some(updated) = store.get(id) {
                print_bookmark(out, updated)?;
            }
        }
        Commands::Delete { id } => {
            let removed = store
                .remove(id)
                .ok_or(smartmark_core::Error::NotFound(id))?;
            tracing::info!("Bookmark deleted");
            warn_if_unsaved(store);
            writeln!(out, "Deleted {} ({})", removed.title, removed.url)?;
        }
        Commands::Tui => anyhow::bail!("The terminal UI needs an interactive session"),
    }

    Ok(())
}

/// Open the configured database, falling back to a throwaway in-memory slot
/// so the session still works (changes just won't stick)
fn open_store(cli: &Cli, config: &Config) -> Store {
    let key = config.storage.key.clone();

    let db_path = match &cli.db {
        Some(path) => Ok(path.clone()),
        None => config.storage.resolved_db_path(),
    };

    let kv: Box<dyn KvStore> = match db_path {
        Ok(path) => match SqliteKvStore::new(&path) {
            Ok(kv) => {
                tracing::debug!("Using bookmark database {}", path.display());
                Box::new(kv)
            }
            Err(e) => {
                tracing::warn!(
                    "Could not open {}: {}. Changes will not be saved",
                    path.display(),
                    e
                );
                Box::new(MemoryKvStore::new())
            }
        },
        Err(e) => {
            tracing::warn!("{}. Changes will not be saved", e);
            Box::new(MemoryKvStore::new())
        }
    };

    BookmarkStore::open_with_key(kv, key)
}

fn invalid(errors: FormErrors) -> anyhow::Error {
    anyhow::Error::new(smartmark_core::Error::from(errors)).context("Bookmark not saved")
}

fn warn_if_unsaved(store: &Store) {
    if store.has_unsaved_changes() {
        tracing::warn!("Change applied but could not be written to the database");
    }
}

fn print_bookmark<W: Write>(out: &mut W, bookmark: &Bookmark) -> io::Result<()> {
    writeln!(
        out,
        "{:>14}  {:<9} {:<24} {}",
        bookmark.id, bookmark.category, bookmark.title, bookmark.url
    )
}
