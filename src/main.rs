//! wikidiff - render wiki text diffs as HTML and undo single edits.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wikidiff::adapters::NotifyFileWatcher;
use wikidiff::ports::FileWatcher;
use wikidiff::{
    diff_page, logging, AlignAlgorithm, BindingKind, Config, DiffRenderer, EditId, LineSnapshot,
    StyleCache, LINE_BREAK,
};

#[derive(Parser, Debug)]
#[command(name = "wikidiff")]
#[command(about = "Side-by-side HTML diffs with per-line undo")]
#[command(version)]
struct Cli {
    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the diff between two files as HTML
    Render(RenderArgs),
    /// Print the right-hand file with one edit undone
    Undo(UndoArgs),
    /// Print the <style> element rendered pages use
    Styles(StylesArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Earlier version of the text
    left: PathBuf,

    /// Later version of the text
    right: PathBuf,

    /// Unchanged lines to show around each change (default: from config, else 2)
    #[arg(short, long)]
    context: Option<usize>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a complete HTML page instead of bare table rows
    #[arg(long)]
    page: bool,

    /// How row actions are exposed to the host page
    #[arg(long, value_enum)]
    binding: Option<BindingKind>,

    /// Alignment algorithm
    #[arg(long, value_enum)]
    algorithm: Option<AlignAlgorithm>,

    /// Custom style sheet for --page (default: style.css)
    #[arg(long)]
    style_sheet: Option<PathBuf>,

    /// Keep running and re-render when an input or the style sheet changes (needs --output)
    #[arg(long, requires = "output")]
    watch: bool,
}

#[derive(Args, Debug)]
struct UndoArgs {
    /// Earlier version of the text
    left: PathBuf,

    /// Later version of the text
    right: PathBuf,

    /// Edit to undo: change:L:R, add:R, delete:L:R, or the JSON from a rendered row
    #[arg(short, long)]
    edit: EditId,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StylesArgs {
    /// Custom style sheet (default: style.css)
    #[arg(long)]
    style_sheet: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Render(args) => run_render(args, config),
        Command::Undo(args) => run_undo(args),
        Command::Styles(args) => {
            let styles = StyleCache::new(args.style_sheet.unwrap_or(config.style_sheet));
            write_output(None, &styles.diff_head())
        }
    }
}

fn run_render(args: RenderArgs, config: Config) -> Result<()> {
    let context_lines = args.context.unwrap_or(config.context_lines);
    let renderer = DiffRenderer::with_algorithm(args.algorithm.unwrap_or(config.algorithm));
    let binding = args.binding.unwrap_or(config.binding).binding();
    let styles = StyleCache::new(args.style_sheet.clone().unwrap_or(config.style_sheet));

    let render_once = || -> Result<()> {
        let left = read_document(&args.left)?;
        let right = read_document(&args.right)?;
        let diff = renderer.render(&left.text, &right.text, context_lines);
        let html = if args.page {
            diff_page(&diff, binding.as_ref(), &styles)
        } else {
            diff.to_html(binding.as_ref())
        };
        tracing::info!(rows = diff.rows.len(), changed = diff.has_changes(), "rendered");
        write_output(args.output.as_deref(), &html)
    };

    render_once()?;
    if !args.watch {
        return Ok(());
    }

    let watcher = NotifyFileWatcher::new(&[
        args.left.clone(),
        args.right.clone(),
        styles.path().to_path_buf(),
    ])?;
    tracing::info!("watching for changes, press Ctrl-C to stop");

    loop {
        std::thread::sleep(Duration::from_millis(250));
        let changed = watcher.take_changes();
        if changed.is_empty() {
            continue;
        }
        tracing::info!(files = ?changed, "inputs changed, re-rendering");
        styles.reset();
        if let Err(e) = render_once() {
            tracing::warn!(error = %format!("{:#}", e), "render failed");
        }
    }
}

fn run_undo(args: UndoArgs) -> Result<()> {
    let left = read_document(&args.left)?;
    let right = read_document(&args.right)?;

    let snapshot = LineSnapshot::from_texts(&left.text, &right.text);
    let restored = snapshot
        .undo(&args.edit)
        .with_context(|| format!("Cannot undo {}", args.edit))?;
    tracing::info!(edit = %args.edit, "undone");

    let restored = if right.crlf {
        restored
    } else {
        restored.replace(LINE_BREAK, "\n")
    };
    write_output(args.output.as_deref(), &restored)
}

/// A file's text with `\r\n` line breaks, and whether it had them already.
struct Document {
    text: String,
    crlf: bool,
}

fn read_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(normalize_line_breaks(&raw))
}

fn normalize_line_breaks(raw: &str) -> Document {
    let crlf = raw.contains(LINE_BREAK) || !raw.contains('\n');
    let text = if crlf {
        raw.to_string()
    } else {
        raw.replace('\n', LINE_BREAK)
    };
    Document { text, crlf }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
