//! MooData CLI - design indicator worksheets from the shell

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use moodata::prelude::*;
use moodata::{compare_views, load_or_default, CsvWriteOptions, DIVIDER};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEFAULT_VIEW: &str = "方案1";

#[derive(Parser)]
#[command(name = "moodata")]
#[command(author, version, about = "Design indicator worksheet tool")]
struct Cli {
    /// Directory holding saved projects
    #[arg(long, env = "MOODATA_STORE", default_value = ".moodata", global = true)]
    store: PathBuf,

    /// Project id
    #[arg(long, env = "MOODATA_PROJECT", default_value = "default", global = true)]
    project: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the views of the project
    Views,

    /// Add a view seeded from the default template
    NewView { name: String },

    /// Rename a view
    RenameView { old: String, new: String },

    /// Remove a view (the last one cannot be removed)
    RemoveView { name: String },

    /// Print all indicators of a view
    Show { view: String },

    /// Set an input indicator and recompute the view
    ///
    /// GROUP is a group name or its 1-based position.
    Set {
        view: String,
        group: String,
        name: String,
        value: String,
    },

    /// Recompute all derived indicators of a view
    Recalc { view: String },

    /// Export a view as CSV
    Export {
        view: String,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a CSV file into a view
    Import { view: String, file: PathBuf },

    /// Show the differences of OTHER against BASE
    Compare { base: String, other: String },

    /// List the built-in formulas
    Formulas,
}

fn main() -> Result<()> {
    let level = std::env::var("MOODATA_LOG").unwrap_or_else(|_| "warn".to_string());
    let _logger = Logger::try_with_str(&level)
        .with_context(|| format!("Invalid log level '{}'", level))?
        .log_to_stderr()
        .start()
        .context("Failed to start logger")?;

    let cli = Cli::parse();
    let catalog = Catalog::with_defaults().context("Invalid formula catalog")?;
    let mut session = Session::open(&cli.store, &cli.project)?;

    match cli.command {
        Commands::Views => {
            for (i, view) in session.book.views().enumerate() {
                println!("{}\t{}", i, view.name());
            }
            Ok(())
        }
        Commands::NewView { name } => {
            session.book.add_view(&name)?;
            session.save()
        }
        Commands::RenameView { old, new } => {
            let index = session.view_index(&old)?;
            session.book.rename_view(index, &new)?;
            session.save()
        }
        Commands::RemoveView { name } => {
            let index = session.view_index(&name)?;
            session.book.remove_view(index)?;
            session.save()
        }
        Commands::Show { view } => show(session.view(&view)?),
        Commands::Set {
            view,
            group,
            name,
            value,
        } => {
            let target = session.view_mut(&view)?;
            let (group, name) = resolve_field(target, &group, &name)?;
            let stats = target
                .edit_and_recalculate(&catalog, &group, &name, &value)
                .with_context(|| format!("Cannot set '{}'", name.trim()))?;
            eprintln!("Updated {} values", stats.changed);
            session.save()
        }
        Commands::Recalc { view } => {
            let stats = session.view_mut(&view)?.recalculate(&catalog);
            eprintln!(
                "Evaluated {} formulas ({} written, {} cleared, {} changed)",
                stats.formula_count, stats.written, stats.cleared, stats.changed
            );
            session.save()
        }
        Commands::Export { view, output } => export(session.view(&view)?, output.as_deref()),
        Commands::Import { view, file } => {
            let report = session
                .view_mut(&view)?
                .import_csv_file(&catalog, &file)
                .with_context(|| format!("Failed to import '{}'", file.display()))?;
            eprintln!(
                "Imported {} values ({} notes, {} rows ignored)",
                report.updated, report.notes_updated, report.dropped
            );
            session.save()
        }
        Commands::Compare { base, other } => {
            compare(session.view(&base)?, session.view(&other)?);
            Ok(())
        }
        Commands::Formulas => {
            for formula in catalog.formulas() {
                println!("{}", formula);
            }
            Ok(())
        }
    }
}

/// A loaded project and the store it came from
struct Session {
    repo: JsonFileRepository,
    project: String,
    book: IndicatorBook,
}

impl Session {
    fn open(store: &Path, project: &str) -> Result<Self> {
        let repo = JsonFileRepository::new(store);
        let book = load_or_default(&repo, project, DEFAULT_VIEW)
            .with_context(|| format!("Failed to load project '{}'", project))?;
        log::info!("opened project '{}' with {} views", project, book.view_count());
        Ok(Self {
            repo,
            project: project.to_string(),
            book,
        })
    }

    fn save(&mut self) -> Result<()> {
        self.repo
            .save(&self.project, &self.book)
            .with_context(|| format!("Failed to save project '{}'", self.project))
    }

    fn view_index(&self, name: &str) -> Result<usize> {
        self.book
            .view_index(name)
            .ok_or_else(|| Error::ViewNotFound(name.into()).into())
    }

    fn view(&self, name: &str) -> Result<&IndicatorView> {
        self.book
            .view(name)
            .ok_or_else(|| Error::ViewNotFound(name.into()).into())
    }

    fn view_mut(&mut self, name: &str) -> Result<&mut IndicatorView> {
        self.book
            .view_mut(name)
            .ok_or_else(|| Error::ViewNotFound(name.into()).into())
    }
}

/// Resolve shell arguments to the stored group and indicator names.
///
/// Sub-items are stored with a leading space, which is awkward to type, so an
/// indicator also matches on its trimmed name.
fn resolve_field(view: &IndicatorView, group: &str, name: &str) -> Result<(String, String)> {
    let group = match group.parse::<usize>() {
        Ok(n) if n >= 1 => view.groups().get(n - 1),
        _ => view.group(group),
    }
    .with_context(|| format!("Group '{}' not found", group))?;

    let entries = || group.data_entries().filter(|e| !e.is_label());
    let entry = entries()
        .find(|e| e.name == name)
        .or_else(|| entries().find(|e| e.name.trim() == name.trim()));

    match entry {
        Some(entry) => Ok((group.name.clone(), entry.name.clone())),
        None => bail!("Indicator '{}' not found in '{}'", name, group.name),
    }
}

fn show(view: &IndicatorView) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", view.name())?;

    for group in view.groups() {
        writeln!(out)?;
        writeln!(out, "{}", group.name)?;
        for entry in &group.entries {
            if entry.name == DIVIDER {
                writeln!(out, "  ----")?;
            } else if entry.is_label() {
                writeln!(out, "  {}", entry.name)?;
            } else {
                let value = if entry.value.is_empty() { "-" } else { &entry.value };
                write!(out, "  {}\t{} {}", entry.name, value, entry.unit)?;
                if !entry.note.is_empty() {
                    write!(out, "\t({})", entry.note)?;
                }
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

fn export(view: &IndicatorView, output: Option<&Path>) -> Result<()> {
    let options = CsvWriteOptions::default();

    if let Some(path) = output {
        CsvWriter::write_file(view, path, &options)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote '{}' to '{}'", view.name(), path.display());
    } else {
        CsvWriter::write(view, io::stdout().lock(), &options)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn compare(base: &IndicatorView, other: &IndicatorView) {
    println!("{} vs {}", other.name(), base.name());

    for group in compare_views(base, other) {
        println!();
        println!("{}", group.group);
        for indicator in &group.indicators {
            let marker = if indicator.is_decrease() { "v" } else { " " };
            println!(
                "{} {}\t{} {}",
                marker,
                indicator.name,
                indicator.display(),
                indicator.unit
            );
        }
    }
}
