//! Report formatting and printing utilities.
//!
//! The text format groups nuggets by their source file hint in a cargo-like
//! layout. The JSON format prints the catalog and nothing else on stdout so it
//! can be piped. Separate from core logic to allow nuggets to be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use indexmap::IndexMap;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, InitSummary, ScanSummary},
};
use crate::core::{ScanDiagnostic, TemplateCatalog, TemplateEntry};
use crate::utils::make_relative_path;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the catalog as human-readable text to stdout.
pub fn report(catalog: &TemplateCatalog) {
    report_to(catalog, &mut io::stdout().lock());
}

/// Print the catalog to a custom writer.
///
/// Entries sharing a source file hint are printed together, in the order the
/// hint was first seen.
pub fn report_to<W: Write>(catalog: &TemplateCatalog, writer: &mut W) {
    for (hint, entries) in group_by_hint(catalog) {
        let _ = writeln!(writer, "{}", hint.bold());
        for entry in entries {
            print_entry(entry, writer);
        }
        let _ = writeln!(writer);
    }

    print_hint_table(catalog, writer);
}

/// Print the catalog as pretty JSON to a custom writer.
pub fn report_json_to<W: Write>(catalog: &TemplateCatalog, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(catalog).map_err(io::Error::other)?;
    writeln!(writer, "{}", json)
}

/// Print a success message after a scan.
pub fn print_success(nuggets: usize, source_files: usize) {
    print_success_to(nuggets, source_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(nuggets: usize, source_files: usize, writer: &mut W) {
    let msg = format!(
        "Found {} {} in {} source {}",
        nuggets,
        if nuggets == 1 { "nugget" } else { "nuggets" },
        source_files,
        if source_files == 1 { "file" } else { "files" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a message when the scan found nothing.
pub fn print_empty_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "No nuggets found in {} source {}",
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
        .red()
    );
}

/// Print scan diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[ScanDiagnostic], verbose: bool) {
    print_diagnostics_to(diagnostics, verbose, &mut io::stderr().lock());
}

/// Print scan diagnostics to a custom writer.
///
/// In verbose mode every diagnostic is listed, otherwise only a count.
pub fn print_diagnostics_to<W: Write>(
    diagnostics: &[ScanDiagnostic],
    verbose: bool,
    writer: &mut W,
) {
    if diagnostics.is_empty() {
        return;
    }

    if verbose {
        for diagnostic in diagnostics {
            let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), diagnostic);
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped during scan (use {} for details)",
            "warning:".bold().yellow(),
            diagnostics.len(),
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_scan(summary: &ScanSummary, verbose: bool) {
    let outcome = &summary.outcome;
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    if verbose {
        print_scanned_files_to(summary, &mut stderr);
    }

    match summary.format {
        OutputFormat::Json => {
            if let Err(err) = report_json_to(&outcome.catalog, &mut stdout) {
                let _ = writeln!(stderr, "{} {}", "error:".bold().red(), err);
            }
        }
        OutputFormat::Text => {
            report_to(&outcome.catalog, &mut stdout);
            if outcome.catalog.is_empty() {
                print_empty_to(outcome.scanned_files.len(), &mut stdout);
            } else {
                print_success_to(
                    outcome.catalog.len(),
                    outcome.scanned_files.len(),
                    &mut stdout,
                );
            }
        }
    }

    print_diagnostics_to(&outcome.diagnostics, verbose, &mut stderr);
}

fn print_scanned_files_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    if !summary.config_from_file {
        let _ = writeln!(
            writer,
            "{} no config file found, using defaults",
            "note:".bold()
        );
    }
    for root in &summary.roots {
        let _ = writeln!(
            writer,
            "{} {}",
            "Scanning".green().bold(),
            make_relative_path(&summary.project_dir, root)
        );
    }
    for file in &summary.outcome.scanned_files {
        let _ = writeln!(
            writer,
            "  {} {}",
            "-".dimmed(),
            make_relative_path(&summary.project_dir, file)
        );
    }
}

fn print_entry<W: Write>(entry: &TemplateEntry, writer: &mut W) {
    let _ = writeln!(writer, "  \"{}\"", escape_message(&entry.message_text));

    for reference in &entry.references {
        let _ = writeln!(
            writer,
            "    {} {} (offset {})",
            "-->".blue(),
            reference.source_path,
            reference.position
        );
    }

    for comment in &entry.comments {
        let _ = writeln!(writer, "    {} {} {}", "=".blue(), "note:".bold(), comment);
    }
}

fn print_hint_table<W: Write>(catalog: &TemplateCatalog, writer: &mut W) {
    let groups = group_by_hint(catalog);
    if groups.len() < 2 {
        return;
    }

    let name_width = groups
        .keys()
        .map(|hint| UnicodeWidthStr::width(*hint))
        .max()
        .unwrap_or(0);

    for (hint, entries) in &groups {
        // Pad by display width; `{:<}` pads by chars, which misaligns CJK names.
        let padding = name_width - UnicodeWidthStr::width(*hint);
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {}",
            hint.cyan(),
            "",
            entries.len(),
            padding = padding
        );
    }
    let _ = writeln!(writer);
}

fn group_by_hint(catalog: &TemplateCatalog) -> IndexMap<&str, Vec<&TemplateEntry>> {
    let mut groups: IndexMap<&str, Vec<&TemplateEntry>> = IndexMap::new();
    for entry in catalog.values() {
        groups
            .entry(entry.source_file_hint.as_str())
            .or_default()
            .push(entry);
    }
    groups
}

fn escape_message(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn print_init(summary: &InitSummary) {
    println!(
        "{} Created {}",
        SUCCESS_MARK.green(),
        summary.path.display()
    );
}
