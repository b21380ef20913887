//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use serde::Serialize;
use visor_core::{Notice, Placeholder, ReaderView, Record, RecordView, Screen};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Shown in the note column of rows that have no summary yet.
pub(crate) const NOTE_PLACEHOLDER: &str = "(no note yet, add one with: note <ID> <TEXT>)";

const NOTE_WIDTH: usize = 60;

#[derive(Serialize)]
struct TranscriptDocument<'a> {
    id: &'a str,
    txt_id: Option<&'a str>,
    text: &'a str,
}

pub(crate) fn render_records(screen: &Screen, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&screen.visible())?,
        OutputFormat::Table => print!("{}", record_table(screen)),
    }
    Ok(())
}

pub(crate) fn render_saved(record: &Record, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&RecordView::from(record))?,
        OutputFormat::Table => println!("saved note for {}", record.id),
    }
    Ok(())
}

pub(crate) fn render_transcript(record: &Record, text: &str, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&TranscriptDocument {
            id: &record.id,
            txt_id: record.transcript_id(),
            text,
        })?,
        OutputFormat::Table => print!("{}", transcript_text(record, text)),
    }
    Ok(())
}

pub(crate) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("! {}", notice.message);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Table of the visible rows, followed by the edit state when a record is
/// being edited.
pub(crate) fn record_table(screen: &Screen) -> String {
    let mut out = String::new();
    match screen.placeholder() {
        Some(Placeholder::Loading) => out.push_str("loading records...\n"),
        Some(Placeholder::Empty) if screen.search_term().is_empty() => {
            out.push_str("no records\n");
        }
        Some(Placeholder::Empty) => {
            let _ = writeln!(out, "no records match '{}'", screen.search_term());
        }
        None => {
            let editing = screen.edit().editing_id();
            let _ = writeln!(
                out,
                "  {:<14} {:<24} {:<10} {:<6} {:<3} NOTE",
                "ID", "CONTACT", "DATE", "TIME", "ST"
            );
            for view in screen.visible() {
                let marker = if editing == Some(view.record.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let _ = writeln!(
                    out,
                    "{marker} {:<14} {:<24} {:<10} {:<6} {:<3} {}",
                    view.record.id,
                    view.display_name,
                    view.timestamp.date,
                    view.timestamp.time,
                    view.status.label(),
                    note_cell(&view.record.resumen)
                );
            }
        }
    }
    if let Some(draft) = screen.edit().draft() {
        let state = if screen.edit().is_saving() {
            "saving"
        } else {
            "editing"
        };
        let _ = writeln!(out, "{state} {}: {}", draft.record_id, draft.text);
    }
    if screen.is_loading() && screen.placeholder().is_none() {
        out.push_str("refreshing...\n");
    }
    out
}

/// Reader screen for the current [`ReaderView`]; empty for the list view.
pub(crate) fn reader_text(view: &ReaderView) -> String {
    match view {
        ReaderView::List => String::new(),
        ReaderView::Loading { record, .. } => {
            format!("{}\nloading transcript...\n", reader_heading(record))
        }
        ReaderView::Loaded { record, text } => transcript_text(record, text),
        ReaderView::Error { record, message } => {
            format!("{}\n{message}\n", reader_heading(record))
        }
    }
}

fn transcript_text(record: &Record, text: &str) -> String {
    let mut out = reader_heading(record);
    out.push('\n');
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn reader_heading(record: &Record) -> String {
    let timestamp = record.timestamp();
    let mut heading = format!("== {} ({}", record.display_name(), timestamp.date);
    if !timestamp.time.is_empty() {
        heading.push(' ');
        heading.push_str(&timestamp.time);
    }
    heading.push_str(") ==");
    heading
}

fn note_cell(resumen: &str) -> String {
    let first_line = resumen.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return NOTE_PLACEHOLDER.to_string();
    }
    if first_line.chars().count() <= NOTE_WIDTH && !resumen.trim().contains('\n') {
        return first_line.to_string();
    }
    let mut cell: String = first_line.chars().take(NOTE_WIDTH).collect();
    cell.push_str("...");
    cell
}
