//! Interactive shell over one [`Screen`].
//!
//! # Design
//! - The screen is owned by the input loop; gateway calls run as spawned
//!   tasks and report back through a channel, so typing never waits on the
//!   network.
//! - Leaving the shell waits for calls still in flight so a pending save is
//!   not dropped.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{Instrument, debug};
use visor_core::{Completion, Effect, ReaderView, RecordGateway, Screen, run_effect};

use crate::client::{CliError, CliResult};
use crate::output::{print_notices, reader_text, record_table};

const HELP: &str = "\
commands:
  list              show the records
  search [TERM]     filter by id, contact, or note; no term clears the filter
  refresh           reload the records
  edit <ID>         start editing a record's note
  draft <TEXT>      replace the draft text
  save              save the draft
  cancel            discard the draft
  read <ID>         open the transcript of a record
  close             return to the list
  help              show this help
  quit              leave the shell";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    List,
    Search(String),
    Refresh,
    Edit(String),
    Draft(String),
    Save,
    Cancel,
    Read(String),
    Close,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for a blank line.
pub(crate) fn parse_shell_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "search" => ShellCommand::Search(rest.to_string()),
        "refresh" => ShellCommand::Refresh,
        "edit" => ShellCommand::Edit(required_id(word, rest)?),
        "draft" => ShellCommand::Draft(rest.to_string()),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "read" => ShellCommand::Read(required_id(word, rest)?),
        "close" => ShellCommand::Close,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type help")),
    };
    Ok(Some(command))
}

fn required_id(word: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {word} <ID>"))
    } else {
        Ok(rest.to_string())
    }
}

pub(crate) async fn handle_shell<G>(gateway: G) -> CliResult<()>
where
    G: RecordGateway + 'static,
{
    let input = BufReader::new(tokio::io::stdin());
    run_shell(Arc::new(gateway), input).await
}

pub(crate) async fn run_shell<G, R>(gateway: Arc<G>, input: R) -> CliResult<()>
where
    G: RecordGateway + 'static,
    R: AsyncBufRead + Unpin,
{
    let (completions_tx, mut completions) = mpsc::unbounded_channel();
    let mut screen = Screen::new();
    let mut in_flight = 0_usize;
    let mut lines = input.lines();

    spawn_effect(&gateway, &completions_tx, screen.begin_refresh());
    in_flight += 1;
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input").map_err(CliError::failure)? else {
                    break;
                };
                match parse_shell_command(&line) {
                    Ok(None) => {}
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Some(effect) = execute(&mut screen, command) {
                            spawn_effect(&gateway, &completions_tx, effect);
                            in_flight += 1;
                        }
                    }
                    Err(message) => println!("{message}"),
                }
                print_notices(&screen.take_notices());
            }
            Some(completion) = completions.recv() => {
                in_flight = in_flight.saturating_sub(1);
                settle(&mut screen, completion);
            }
        }
    }

    if in_flight > 0 {
        debug!(in_flight, "waiting for pending requests");
    }
    while in_flight > 0 {
        let Some(completion) = completions.recv().await else {
            break;
        };
        in_flight -= 1;
        settle(&mut screen, completion);
    }
    Ok(())
}

fn spawn_effect<G>(gateway: &Arc<G>, completions: &UnboundedSender<Completion>, effect: Effect)
where
    G: RecordGateway + 'static,
{
    let gateway = Arc::clone(gateway);
    let completions = completions.clone();
    tokio::spawn(
        async move {
            let completion = run_effect(gateway.as_ref(), effect).await;
            let _ = completions.send(completion);
        }
        .in_current_span(),
    );
}

/// Apply one command to the screen, printing its immediate result. Returns
/// the gateway call to run, if any.
pub(crate) fn execute(screen: &mut Screen, command: ShellCommand) -> Option<Effect> {
    match command {
        ShellCommand::List => {
            print!("{}", record_table(screen));
            None
        }
        ShellCommand::Search(term) => {
            screen.set_search_term(term);
            print!("{}", record_table(screen));
            None
        }
        ShellCommand::Refresh => {
            let effect = screen.begin_refresh();
            println!("refreshing...");
            Some(effect)
        }
        ShellCommand::Edit(id) => {
            if screen.begin_edit(&id).is_ok() {
                let current = screen.record(&id).map_or("", |record| record.resumen.as_str());
                println!("editing {id}; current note: {current}");
            }
            None
        }
        ShellCommand::Draft(text) => {
            if screen.update_draft(text).is_ok() {
                println!("draft updated; type save to store it");
            }
            None
        }
        ShellCommand::Save => {
            let effect = screen.begin_save();
            if effect.is_some() {
                println!("saving...");
            } else if screen.edit().is_saving() {
                println!("a save is already in progress");
            }
            effect
        }
        ShellCommand::Cancel => {
            screen.cancel_edit();
            println!("edit cancelled");
            None
        }
        ShellCommand::Read(id) => {
            let effect = screen.open_reader(&id);
            if effect.is_some() {
                print!("{}", reader_text(screen.view()));
            }
            effect
        }
        ShellCommand::Close => {
            screen.close_reader();
            print!("{}", record_table(screen));
            None
        }
        ShellCommand::Help => {
            println!("{HELP}");
            None
        }
        ShellCommand::Quit => None,
    }
}

/// Fold a completion into the screen and print what changed.
pub(crate) fn settle(screen: &mut Screen, completion: Completion) {
    let echo = match &completion {
        Completion::Listed(..) => Echo::List,
        Completion::Saved(request, Ok(())) => Echo::Saved(request.record_id.clone()),
        Completion::Saved(_, Err(_)) => Echo::Nothing,
        Completion::TranscriptFetched(request, _) => match screen.view() {
            ReaderView::Loading { request_id, .. } if *request_id == request.request_id => {
                Echo::Reader
            }
            _ => Echo::Nothing,
        },
    };
    screen.apply(completion);
    match echo {
        Echo::List if screen.view().is_list() && !screen.is_loading() => {
            print!("{}", record_table(screen));
        }
        Echo::Saved(id) => println!("saved note for {id}"),
        Echo::Reader => print!("{}", reader_text(screen.view())),
        Echo::List | Echo::Nothing => {}
    }
    print_notices(&screen.take_notices());
}

enum Echo {
    List,
    Saved(String),
    Reader,
    Nothing,
}
