//! One-shot record commands: each loads the list, acts, renders, exits.

use anyhow::anyhow;
use tracing::info;
use visor_core::{Notice, ReaderView, RecordGateway, Session};

use crate::cli::{ListArgs, NoteArgs, OutputFormat, ReadArgs};
use crate::client::{CliError, CliResult, take_failure};
use crate::output::{render_records, render_saved, render_transcript};

async fn loaded_session<G: RecordGateway>(gateway: G) -> CliResult<Session<G>> {
    let mut session = Session::new(gateway);
    session.refresh().await;
    take_failure(session.screen_mut())?;
    Ok(session)
}

pub(crate) async fn handle_list<G: RecordGateway>(
    gateway: G,
    args: ListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut session = loaded_session(gateway).await?;
    if let Some(term) = args.search {
        session.screen_mut().set_search_term(term);
    }
    render_records(session.screen(), format)
}

pub(crate) async fn handle_note<G: RecordGateway>(
    gateway: G,
    args: NoteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut session = loaded_session(gateway).await?;
    let screen = session.screen_mut();
    screen
        .begin_edit(&args.id)
        .and_then(|()| screen.update_draft(args.text))
        .map_err(|err| CliError::validation(Notice::validation(&err).message))?;

    session.save().await;
    take_failure(session.screen_mut())?;

    let record = session
        .screen()
        .record(&args.id)
        .ok_or_else(|| CliError::failure(anyhow!("record {} vanished after saving", args.id)))?;
    info!(record_id = %record.id, "note saved");
    render_saved(record, format)
}

pub(crate) async fn handle_read<G: RecordGateway>(
    gateway: G,
    args: ReadArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut session = loaded_session(gateway).await?;
    session.open_reader(&args.id).await;
    take_failure(session.screen_mut())?;

    match session.screen().view() {
        ReaderView::Loaded { record, text } => render_transcript(record, text, format),
        ReaderView::Error { message, .. } => Err(CliError::failure(anyhow!(message.clone()))),
        ReaderView::List | ReaderView::Loading { .. } => Err(CliError::failure(anyhow!(
            "transcript request for {} did not complete",
            args.id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visor_test_support::fixtures::{record, sample_listing, with_transcript};
    use visor_test_support::mocks::{Call, Failure, ScriptedGateway};

    fn note(id: &str, text: &str) -> NoteArgs {
        NoteArgs {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn list_fails_when_the_endpoint_fails() {
        let gateway = ScriptedGateway::new(sample_listing());
        gateway.fail_next_list(Failure::Network("connection refused".into()));
        let err = handle_list(&gateway, ListArgs::default(), OutputFormat::Table)
            .await
            .expect_err("list should fail");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("could not load records"));
    }

    #[tokio::test]
    async fn note_writes_the_new_summary() {
        let gateway = ScriptedGateway::new(sample_listing());
        handle_note(&gateway, note("B", "llamar el lunes"), OutputFormat::Json)
            .await
            .expect("note should save");
        assert_eq!(
            gateway.calls(),
            vec![
                Call::List,
                Call::Update("B".into(), "llamar el lunes".into())
            ]
        );
        let stored = gateway.stored();
        let saved = stored.iter().find(|item| item.id == "B").expect("B stored");
        assert_eq!(saved.resumen, "llamar el lunes");
    }

    #[tokio::test]
    async fn note_for_unknown_record_is_a_validation_error() {
        let gateway = ScriptedGateway::new(sample_listing());
        let err = handle_note(&gateway, note("Z", "x"), OutputFormat::Table)
            .await
            .expect_err("unknown id");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "record Z is not in the list");
        assert_eq!(gateway.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn network_failure_on_save_asks_to_check_the_connection() {
        let gateway = ScriptedGateway::new(sample_listing());
        gateway.fail_next_update(Failure::Network("timed out".into()));
        let err = handle_note(&gateway, note("A", "x"), OutputFormat::Table)
            .await
            .expect_err("save should fail");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("connection error while saving"));
    }

    #[tokio::test]
    async fn read_fetches_the_linked_document() {
        let listing = vec![with_transcript(record("A", None, ""), "doc-a")];
        let gateway = ScriptedGateway::new(listing).with_transcript("doc-a", "Hola");
        handle_read(&gateway, ReadArgs { id: "A".into() }, OutputFormat::Table)
            .await
            .expect("transcript should load");
        assert_eq!(
            gateway.calls(),
            vec![Call::List, Call::FetchText("doc-a".into())]
        );
    }

    #[tokio::test]
    async fn read_without_transcript_makes_no_fetch() {
        let gateway = ScriptedGateway::new(sample_listing());
        let err = handle_read(&gateway, ReadArgs { id: "A".into() }, OutputFormat::Table)
            .await
            .expect_err("no transcript");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(gateway.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn read_failure_reports_the_inline_error() {
        let listing = vec![with_transcript(record("A", None, ""), "doc-a")];
        let gateway = ScriptedGateway::new(listing);
        let err = handle_read(&gateway, ReadArgs { id: "A".into() }, OutputFormat::Table)
            .await
            .expect_err("document missing");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().starts_with("could not load transcript"));
    }
}
