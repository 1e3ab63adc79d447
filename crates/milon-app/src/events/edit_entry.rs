use kanal::AsyncSender;
use milon_types::{AppEvent, Notice, TranslationReply, UiEvent};

use crate::context::VocabContext;
use crate::edit_flow::{ReplyOutcome, SubmitError, Submitted};

async fn show_form(ctx: &VocabContext, app_to_ui_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::ShowForm(ctx.edit.view())).await?;
    Ok(())
}

async fn notify(app_to_ui_tx: &AsyncSender<AppEvent>, notice: Notice) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}

pub async fn handle_new_entry(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    ctx.edit.open_new();
    show_form(ctx, app_to_ui_tx).await
}

pub async fn handle_edit_entry(
    ctx: &mut VocabContext,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(entry) = ctx.store.entries(ctx.list_id).get(index).cloned() else {
        return notify(
            app_to_ui_tx,
            Notice::error("Error", format!("There is no word number {}", index + 1)),
        )
        .await;
    };

    ctx.edit.open_edit(&entry);
    show_form(ctx, app_to_ui_tx).await
}

pub async fn handle_source_input(
    ctx: &mut VocabContext,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !ctx.edit.is_open() {
        ctx.edit.open_new();
    }

    ctx.edit.set_source(text);
    show_form(ctx, app_to_ui_tx).await
}

pub async fn handle_form_field(
    ctx: &mut VocabContext,
    field: UiEvent,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !ctx.edit.is_open() {
        return notify(
            app_to_ui_tx,
            Notice::error("Error", "Start a new word first"),
        )
        .await;
    }

    match field {
        UiEvent::TargetInput(text) => ctx.edit.set_target(text),
        UiEvent::SetGender(gender) => ctx.edit.set_gender(gender),
        UiEvent::NotesInput(text) => ctx.edit.set_notes(text),
        other => {
            tracing::warn!("Not a form field event: {:?}", other);
            return Ok(());
        }
    }

    show_form(ctx, app_to_ui_tx).await
}

pub async fn handle_submit(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !ctx.edit.is_open() {
        return notify(app_to_ui_tx, Notice::error("Error", "No word form is open")).await;
    }

    let list_id = Some(ctx.list_id);
    match ctx.edit.submit(&mut ctx.store, list_id) {
        Ok(Submitted::Added(entry)) => {
            tracing::info!(entry_id = %entry.id, "Word added");
            notify(
                app_to_ui_tx,
                Notice::info(
                    "Word added",
                    format!(
                        "\"{}\" has been added to your vocabulary list.",
                        entry.source_text
                    ),
                ),
            )
            .await
        }
        Ok(Submitted::Updated(entry)) => {
            tracing::info!(entry_id = %entry.id, "Word updated");
            notify(
                app_to_ui_tx,
                Notice::info(
                    "Word updated",
                    format!(
                        "\"{}\" has been updated in your vocabulary list.",
                        entry.source_text
                    ),
                ),
            )
            .await
        }
        Err(SubmitError::Validation(e)) => {
            notify(app_to_ui_tx, Notice::error("Error", e.to_string())).await?;
            show_form(ctx, app_to_ui_tx).await
        }
        Err(SubmitError::Store(e)) => {
            tracing::error!("Failed to save word: {}", e);
            notify(app_to_ui_tx, Notice::error("Error", e.to_string())).await?;
            show_form(ctx, app_to_ui_tx).await
        }
    }
}

pub async fn handle_form_cancel(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    ctx.edit.close();
    notify(app_to_ui_tx, Notice::info("Cancelled", "The word was not saved.")).await
}

pub async fn handle_translation_started(
    ctx: &mut VocabContext,
    request: u64,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if ctx.edit.translation_started(request) {
        show_form(ctx, app_to_ui_tx).await?;
    }
    Ok(())
}

pub async fn handle_translation_reply(
    ctx: &mut VocabContext,
    reply: TranslationReply,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match ctx.edit.apply_reply(reply) {
        ReplyOutcome::Applied => show_form(ctx, app_to_ui_tx).await,
        ReplyOutcome::Failed(message) => {
            notify(app_to_ui_tx, Notice::error("Translation Error", message)).await?;
            show_form(ctx, app_to_ui_tx).await
        }
        ReplyOutcome::Stale => Ok(()),
    }
}
