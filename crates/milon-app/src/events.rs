use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use milon_types::{AppEvent, UiEvent};

use crate::context::VocabContext;
use crate::state::AppState;

pub mod edit_entry;
pub mod practice;

use edit_entry::{
    handle_edit_entry, handle_form_cancel, handle_form_field, handle_new_entry,
    handle_source_input, handle_submit, handle_translation_reply, handle_translation_started,
};
use practice::{
    handle_advance, handle_practice_start, handle_practice_stop, handle_rate, handle_reveal,
    handle_speak, handle_toggle_direction,
};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    replies_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut ctx = {
        let config = state.config.read().await;
        VocabContext::from_config(&config, replies_tx)?
    };

    run_events(&mut ctx, ui_to_app_rx, app_to_ui_tx).await
}

/// Serially dispatch inbound events until `Quit` or a closed channel
pub async fn run_events(
    ctx: &mut VocabContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if matches!(event, AppEvent::UiEvent(UiEvent::Quit)) {
            tracing::info!("[EVENT_LOOP] Quit requested");
            ctx.edit.close();
            ctx.speaker.stop();
            return Ok(());
        }

        handle_events(ctx, &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::UiEvent(event) => handle_ui_event(ctx, app_to_ui_tx, event).await?,
        AppEvent::TranslationStarted { request } => {
            handle_translation_started(ctx, request, app_to_ui_tx).await?;
        }
        AppEvent::TranslationReply(reply) => {
            handle_translation_reply(ctx, reply, app_to_ui_tx).await?;
        }
        AppEvent::ShowForm(_)
        | AppEvent::ShowEntries(_)
        | AppEvent::ShowCard(_)
        | AppEvent::ShowSummary(_)
        | AppEvent::Notice(_)
        | AppEvent::BackendReady => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}

async fn handle_ui_event(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: UiEvent,
) -> anyhow::Result<()> {
    match event {
        UiEvent::NewEntry => handle_new_entry(ctx, app_to_ui_tx).await,
        UiEvent::EditEntry(index) => handle_edit_entry(ctx, index, app_to_ui_tx).await,
        UiEvent::SourceInput(text) => handle_source_input(ctx, text, app_to_ui_tx).await,
        field @ (UiEvent::TargetInput(_) | UiEvent::SetGender(_) | UiEvent::NotesInput(_)) => {
            handle_form_field(ctx, field, app_to_ui_tx).await
        }
        UiEvent::Submit => handle_submit(ctx, app_to_ui_tx).await,
        UiEvent::CancelForm => handle_form_cancel(ctx, app_to_ui_tx).await,
        UiEvent::ListEntries => {
            let entries = ctx.store.entries(ctx.list_id).to_vec();
            app_to_ui_tx.send(AppEvent::ShowEntries(entries)).await?;
            Ok(())
        }
        UiEvent::StartPractice => handle_practice_start(ctx, app_to_ui_tx).await,
        UiEvent::Reveal => handle_reveal(ctx, app_to_ui_tx).await,
        UiEvent::Rate(difficulty) => handle_rate(ctx, difficulty, app_to_ui_tx).await,
        UiEvent::Next => handle_advance(ctx, app_to_ui_tx).await,
        UiEvent::ToggleDirection => handle_toggle_direction(ctx, app_to_ui_tx).await,
        UiEvent::Speak => handle_speak(ctx, app_to_ui_tx).await,
        UiEvent::StopPractice => handle_practice_stop(ctx, app_to_ui_tx).await,
        // Handled by the loop itself
        UiEvent::Quit => Ok(()),
    }
}
