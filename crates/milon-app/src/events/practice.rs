use kanal::AsyncSender;
use milon_core::practice::PracticeSession;
use milon_types::{AppEvent, DifficultyRating, Notice};

use crate::context::VocabContext;

async fn show_card(session: &PracticeSession, app_to_ui_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::ShowCard(session.view())).await?;
    Ok(())
}

async fn no_session(app_to_ui_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::Notice(Notice::error(
            "Practice",
            "No practice session is running",
        )))
        .await?;
    Ok(())
}

pub async fn handle_practice_start(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entries = ctx.store.entries(ctx.list_id).to_vec();
    ctx.progress.reset();

    match PracticeSession::new(entries, ctx.direction, ctx.progress.clone()) {
        Ok(session) => {
            tracing::info!(cards = session.len(), "Practice session started");
            show_card(&session, app_to_ui_tx).await?;
            ctx.practice = Some(session);
        }
        Err(e) => {
            app_to_ui_tx
                .send(AppEvent::Notice(Notice::error("Practice", e.to_string())))
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_reveal(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(session) = ctx.practice.as_mut() else {
        return no_session(app_to_ui_tx).await;
    };

    if session.reveal() {
        show_card(session, app_to_ui_tx).await?;
    }
    Ok(())
}

pub async fn handle_rate(
    ctx: &mut VocabContext,
    difficulty: DifficultyRating,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(session) = ctx.practice.as_mut() else {
        return no_session(app_to_ui_tx).await;
    };

    match session.rate(difficulty) {
        Ok(()) => show_card(session, app_to_ui_tx).await,
        Err(e) => {
            tracing::debug!("Rating rejected: {}", e);
            app_to_ui_tx
                .send(AppEvent::Notice(Notice::error(
                    "Practice",
                    "Reveal the answer before rating it",
                )))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_advance(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(session) = ctx.practice.as_mut() else {
        return no_session(app_to_ui_tx).await;
    };

    match session.advance() {
        Ok(_) => show_card(session, app_to_ui_tx).await,
        Err(e) => {
            tracing::debug!("Advance rejected: {}", e);
            app_to_ui_tx
                .send(AppEvent::Notice(Notice::error(
                    "Practice",
                    "Rate this word before moving on",
                )))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_toggle_direction(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    ctx.direction = ctx.direction.flipped();

    if let Some(session) = ctx.practice.as_mut() {
        session.toggle_direction();
        show_card(session, app_to_ui_tx).await?;
    } else {
        app_to_ui_tx
            .send(AppEvent::Notice(Notice::info(
                "Practice",
                format!("Direction set to {}", ctx.direction.label()),
            )))
            .await?;
    }
    Ok(())
}

pub async fn handle_speak(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(session) = ctx.practice.as_ref() else {
        return no_session(app_to_ui_tx).await;
    };

    let Some(text) = session.speakable_text() else {
        app_to_ui_tx
            .send(AppEvent::Notice(Notice::error(
                "Practice",
                "Reveal the answer first",
            )))
            .await?;
        return Ok(());
    };

    ctx.speaker.say(text, &ctx.source_voice);
    Ok(())
}

pub async fn handle_practice_stop(
    ctx: &mut VocabContext,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if ctx.practice.take().is_none() {
        return no_session(app_to_ui_tx).await;
    }

    ctx.speaker.stop();
    app_to_ui_tx
        .send(AppEvent::ShowSummary(ctx.progress.summary()))
        .await?;
    Ok(())
}
