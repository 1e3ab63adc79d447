use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use milon_core::speech::Speaker;
use milon_types::{
    AppEvent, CardState, CardView, DifficultyRating, Direction, FormView, Gender, Notice,
    NoticeLevel, UiEvent,
};
use tokio::task::JoinHandle;

use super::support::{FakeWiktionary, HUMMUS, RecordingSpeech, next_matching};
use crate::context::VocabContext;
use crate::edit_flow::EntryEditFlow;
use crate::events::run_events;

struct Harness {
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(dictionary: &FakeWiktionary) -> Self {
        Self::with_speaker(dictionary, Speaker::disabled())
    }

    fn with_speaker(dictionary: &FakeWiktionary, speaker: Speaker) -> Self {
        let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(64);
        let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(64);

        let edit = EntryEditFlow::new(
            Some(dictionary.lookup()),
            ui_to_app_tx.clone(),
            Duration::from_millis(800),
            2,
        );
        let mut ctx = VocabContext::new(
            "Test list",
            edit,
            speaker,
            Direction::SourceToTarget,
            "he-IL".to_string(),
        );

        let task =
            tokio::spawn(async move { run_events(&mut ctx, ui_to_app_rx, app_to_ui_tx).await });

        Self {
            ui_to_app_tx,
            app_to_ui_rx,
            task,
        }
    }

    async fn send(&self, event: UiEvent) {
        self.ui_to_app_tx
            .send(AppEvent::UiEvent(event))
            .await
            .unwrap();
    }

    async fn form(&self, mut until: impl FnMut(&FormView) -> bool) -> FormView {
        next_matching(&self.app_to_ui_rx, |event| match event {
            AppEvent::ShowForm(view) if until(&view) => Some(view),
            _ => None,
        })
        .await
        .expect("form never reached the expected state")
    }

    async fn card(&self) -> CardView {
        next_matching(&self.app_to_ui_rx, |event| match event {
            AppEvent::ShowCard(view) => Some(view),
            _ => None,
        })
        .await
        .expect("no card shown")
    }

    async fn notice(&self) -> Notice {
        next_matching(&self.app_to_ui_rx, |event| match event {
            AppEvent::Notice(notice) => Some(notice),
            _ => None,
        })
        .await
        .expect("no notice shown")
    }
}

#[tokio::test(start_paused = true)]
async fn test_backend_ready_then_quit() {
    let dictionary = FakeWiktionary::new(&[]);
    let harness = Harness::start(&dictionary);

    let ready = next_matching(&harness.app_to_ui_rx, |event| {
        matches!(event, AppEvent::BackendReady).then_some(())
    })
    .await;
    assert!(ready.is_some());

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_add_word_with_auto_fill() {
    let dictionary = FakeWiktionary::new(&[("חומוס", HUMMUS)]);
    let harness = Harness::start(&dictionary);

    harness.send(UiEvent::NewEntry).await;
    harness.send(UiEvent::SourceInput("חומוס".into())).await;

    let filled = harness.form(|view| !view.target.is_empty()).await;
    assert_eq!(filled.target, "hummus");
    assert_eq!(filled.gender, Some(Gender::Masculine));
    assert!(!filled.is_translating);

    harness.send(UiEvent::Submit).await;
    let notice = harness.notice().await;
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, "Word added");
    assert!(notice.message.contains("חומוס"));

    harness.send(UiEvent::ListEntries).await;
    let entries = next_matching(&harness.app_to_ui_rx, |event| match event {
        AppEvent::ShowEntries(entries) => Some(entries),
        _ => None,
    })
    .await
    .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target_text, "hummus");

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_submit_without_translation_is_rejected() {
    let dictionary = FakeWiktionary::new(&[]);
    let harness = Harness::start(&dictionary);

    harness.send(UiEvent::NewEntry).await;
    harness.send(UiEvent::TargetInput("apple".into())).await;
    harness.send(UiEvent::Submit).await;

    let notice = harness.notice().await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(
        notice.message,
        "Both Hebrew word and English translation are required"
    );
    let form = harness.form(|_| true).await;
    assert_eq!(form.target, "apple");

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_reports_notice() {
    let dictionary = FakeWiktionary::new(&[]);
    let harness = Harness::start(&dictionary);

    harness.send(UiEvent::SourceInput("תפוח".into())).await;

    let notice = harness.notice().await;
    assert_eq!(notice.title, "Translation Error");
    assert_eq!(notice.level, NoticeLevel::Error);
    let form = harness.form(|view| view.translate_error.is_some()).await;
    assert!(!form.is_translating);

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_practice_round() {
    let dictionary = FakeWiktionary::new(&[]);
    let harness = Harness::start(&dictionary);

    harness.send(UiEvent::StartPractice).await;
    assert_eq!(harness.notice().await.title, "Practice");

    harness.send(UiEvent::NewEntry).await;
    harness.send(UiEvent::SourceInput("לחם".into())).await;
    harness.send(UiEvent::TargetInput("bread".into())).await;
    harness.send(UiEvent::Submit).await;
    assert_eq!(harness.notice().await.title, "Word added");

    harness.send(UiEvent::StartPractice).await;
    let card = harness.card().await;
    assert_eq!(card.state, CardState::Unrevealed);
    assert_eq!(card.front.text, "לחם");
    assert!(card.back.is_none());

    harness.send(UiEvent::Rate(DifficultyRating::Good)).await;
    assert_eq!(harness.notice().await.level, NoticeLevel::Error);

    harness.send(UiEvent::Reveal).await;
    let card = harness.card().await;
    assert_eq!(card.state, CardState::Revealed);
    assert_eq!(card.back.unwrap().text, "bread");

    harness.send(UiEvent::Rate(DifficultyRating::Good)).await;
    assert_eq!(harness.card().await.state, CardState::Answered);

    harness.send(UiEvent::Next).await;
    let card = harness.card().await;
    assert_eq!(card.state, CardState::Unrevealed);
    assert_eq!(card.round, 2);

    harness.send(UiEvent::ToggleDirection).await;
    let card = harness.card().await;
    assert_eq!(card.direction, Direction::TargetToSource);
    assert_eq!(card.front.text, "bread");

    harness.send(UiEvent::StopPractice).await;
    let summary = next_matching(&harness.app_to_ui_rx, |event| match event {
        AppEvent::ShowSummary(summary) => Some(summary),
        _ => None,
    })
    .await
    .unwrap();
    assert!(summary.contains(&(DifficultyRating::Good, 1)));

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_say_waits_for_hebrew_face() {
    let dictionary = FakeWiktionary::new(&[]);
    let speech = Arc::new(RecordingSpeech::default());
    let harness = Harness::with_speaker(&dictionary, Speaker::new(Some(speech.clone())));

    harness.send(UiEvent::NewEntry).await;
    harness.send(UiEvent::SourceInput("ספר".into())).await;
    harness.send(UiEvent::TargetInput("book".into())).await;
    harness.send(UiEvent::Submit).await;
    assert_eq!(harness.notice().await.title, "Word added");

    harness.send(UiEvent::ToggleDirection).await;
    assert_eq!(harness.notice().await.title, "Practice");
    harness.send(UiEvent::StartPractice).await;
    let card = harness.card().await;
    assert_eq!(card.front.text, "book");
    assert!(!card.front.speakable);

    harness.send(UiEvent::Speak).await;
    let notice = harness.notice().await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Reveal the answer first");
    assert!(speech.spoken.lock().unwrap().is_empty());

    harness.send(UiEvent::Reveal).await;
    assert!(harness.card().await.back.unwrap().speakable);
    harness.send(UiEvent::Speak).await;
    harness.send(UiEvent::ListEntries).await;
    next_matching(&harness.app_to_ui_rx, |event| {
        matches!(event, AppEvent::ShowEntries(_)).then_some(())
    })
    .await
    .unwrap();
    assert_eq!(
        *speech.spoken.lock().unwrap(),
        vec![("ספר".to_string(), "he-IL".to_string())]
    );

    harness.send(UiEvent::Quit).await;
    harness.task.await.unwrap().unwrap();
}
