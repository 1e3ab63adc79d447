//! Line-oriented terminal front end.
//!
//! Reads commands from stdin, turns them into `UiEvent`s for the event loop and
//! prints whatever the app sends back. Diagnostics go to stderr through
//! tracing; stdout is reserved for the conversation with the user.

use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use milon_config::Config;
use milon_types::{
    AppEvent, CardFace, CardState, CardView, DifficultyRating, Entry, FormMode, FormView, Gender,
    NoticeLevel, UiEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;

pub const HELP: &str = "\
commands:
  new                 start a new word
  edit <n>            edit word number n from `list`
  he <text>           type the Hebrew word (auto-translates)
  en <text>           set the English translation
  gender m|f|clear    set or clear the gender
  notes <text>        set notes
  submit | cancel     save or discard the form
  list                show the words
  practice            start practicing
  reveal              flip the card
  rate again|hard|good|easy
  next                next card
  dir                 toggle HE → EN / EN → HE
  say                 listen to the Hebrew word
  stop                end practice
  quit";

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let list_name = config.read().await.list_name.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("milon: {list_name}");
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Quit)).await?;
                    return Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(event) => {
                        let quit = event == UiEvent::Quit;
                        ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
                        if quit {
                            return Ok(());
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
            event = app_to_ui_rx.recv() => {
                if let Some(text) = render(&event?) {
                    println!("{text}");
                }
            }
        }
    }
}

pub fn parse_command(line: &str) -> Result<UiEvent, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "new" => UiEvent::NewEntry,
        "edit" => {
            let n: usize = rest
                .parse()
                .map_err(|_| "usage: edit <n>".to_string())?;
            if n == 0 {
                return Err("words are numbered from 1".to_string());
            }
            UiEvent::EditEntry(n - 1)
        }
        "he" => UiEvent::SourceInput(rest.to_string()),
        "en" => UiEvent::TargetInput(rest.to_string()),
        "gender" => match rest {
            "m" | "masculine" | "זכר" => UiEvent::SetGender(Some(Gender::Masculine)),
            "f" | "feminine" | "נקבה" => UiEvent::SetGender(Some(Gender::Feminine)),
            "clear" | "" => UiEvent::SetGender(None),
            _ => return Err("usage: gender m|f|clear".to_string()),
        },
        "notes" => UiEvent::NotesInput(rest.to_string()),
        "submit" => UiEvent::Submit,
        "cancel" => UiEvent::CancelForm,
        "list" => UiEvent::ListEntries,
        "practice" => UiEvent::StartPractice,
        "reveal" | "flip" => UiEvent::Reveal,
        "rate" => UiEvent::Rate(
            DifficultyRating::parse(rest)
                .ok_or_else(|| "usage: rate again|hard|good|easy".to_string())?,
        ),
        "next" => UiEvent::Next,
        "dir" => UiEvent::ToggleDirection,
        "say" => UiEvent::Speak,
        "stop" => UiEvent::StopPractice,
        "quit" | "exit" => UiEvent::Quit,
        "help" => return Err(HELP.to_string()),
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };

    Ok(event)
}

pub fn render(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::ShowForm(form) => Some(render_form(form)),
        AppEvent::ShowEntries(entries) => Some(render_entries(entries)),
        AppEvent::ShowCard(card) => Some(render_card(card)),
        AppEvent::ShowSummary(summary) => {
            let counts: Vec<String> = summary.iter().map(|(d, n)| format!("{d}: {n}")).collect();
            Some(format!("session finished ({})", counts.join(", ")))
        }
        AppEvent::Notice(notice) => Some(match notice.level {
            NoticeLevel::Info => format!("{}: {}", notice.title, notice.message),
            NoticeLevel::Error => format!("! {}: {}", notice.title, notice.message),
        }),
        AppEvent::BackendReady => Some("ready".to_string()),
        AppEvent::UiEvent(_) | AppEvent::TranslationStarted { .. } | AppEvent::TranslationReply(_) => {
            None
        }
    }
}

fn gender_suffix(gender: Option<Gender>) -> String {
    gender.map(|g| format!(" ({g})")).unwrap_or_default()
}

fn render_form(form: &FormView) -> String {
    let title = match form.mode {
        FormMode::Create => "Add New Word",
        FormMode::Edit => "Edit Word",
    };
    let mut out = format!(
        "[{title}]\n  Hebrew:  {}{}\n  English: {}{}",
        form.source,
        if form.is_translating { "  (Translating...)" } else { "" },
        form.target,
        gender_suffix(form.gender),
    );
    if !form.notes.is_empty() {
        out.push_str(&format!("\n  Notes:   {}", form.notes));
    }
    if let Some(error) = &form.translate_error {
        out.push_str(&format!("\n  ! {error}"));
    }
    out
}

fn render_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "no words yet, add one with `new`".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{:>3}. {}{} = {}",
                i + 1,
                e.source_text,
                gender_suffix(e.gender),
                e.target_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_face(face: &CardFace) -> String {
    format!(
        "{}{}{}",
        face.text,
        gender_suffix(face.gender),
        if face.speakable { "  [say]" } else { "" }
    )
}

fn render_card(card: &CardView) -> String {
    let mut out = format!(
        "[{} | {}/{} | round {}]\n  {}",
        card.direction.label(),
        card.position + 1,
        card.len,
        card.round,
        render_face(&card.front)
    );
    if let Some(back) = &card.back {
        out.push_str(&format!("\n  ---\n  {}", render_face(back)));
    }
    out.push_str(match card.state {
        CardState::Unrevealed => "\n  (reveal to see the answer)",
        CardState::Revealed => "\n  How well did you know this word? rate again|hard|good|easy",
        CardState::Answered => "\n  (next)",
    });
    out
}
