//! Terminal study screen.
//!
//! Keys are translated into [`Action`]s; session keys go through the core
//! dispatch so they are evaluated against the session state at the moment
//! they arrive.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use flashcard_core::{Key, Session};

/// Something the user asked the study screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Session(Key),
    ToggleShuffle,
    ToggleRepeat,
    ToggleReversed,
    Reset,
    Export,
    Quit,
}

/// Map a terminal key event to an action.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(Action::Start),
        KeyCode::Char(' ') => Some(Action::Session(Key::Space)),
        KeyCode::Right => Some(Action::Session(Key::ArrowRight)),
        KeyCode::Left => Some(Action::Session(Key::ArrowLeft)),
        KeyCode::Char(c @ ('1' | '2')) => Some(Action::Session(Key::Char(c))),
        KeyCode::Char('s') => Some(Action::ToggleShuffle),
        KeyCode::Char('u') => Some(Action::ToggleRepeat),
        KeyCode::Char('v') => Some(Action::ToggleReversed),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Study screen state: the session plus a one-line notice.
pub struct StudyApp {
    title: String,
    session: Session,
    export_dir: PathBuf,
    notice: Option<String>,
}

impl StudyApp {
    pub fn new(title: impl Into<String>, session: Session, export_dir: PathBuf) -> Self {
        Self {
            title: title.into(),
            session,
            export_dir,
            notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply an action. Returns false when the screen should close.
    pub fn handle(&mut self, action: Action, now: DateTime<Utc>) -> bool {
        self.notice = None;
        match action {
            Action::Start => {
                if !self.session.start() {
                    self.notice = Some("Nothing to study: the deck is empty.".to_string());
                }
            }
            Action::Session(key) => {
                self.session.dispatch(key);
            }
            Action::ToggleShuffle => {
                let enabled = !self.session.config().shuffle_enabled;
                self.session.set_shuffle(enabled);
                self.notice = Some(format!(
                    "Shuffle {}. Session restarted; press Enter to begin.",
                    on_off(enabled)
                ));
            }
            Action::ToggleRepeat => {
                let enabled = !self.session.config().repeat_unknown_enabled;
                self.session.set_repeat_unknown(enabled);
                self.notice = Some(format!("Repeat unknown cards {}.", on_off(enabled)));
            }
            Action::ToggleReversed => {
                let reversed = !self.session.config().reversed;
                self.session.set_reversed(reversed);
                self.notice = Some(format!("Reversed {}.", on_off(reversed)));
            }
            Action::Reset => {
                self.session.reset_session();
                self.notice = Some("Session reset; press Enter to begin.".to_string());
            }
            Action::Export => {
                self.notice = Some(match write_export(&self.session, &self.export_dir, now) {
                    Ok(path) => format!("Progress exported to {}", path.display()),
                    Err(e) => format!("Export failed: {:#}", e),
                });
            }
            Action::Quit => return false,
        }
        true
    }

    /// Lines to draw for the current state.
    pub fn render(&self) -> Vec<String> {
        let session = &self.session;
        let config = session.config();
        let position = session.position();

        let mut lines = vec![
            self.title.clone(),
            format!(
                "Card {} of {}  |  {}%  |  Known {}  Unknown {}",
                position.current,
                position.total,
                session.progress_percent(),
                session.known_count(),
                session.unknown_count()
            ),
            format!(
                "shuffle: {}  repeat unknown: {}  reversed: {}",
                on_off(config.shuffle_enabled),
                on_off(config.repeat_unknown_enabled),
                on_off(config.reversed)
            ),
            String::new(),
        ];

        if !session.is_started() {
            lines.push(format!(
                "{} cards loaded. Press Enter to start.",
                session.records().len()
            ));
        } else if let Some(card) = session.current_card() {
            lines.extend(card.question.lines().map(str::to_string));
            lines.push(String::new());
            if session.is_flipped() {
                lines.extend(card.answer.lines().map(str::to_string));
            } else {
                lines.push("(Space to reveal the answer)".to_string());
            }
            if session.is_at_end() {
                lines.push(String::new());
                lines.push("Last card. Press r to restart or e to export progress.".to_string());
            }
        }

        lines.push(String::new());
        lines.push(
            "Space flip  <-/-> move  1 known  2 unknown  s shuffle  u repeat  v reverse  r reset  e export  q quit"
                .to_string(),
        );
        if let Some(notice) = self.notice() {
            lines.push(notice.to_string());
        }
        lines
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Write the progress snapshot into `dir` and return the file path.
pub fn write_export(session: &Session, dir: &Path, now: DateTime<Utc>) -> anyhow::Result<PathBuf> {
    let snapshot = session.export_snapshot(now);
    let path = dir.join(snapshot.file_name());
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    std::fs::write(&path, snapshot.to_json()?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "progress exported");
    Ok(path)
}

/// Raw mode plus alternate screen, restored on drop.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, cursor::Show) {
            tracing::warn!(error = %e, "failed to leave alternate screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
    }
}

/// Run the interactive screen until the user quits.
pub fn run(app: &mut StudyApp) -> anyhow::Result<()> {
    let mut terminal = TerminalGuard::enter(io::stdout())?;
    event_loop(app, &mut terminal.out)
}

fn event_loop(app: &mut StudyApp, out: &mut impl Write) -> anyhow::Result<()> {
    loop {
        draw(out, &app.render())?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = action_for(&key) {
                if !app.handle(action, Utc::now()) {
                    return Ok(());
                }
            }
        }
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in lines {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    out.flush()
}
