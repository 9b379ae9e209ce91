use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use msearch_core::editor::{EditorPhase, ReadKind, ReadTicket, SettingsEditor};
use msearch_core::error::SettingsError;
use msearch_core::notify::Notification;
use msearch_core::setting::{SettingUpdate, PLUGIN_NAME};

use crate::dispatch::StoreReply;
use crate::theme;
use crate::widgets::breadcrumb::Breadcrumb;
use crate::widgets::text_area::{TextAction, TextArea};
use crate::widgets::toast::Toast;

/// What the loop should do after a key press.
#[derive(Debug, PartialEq)]
pub enum ViewAction {
    None,
    Quit,
    Read(ReadTicket),
    Write(SettingUpdate),
}

/// The allow-list configuration screen.
pub struct ConfigView {
    pub editor: SettingsEditor,
    pub form: TextArea,
    pub toast: Option<Toast>,
}

impl Default for ConfigView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigView {
    pub fn new() -> Self {
        Self {
            editor: SettingsEditor::new(),
            form: TextArea::new("Allowed fields (JSON)"),
            toast: None,
        }
    }

    /// Ticket for the read that populates the view on activation.
    pub fn activate(&mut self) -> ViewAction {
        ViewAction::Read(self.editor.begin_read(ReadKind::Current))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ViewAction::Quit,
            KeyCode::Char('q') if ctrl => return ViewAction::Quit,
            KeyCode::F(5) => return self.activate(),
            _ => {}
        }

        if self.editor.phase() == EditorPhase::Loading {
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Char('s') if ctrl => {
                let raw = self.editor.text().to_string();
                ViewAction::Write(self.editor.begin_submit(&raw))
            }
            KeyCode::Char('r') if ctrl => {
                ViewAction::Read(self.editor.begin_read(ReadKind::Default))
            }
            _ => {
                let action = self.form.handle_key(key);
                self.sync_text(action);
                ViewAction::None
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.editor.phase() == EditorPhase::Editing {
            let action = self.form.paste(text);
            self.sync_text(action);
        }
    }

    /// The form owns the buffer; the editor mirrors it after every edit.
    fn sync_text(&mut self, action: TextAction) {
        if let TextAction::Changed = action {
            self.editor.set_text(self.form.content());
        }
    }

    /// Apply a finished request. Read failures are handed back for the
    /// host's generic reporting; the view has no handling of its own.
    pub fn apply_reply(&mut self, reply: StoreReply, now: Instant) -> Result<(), SettingsError> {
        match reply {
            StoreReply::Read { ticket, result } => {
                let value = result?;
                if self.editor.complete_read(ticket, value) {
                    self.form.set_content(self.editor.text());
                }
            }
            StoreReply::Write { result } => {
                if let Some(notification) = self.editor.complete_submit(result) {
                    self.show(notification, now);
                }
            }
        }
        Ok(())
    }

    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.toast = Some(Toast::new(notification, now));
    }

    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }
}

pub fn render(view: &ConfigView, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    Breadcrumb::new(PLUGIN_NAME).render(frame, chunks[0]);

    match view.editor.phase() {
        EditorPhase::Loading => {
            let loading = Paragraph::new("Loading settings...").style(theme::dim_style());
            frame.render_widget(loading, chunks[1]);
        }
        EditorPhase::Editing => view.form.render(frame, chunks[1], true),
    }

    let error = view.editor.error_message().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(error)
            .style(theme::error_style())
            .wrap(Wrap { trim: true }),
        chunks[2],
    );

    let help = Paragraph::new(" [Ctrl+S] Save  [Ctrl+R] Use defaults  [F5] Reload  [Esc] Quit")
        .style(theme::dim_style());
    frame.render_widget(help, chunks[3]);

    if let Some(toast) = &view.toast {
        toast.render(frame, area);
    }
}
