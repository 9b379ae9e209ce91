use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::theme;

const TAB: &str = "    ";

/// Multi-line editor. The cursor is a (row, column) pair counted in chars.
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
    label: String,
}

pub enum TextAction {
    None,
    Changed,
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl TextArea {
    pub fn new(label: &str) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            label: label.to_string(),
        }
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the content and put the cursor at the start.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(str::to_string).collect();
        self.row = 0;
        self.col = 0;
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn insert_str(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            let at = byte_index(&self.lines[self.row], self.col);
            self.lines[self.row].insert_str(at, first);
            self.col += first.chars().count();
        }
        for part in parts {
            self.split_line();
            let at = byte_index(&self.lines[self.row], self.col);
            self.lines[self.row].insert_str(at, part);
            self.col += part.chars().count();
        }
    }

    fn split_line(&mut self) {
        let at = byte_index(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
    }

    /// Insert pasted text at the cursor.
    pub fn paste(&mut self, text: &str) -> TextAction {
        self.insert_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        TextAction::Changed
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> TextAction {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = byte_index(&self.lines[self.row], self.col);
                self.lines[self.row].insert(at, c);
                self.col += 1;
                TextAction::Changed
            }
            KeyCode::Tab => {
                self.insert_str(TAB);
                TextAction::Changed
            }
            KeyCode::Enter => {
                self.split_line();
                TextAction::Changed
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    self.col -= 1;
                    let at = byte_index(&self.lines[self.row], self.col);
                    self.lines[self.row].remove(at);
                    TextAction::Changed
                } else if self.row > 0 {
                    let line = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                    self.lines[self.row].push_str(&line);
                    TextAction::Changed
                } else {
                    TextAction::None
                }
            }
            KeyCode::Delete => {
                if self.col < self.line_len(self.row) {
                    let at = byte_index(&self.lines[self.row], self.col);
                    self.lines[self.row].remove(at);
                    TextAction::Changed
                } else if self.row + 1 < self.lines.len() {
                    let next = self.lines.remove(self.row + 1);
                    self.lines[self.row].push_str(&next);
                    TextAction::Changed
                } else {
                    TextAction::None
                }
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                }
                TextAction::None
            }
            KeyCode::Right => {
                if self.col < self.line_len(self.row) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                TextAction::None
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(self.line_len(self.row));
                }
                TextAction::None
            }
            KeyCode::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = self.col.min(self.line_len(self.row));
                }
                TextAction::None
            }
            KeyCode::Home => {
                self.col = 0;
                TextAction::None
            }
            KeyCode::End => {
                self.col = self.line_len(self.row);
                TextAction::None
            }
            _ => TextAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            theme::focus_border_style()
        } else {
            theme::dim_style()
        };
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_height = area.height.saturating_sub(2) as usize;
        let top = if inner_height == 0 {
            0
        } else {
            self.row.saturating_sub(inner_height - 1)
        };

        let text: Vec<Line> = self
            .lines
            .iter()
            .skip(top)
            .take(inner_height)
            .map(|l| Line::raw(l.as_str()))
            .collect();
        frame.render_widget(Paragraph::new(text).block(block), area);

        if focused && area.width > 2 && inner_height > 0 {
            let prefix = &self.lines[self.row][..byte_index(&self.lines[self.row], self.col)];
            let x = (prefix.width() as u16).min(area.width.saturating_sub(3));
            let y = (self.row - top) as u16;
            frame.set_cursor_position(Position::new(area.x + 1 + x, area.y + 1 + y));
        }
    }
}
