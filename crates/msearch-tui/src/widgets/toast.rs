use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use msearch_core::notify::Notification;

use crate::theme;

/// A notification pinned to the top-right corner until its timeout passes.
pub struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification, now: Instant) -> Self {
        Self {
            notification,
            shown_at: now,
        }
    }

    pub fn text(&self) -> &str {
        &self.notification.text
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.notification.timeout
    }

    /// Single-line label, stamped with the local time the notification was raised.
    pub fn label(&self) -> String {
        let at = self.notification.at.with_timezone(&chrono::Local);
        format!(
            " [{}] {} {} ",
            self.notification.icon,
            at.format("%H:%M:%S"),
            self.notification.text
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let label = self.label();
        let width = (label.width() as u16 + 2).min(area.width);
        let height = 3.min(area.height);
        let rect = Rect::new(area.right().saturating_sub(width), area.y, width, height);

        let style = theme::success_style();
        let block = Block::default().borders(Borders::ALL).border_style(style);
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(label).style(style).block(block), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn expires_after_notification_timeout() {
        let start = Instant::now();
        let toast = Toast::new(Notification::saved(), start);

        assert!(!toast.is_expired(start));
        assert!(!toast.is_expired(start + Duration::from_millis(2999)));
        assert!(toast.is_expired(start + Duration::from_millis(3000)));
    }

    #[test]
    fn label_carries_time_raised() {
        let notification = Notification::saved();
        let stamp = notification
            .at
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string();
        let toast = Toast::new(notification, Instant::now());

        assert_eq!(toast.label(), format!(" [ok] {stamp} Settings saved. "));
    }
}
