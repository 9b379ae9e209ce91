use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme;

/// Navigation trail from the plugin list to this plugin's configuration.
pub struct Breadcrumb<'a> {
    pub plugin_name: &'a str,
}

impl<'a> Breadcrumb<'a> {
    pub fn new(plugin_name: &'a str) -> Self {
        Self { plugin_name }
    }

    pub fn line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled("Plugins", theme::link_style()),
            Span::styled(" › ", theme::dim_style()),
            Span::styled(self.plugin_name, theme::title_style()),
            Span::styled(" › ", theme::dim_style()),
            Span::raw("Configuration"),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::dim_style());
        frame.render_widget(Paragraph::new(self.line()).block(block), area);
    }
}
