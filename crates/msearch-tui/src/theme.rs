use ratatui::style::{Color, Modifier, Style};

pub const BRAND_RED: Color = Color::Rgb(220, 50, 47);
pub const BRAND_GREEN: Color = Color::Rgb(133, 153, 0);
pub const BRAND_BLUE: Color = Color::Rgb(38, 139, 210);

pub fn title_style() -> Style {
    Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD)
}

pub fn link_style() -> Style {
    Style::default()
        .fg(BRAND_BLUE)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn error_style() -> Style {
    Style::default().fg(BRAND_RED)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn focus_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn success_style() -> Style {
    Style::default().fg(BRAND_GREEN).add_modifier(Modifier::BOLD)
}
