pub mod app;
pub mod config_view;
pub mod dispatch;
pub mod event;
pub mod theme;
pub mod widgets;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;

use msearch_core::store::SettingsStore;

use app::App;
use config_view::ViewAction;
use dispatch::ReplySender;
use event::{EventHandler, TuiEvent};

/// Launch the settings screen against `store`. Called from the CLI when no
/// subcommand is given.
pub async fn launch_tui(store: Arc<dyn SettingsStore>) -> anyhow::Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, store).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<dyn SettingsStore>,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let mut events = EventHandler::new(Duration::from_millis(100));
    let (tx, mut replies) = tokio::sync::mpsc::unbounded_channel();

    let action = app.view.activate();
    perform(&mut app, action, &store, &tx);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render(&app, frame, area);
        })?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(TuiEvent::Key(key)) => {
                    let action = app.view.handle_key(key);
                    perform(&mut app, action, &store, &tx);
                }
                Some(TuiEvent::Paste(text)) => app.view.handle_paste(&text),
                Some(TuiEvent::Tick) => app.view.tick(Instant::now()),
                Some(TuiEvent::Resize(_, _)) => {}
                None => break,
            },
            Some(reply) = replies.recv() => {
                if let Err(e) = app.view.apply_reply(reply, Instant::now()) {
                    app.report_failure(&e);
                }
            }
        }
    }

    Ok(())
}

fn perform(app: &mut App, action: ViewAction, store: &Arc<dyn SettingsStore>, tx: &ReplySender) {
    match action {
        ViewAction::None => {}
        ViewAction::Quit => app.should_quit = true,
        ViewAction::Read(ticket) => {
            app.status = None;
            let key = app.view.editor.key().to_string();
            dispatch::spawn_read(store.clone(), key, ticket, tx.clone());
        }
        ViewAction::Write(update) => {
            app.status = None;
            dispatch::spawn_write(store.clone(), update, tx.clone());
        }
    }
}

fn render(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    config_view::render(&app.view, frame, chunks[0]);

    if let Some(status) = &app.status {
        let bar = Paragraph::new(status.as_str()).style(theme::error_style());
        frame.render_widget(bar, chunks[1]);
    }
}
