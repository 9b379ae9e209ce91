use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

/// Pumps terminal input on a dedicated thread so the async loop never
/// blocks on `crossterm::event::read`.
pub struct EventHandler {
    rx: tokio::sync::mpsc::UnboundedReceiver<TuiEvent>,
    _thread: std::thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let thread = std::thread::spawn(move || loop {
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    // Windows reports releases too
                    Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                        TuiEvent::Key(key)
                    }
                    Ok(CrosstermEvent::Paste(text)) => TuiEvent::Paste(text),
                    Ok(CrosstermEvent::Resize(w, h)) => TuiEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!("terminal input failed: {e}");
                        break;
                    }
                },
                Ok(false) => TuiEvent::Tick,
                Err(e) => {
                    tracing::error!("terminal poll failed: {e}");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });
        Self {
            rx,
            _thread: thread,
        }
    }

    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }
}
