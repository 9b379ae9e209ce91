use crate::config_view::ConfigView;

/// Host frame around the configuration screen.
pub struct App {
    pub view: ConfigView,
    /// Generic report for request failures the view does not handle.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: ConfigView::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn report_failure(&mut self, error: &msearch_core::SettingsError) {
        tracing::error!("request failed: {error}");
        self.status = Some(format!("Request failed: {error}"));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
