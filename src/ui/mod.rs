//! UI rendering module for Skycast
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod help_overlay;
pub mod search;
pub mod theme;
pub mod widgets;

use ratatui::Frame;

use crate::app::App;

/// Renders the full frame for the current application state.
///
/// The dashboard is always drawn; the search and help overlays stack on
/// top of it.
pub fn render(frame: &mut Frame, app: &App) {
    dashboard::render(frame, app);
    if app.search_open {
        search::render(frame, app);
    }
    if app.show_help {
        help_overlay::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppMessage;
    use crate::cli::StartupConfig;
    use crate::data::{DeviceLocator, WeatherClient};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<AppMessage>) {
        let (tx, rx) = mpsc::channel(8);
        let client = WeatherClient::with_base_urls("key", "http://127.0.0.1:0", "http://127.0.0.1:0");
        let locator = DeviceLocator::with_base_url("http://127.0.0.1:0");
        let app = App::with_components(client, locator, None, &StartupConfig::default(), tx);
        (app, rx)
    }

    #[test]
    fn test_search_overlay_stacks_on_dashboard() {
        let (mut app, _rx) = test_app();
        app.search_open = true;

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Find a location"));
    }

    #[test]
    fn test_help_overlay_stacks_on_dashboard() {
        let (mut app, _rx) = test_app();
        app.show_help = true;

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Keyboard Shortcuts"));
    }
}
