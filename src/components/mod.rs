pub mod bank_panel;
pub mod cards;
pub mod compose;
pub mod login;
pub mod request;
pub mod scan;
pub mod send;
pub mod transactions;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::domain::theme::Palette;
use crate::tui::Frame;

/// A component is a reusable UI element that can handle events and render itself.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()>;
    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette);
}
