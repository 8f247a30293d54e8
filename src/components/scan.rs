//! Scan tab: QR placeholder. There is no camera in a terminal, so the
//! scanner side stays a stub; the user's own receive code renders as a
//! block-art placeholder.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, Notice};
use crate::domain::icons::icon;
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::Component;

pub struct ScanComponent {
    action_tx: UnboundedSender<Action>,
    pub show_own_code: bool,
}

impl ScanComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            show_own_code: false,
        }
    }
}

impl Component for ScanComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') => {
                self.action_tx.send(Action::Notify(Notice::info(
                    "Camera scanning is not available in the demo",
                )))?;
            }
            KeyCode::Char('m') => {
                self.show_own_code = !self.show_own_code;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::vertical([Constraint::Min(10), Constraint::Length(4)]).split(area);

        let body = if self.show_own_code {
            vec![
                Line::from(""),
                Line::from(Span::styled("▛▀▀▀▜ ▛▀▜ ▛▀▀▀▜", Style::default().fg(palette.fg))),
                Line::from(Span::styled("▌▗▖ ▐ ▌▚▐ ▌ ▗▖▐", Style::default().fg(palette.fg))),
                Line::from(Span::styled("▌▝▘ ▐ ▚▞▐ ▌ ▝▘▐", Style::default().fg(palette.fg))),
                Line::from(Span::styled("▙▄▄▄▟ ▙▄▟ ▙▄▄▄▟", Style::default().fg(palette.fg))),
                Line::from(""),
                Line::from(Span::styled(
                    "Show this code to receive a payment",
                    Style::default().fg(palette.dim),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{}  Point your camera at a PayWave code", icon("ScanLine")),
                    Style::default().fg(palette.fg),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Scanning requires camera access",
                    Style::default().fg(palette.dim),
                )),
            ]
        };

        let title = if self.show_own_code {
            "My Code"
        } else {
            "Scan"
        };
        let widget = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(format!("{} {}", icon("QrCode"), title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        f.render_widget(widget, chunks[0]);

        let help = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "[c] Start camera  [m] Toggle my code",
                Style::default().fg(palette.dim),
            )),
        ])
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        );
        f.render_widget(help, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    #[test]
    fn scanning_raises_the_camera_notice() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scan = ScanComponent::new(tx);
        scan.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(rx.try_recv().unwrap(), Action::Notify(_)));
    }

    #[test]
    fn toggling_shows_and_hides_the_own_code() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scan = ScanComponent::new(tx);
        assert!(!scan.show_own_code);
        scan.handle_key_event(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE))
            .unwrap();
        assert!(scan.show_own_code);
        scan.handle_key_event(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE))
            .unwrap();
        assert!(!scan.show_own_code);
    }
}
