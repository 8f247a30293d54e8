//! Login screen. The demo identity provider ignores credentials, but
//! the form still collects an email so the flow reads like the real one.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::domain::icons::icon;
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::Component;

pub struct LoginComponent {
    action_tx: UnboundedSender<Action>,
    pub email: String,
    pub is_editing: bool,
    pub in_flight: bool,
    pub error_message: Option<String>,
}

impl LoginComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            email: String::new(),
            is_editing: false,
            in_flight: false,
            error_message: None,
        }
    }

    /// Return to the idle state after a sign-in attempt resolves.
    pub fn set_idle(&mut self, error: Option<String>) {
        self.in_flight = false;
        self.error_message = error;
    }
}

impl Component for LoginComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.in_flight {
            return Ok(());
        }
        match key.code {
            KeyCode::Enter => {
                if self.is_editing {
                    self.is_editing = false;
                } else {
                    self.in_flight = true;
                    self.error_message = None;
                    self.action_tx.send(Action::SubmitLogin)?;
                }
            }
            KeyCode::Esc => {
                self.is_editing = false;
            }
            KeyCode::Char('e') if !self.is_editing => {
                self.is_editing = true;
            }
            KeyCode::Char(c) if self.is_editing => {
                self.email.push(c);
            }
            KeyCode::Backspace if self.is_editing => {
                self.email.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} PayWave", icon("Wallet")),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Sign in to continue", Style::default().fg(palette.dim)),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(banner, chunks[0]);

        let mut email_display = if self.email.is_empty() && !self.is_editing {
            "you@example.com".to_string()
        } else {
            self.email.clone()
        };
        if self.is_editing {
            email_display.push('│');
        }
        let email_widget = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                email_display,
                if self.is_editing {
                    Style::default().fg(palette.highlight)
                } else {
                    Style::default().fg(palette.fg)
                },
            )),
        ])
        .block(
            Block::default()
                .title("Email")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        f.render_widget(email_widget, chunks[1]);

        let mut status_lines = vec![Line::from("")];
        if self.in_flight {
            status_lines.push(Line::from(Span::styled(
                "Signing in...",
                Style::default().fg(palette.accent),
            )));
        } else if let Some(ref err) = self.error_message {
            status_lines.push(Line::from(Span::styled(
                format!("Sign-in failed: {}", err),
                Style::default().fg(palette.negative),
            )));
        }
        status_lines.push(Line::from(""));
        status_lines.push(Line::from(Span::styled(
            "[e] Edit email  [Enter] Sign in",
            Style::default().fg(palette.dim),
        )));
        let status = Paragraph::new(status_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        );
        f.render_widget(status, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_submits_and_blocks_further_input_until_resolution() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut login = LoginComponent::new(tx);

        login.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(login.in_flight);
        assert_eq!(rx.try_recv().unwrap(), Action::SubmitLogin);

        // A second Enter while in flight does nothing
        login.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(rx.try_recv().is_err());

        login.set_idle(Some("rejected".to_string()));
        assert!(!login.in_flight);
        assert_eq!(login.error_message.as_deref(), Some("rejected"));
    }

    #[test]
    fn email_editing_round_trips() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut login = LoginComponent::new(tx);
        login.handle_key_event(key(KeyCode::Char('e'))).unwrap();
        assert!(login.is_editing);
        login.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        login.handle_key_event(key(KeyCode::Char('b'))).unwrap();
        login.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(login.email, "a");
        login.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!login.is_editing);
    }
}
