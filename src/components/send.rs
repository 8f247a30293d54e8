//! Send tab: compose a payment, review it, then confirm.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::domain::money::{calculate_rewards, format_usd};
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::compose::{ComposeForm, ComposeOutcome};
use super::Component;

/// Two-step send flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStage {
    Composing,
    Confirming,
}

pub struct SendComponent {
    action_tx: UnboundedSender<Action>,
    pub form: ComposeForm,
    pub stage: SendStage,
    pending: Option<(String, Decimal)>,
}

impl SendComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            form: ComposeForm::new(),
            stage: SendStage::Composing,
            pending: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.stage == SendStage::Composing && self.form.is_editing
    }

    /// Reset to a blank compose form.
    pub fn reset(&mut self) {
        self.form.clear();
        self.stage = SendStage::Composing;
        self.pending = None;
    }

    fn draw_confirmation(
        &self,
        f: &mut Frame,
        area: Rect,
        palette: &Palette,
        recipient: &str,
        amount: Decimal,
    ) {
        let chunks =
            Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).split(area);

        let points = calculate_rewards(amount);
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("To:      ", Style::default().fg(palette.dim)),
                Span::styled(recipient.to_string(), Style::default().fg(palette.fg)),
            ]),
            Line::from(vec![
                Span::styled("Amount:  ", Style::default().fg(palette.dim)),
                Span::styled(
                    format_usd(amount),
                    Style::default()
                        .fg(palette.fg)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Rewards: ", Style::default().fg(palette.dim)),
                Span::styled(
                    format!("+{} points", points),
                    Style::default().fg(palette.positive),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [ Press Enter to confirm ]  ",
                Style::default()
                    .fg(palette.surface)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let summary = Paragraph::new(lines).block(
            Block::default()
                .title("Review Payment")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        f.render_widget(summary, chunks[0]);

        let help = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Confirm and send  [Esc/b] Back to edit",
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

impl Component for SendComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match self.stage {
            SendStage::Composing => {
                if let ComposeOutcome::Submitted { recipient, amount } =
                    self.form.handle_key_event(key)
                {
                    self.pending = Some((recipient, amount));
                    self.stage = SendStage::Confirming;
                }
            }
            SendStage::Confirming => match key.code {
                KeyCode::Enter => {
                    if let Some((recipient, amount)) = self.pending.take() {
                        self.action_tx.send(Action::SendPayment { recipient, amount })?;
                    }
                    self.reset();
                }
                KeyCode::Esc | KeyCode::Char('b') => {
                    // Back to the form with the fields intact
                    self.pending = None;
                    self.stage = SendStage::Composing;
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        match (self.stage, self.pending.clone()) {
            (SendStage::Confirming, Some((recipient, amount))) => {
                self.draw_confirmation(f, area, palette, &recipient, amount);
            }
            _ => self.form.draw(f, area, palette, "Send To", "Send Payment"),
        }
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

    fn component() -> (SendComponent, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SendComponent::new(tx), rx)
    }

    fn filled(component: &mut SendComponent) {
        component.form.recipient = "Sarah Johnson".to_string();
        component.form.amount = "25.00".to_string();
        component.form.focused_field = super::super::compose::ComposeField::Submit;
    }

    #[test]
    fn valid_submit_moves_to_confirmation_without_sending() {
        let (mut send, mut rx) = component();
        filled(&mut send);
        send.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(send.stage, SendStage::Confirming);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn confirming_sends_the_payment_and_resets_the_form() {
        let (mut send, mut rx) = component();
        filled(&mut send);
        send.handle_key_event(key(KeyCode::Enter)).unwrap();
        send.handle_key_event(key(KeyCode::Enter)).unwrap();

        match rx.try_recv().unwrap() {
            Action::SendPayment { recipient, amount } => {
                assert_eq!(recipient, "Sarah Johnson");
                assert_eq!(amount, "25.00".parse().unwrap());
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(send.stage, SendStage::Composing);
        assert!(send.form.recipient.is_empty());
        assert!(send.form.amount.is_empty());
    }

    #[test]
    fn backing_out_keeps_the_entered_fields() {
        let (mut send, mut rx) = component();
        filled(&mut send);
        send.handle_key_event(key(KeyCode::Enter)).unwrap();
        send.handle_key_event(key(KeyCode::Esc)).unwrap();

        assert_eq!(send.stage, SendStage::Composing);
        assert_eq!(send.form.recipient, "Sarah Johnson");
        assert_eq!(send.form.amount, "25.00");
        assert!(rx.try_recv().is_err());
    }
}
