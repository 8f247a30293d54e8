//! Request tab: ask a contact for money.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::compose::{ComposeForm, ComposeOutcome};
use super::Component;

pub struct RequestComponent {
    action_tx: UnboundedSender<Action>,
    pub form: ComposeForm,
}

impl RequestComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            form: ComposeForm::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_editing
    }

    pub fn reset(&mut self) {
        self.form.clear();
    }
}

impl Component for RequestComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if let ComposeOutcome::Submitted { recipient, amount } = self.form.handle_key_event(key) {
            self.action_tx
                .send(Action::RequestPayment { recipient, amount })?;
            self.form.clear();
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        self.form
            .draw(f, area, palette, "Request From", "Request Payment");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::compose::ComposeField;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    #[test]
    fn submit_emits_the_request_and_clears_the_form() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut request = RequestComponent::new(tx);
        request.form.recipient = "Michael Roberts".to_string();
        request.form.amount = "120".to_string();
        request.form.focused_field = ComposeField::Submit;

        request
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();

        match rx.try_recv().unwrap() {
            Action::RequestPayment { recipient, amount } => {
                assert_eq!(recipient, "Michael Roberts");
                assert_eq!(amount, "120".parse().unwrap());
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert!(request.form.recipient.is_empty());
    }
}
