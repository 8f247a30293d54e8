//! Shared recipient/amount form used by the send and request tabs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;

use crate::domain::money::parse_amount;
use crate::domain::theme::Palette;
use crate::tui::Frame;

/// Input field focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    Recipient,
    Amount,
    Submit,
}

/// What a key event did to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeOutcome {
    /// Form consumed the key without submitting.
    Handled,
    /// Submit was confirmed with valid inputs.
    Submitted { recipient: String, amount: Decimal },
}

/// A two-field payment form with explicit edit mode, adapted for both
/// the send and request flows.
pub struct ComposeForm {
    pub recipient: String,
    pub amount: String,
    pub focused_field: ComposeField,
    pub is_editing: bool,
    pub error_message: Option<String>,
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeForm {
    pub fn new() -> Self {
        Self {
            recipient: String::new(),
            amount: String::new(),
            focused_field: ComposeField::Recipient,
            is_editing: false,
            error_message: None,
        }
    }

    /// Clear all input fields.
    pub fn clear(&mut self) {
        self.recipient.clear();
        self.amount.clear();
        self.focused_field = ComposeField::Recipient;
        self.is_editing = false;
        self.error_message = None;
    }

    /// Validate inputs, returning them parsed or a user-facing error.
    pub fn validate(&self) -> Result<(String, Decimal), String> {
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err("Recipient is required".to_string());
        }
        match parse_amount(&self.amount) {
            Some(amount) => Ok((recipient.to_string(), amount)),
            None => Err("Amount must be a positive dollar value".to_string()),
        }
    }

    fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            ComposeField::Recipient => ComposeField::Amount,
            ComposeField::Amount => ComposeField::Submit,
            ComposeField::Submit => ComposeField::Recipient,
        };
    }

    fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            ComposeField::Recipient => ComposeField::Submit,
            ComposeField::Amount => ComposeField::Recipient,
            ComposeField::Submit => ComposeField::Amount,
        };
    }

    fn handle_char(&mut self, c: char) {
        match self.focused_field {
            ComposeField::Recipient => {
                self.recipient.push(c);
            }
            ComposeField::Amount => {
                // Only allow digits and a single decimal point
                if c.is_ascii_digit() || (c == '.' && !self.amount.contains('.')) {
                    self.amount.push(c);
                }
            }
            ComposeField::Submit => {}
        }
    }

    fn handle_backspace(&mut self) {
        match self.focused_field {
            ComposeField::Recipient => {
                self.recipient.pop();
            }
            ComposeField::Amount => {
                self.amount.pop();
            }
            ComposeField::Submit => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> ComposeOutcome {
        self.error_message = None;

        let on_input_field = self.focused_field == ComposeField::Recipient
            || self.focused_field == ComposeField::Amount;

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.is_editing = false;
                self.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.is_editing = false;
                self.prev_field();
            }
            KeyCode::Esc => {
                self.is_editing = false;
            }
            KeyCode::Enter => {
                if self.focused_field == ComposeField::Submit {
                    match self.validate() {
                        Ok((recipient, amount)) => {
                            return ComposeOutcome::Submitted { recipient, amount };
                        }
                        Err(err) => self.error_message = Some(err),
                    }
                } else if on_input_field {
                    self.is_editing = !self.is_editing;
                } else {
                    self.is_editing = false;
                    self.next_field();
                }
            }
            KeyCode::Char(c) => {
                if self.is_editing && on_input_field {
                    self.handle_char(c);
                } else if !self.is_editing {
                    match c {
                        'j' => self.next_field(),
                        'k' => self.prev_field(),
                        'c' => self.clear(),
                        'e' if on_input_field => self.is_editing = true,
                        _ => {}
                    }
                }
            }
            KeyCode::Backspace => {
                if self.is_editing && on_input_field {
                    self.handle_backspace();
                }
            }
            _ => {}
        }
        ComposeOutcome::Handled
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        palette: &Palette,
        recipient_title: &str,
        submit_label: &str,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(4), // Recipient
            Constraint::Length(4), // Amount
            Constraint::Length(4), // Submit button
            Constraint::Min(0),    // Status/help
        ])
        .split(area);

        self.draw_input(
            f,
            chunks[0],
            palette,
            ComposeField::Recipient,
            recipient_title,
            &self.recipient,
            "Name, @handle, email, or phone",
        );
        self.draw_input(
            f,
            chunks[1],
            palette,
            ComposeField::Amount,
            "Amount (USD)",
            &self.amount,
            "e.g. 25.00",
        );

        let submit_style = if self.focused_field == ComposeField::Submit {
            Style::default()
                .fg(palette.surface)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.accent)
        };
        let submit_widget = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!("  [ {} ]  ", submit_label), submit_style)),
        ])
        .block(self.field_block(palette, ComposeField::Submit, "Confirm"));
        f.render_widget(submit_widget, chunks[2]);

        let mut status_lines = vec![Line::from("")];
        if let Some(ref err) = self.error_message {
            status_lines.push(Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(palette.negative),
            )));
            status_lines.push(Line::from(""));
        }
        status_lines.push(Line::from(Span::styled(
            if self.is_editing {
                "[Esc] Stop editing  [Tab/↓] Next field  [Shift+Tab/↑] Prev field"
            } else {
                "[Enter/e] Edit field  [Tab/↓] Next field  [c] Clear all"
            },
            Style::default().fg(palette.dim),
        )));
        let status_widget = Paragraph::new(status_lines).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        );
        f.render_widget(status_widget, chunks[3]);
    }

    fn field_block(&self, palette: &Palette, field: ComposeField, title: &str) -> Block<'_> {
        let focused = self.focused_field == field;
        Block::default()
            .title(if focused {
                format!("> {}", title)
            } else {
                format!("  {}", title)
            })
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.dim)
            })
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_input(
        &self,
        f: &mut Frame,
        area: Rect,
        palette: &Palette,
        field: ComposeField,
        title: &str,
        value: &str,
        placeholder: &str,
    ) {
        let focused = self.focused_field == field;
        let style = if focused {
            if self.is_editing {
                Style::default().fg(palette.highlight)
            } else {
                Style::default().fg(palette.accent)
            }
        } else {
            Style::default().fg(palette.fg)
        };

        let mut display = if value.is_empty() && !focused {
            placeholder.to_string()
        } else {
            value.to_string()
        };
        if self.is_editing && focused {
            display.push('│');
        }

        let widget = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(display, style)),
        ])
        .block(self.field_block(palette, field, title));
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ComposeForm, text: &str) {
        for c in text.chars() {
            form.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_recipient_is_rejected() {
        let form = ComposeForm::new();
        assert!(form.validate().is_err());
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut form = ComposeForm::new();
        form.recipient = "contact-1".to_string();
        form.amount = "0".to_string();
        assert!(form.validate().is_err());
        form.amount = "-5".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn valid_inputs_parse() {
        let mut form = ComposeForm::new();
        form.recipient = "contact-1".to_string();
        form.amount = "25.00".to_string();
        let (recipient, amount) = form.validate().unwrap();
        assert_eq!(recipient, "contact-1");
        assert_eq!(amount, "25.00".parse().unwrap());
    }

    #[test]
    fn amount_field_filters_typed_characters() {
        let mut form = ComposeForm::new();
        form.focused_field = ComposeField::Amount;
        form.is_editing = true;
        type_text(&mut form, "1a2.5.x0");
        assert_eq!(form.amount, "12.50");
    }

    #[test]
    fn submit_with_valid_inputs_reports_submission() {
        let mut form = ComposeForm::new();
        form.recipient = "Sarah Johnson".to_string();
        form.amount = "25.99".to_string();
        form.focused_field = ComposeField::Submit;
        match form.handle_key_event(key(KeyCode::Enter)) {
            ComposeOutcome::Submitted { recipient, amount } => {
                assert_eq!(recipient, "Sarah Johnson");
                assert_eq!(amount, "25.99".parse().unwrap());
            }
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn submit_with_invalid_inputs_sets_the_error() {
        let mut form = ComposeForm::new();
        form.focused_field = ComposeField::Submit;
        assert_eq!(
            form.handle_key_event(key(KeyCode::Enter)),
            ComposeOutcome::Handled
        );
        assert!(form.error_message.is_some());
    }
}
