//! Cards tab: the demo payment cards. Card management is a placeholder,
//! so adding a card just raises a notice.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, Notice};
use crate::domain::icons::icon;
use crate::domain::records::PaymentCard;
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::Component;

pub struct CardsComponent {
    action_tx: UnboundedSender<Action>,
    pub cards: Vec<PaymentCard>,
    pub state: ListState,
}

impl CardsComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            action_tx,
            cards: PaymentCard::demo_set(),
            state,
        }
    }

    fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.cards.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.cards.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

impl Component for CardsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Char('n') => {
                self.action_tx.send(Action::Notify(Notice::info(
                    "Card management is coming soon",
                )))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let items: Vec<ListItem> = self
            .cards
            .iter()
            .map(|card| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("{} {}", icon("CreditCard"), card.name),
                            Style::default().fg(palette.fg),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            card.network.to_string(),
                            Style::default().fg(palette.accent),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("   •••• {}", card.last4),
                        Style::default().fg(palette.dim),
                    )),
                    Line::from(""),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Cards  [j/k] Select  [n] New card")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent)),
            )
            .highlight_style(
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, area, &mut self.state);
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
    fn selection_wraps_over_the_demo_cards() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut cards = CardsComponent::new(tx);
        assert_eq!(cards.cards.len(), 3);
        assert_eq!(cards.state.selected(), Some(0));

        cards.handle_key_event(key(KeyCode::Down)).unwrap();
        cards.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(cards.state.selected(), Some(2));
        cards.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(cards.state.selected(), Some(0));
        cards.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(cards.state.selected(), Some(2));
    }

    #[test]
    fn adding_a_card_raises_the_placeholder_notice() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut cards = CardsComponent::new(tx);
        cards.handle_key_event(key(KeyCode::Char('n'))).unwrap();
        assert!(matches!(rx.try_recv().unwrap(), Action::Notify(_)));
    }
}
