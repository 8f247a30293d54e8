//! Recent wallet transactions shown on the dashboard.
//!
//! Display-only: the list has no selection, and the full history view
//! behind it is a placeholder feature.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::domain::records::{Direction, Transaction};
use crate::domain::theme::Palette;
use crate::tui::Frame;

#[derive(Default)]
pub struct RecentTransactions {
    pub transactions: Vec<Transaction>,
}

impl RecentTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        if self.transactions.is_empty() {
            let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
                "No transactions yet",
                Style::default().fg(palette.dim),
            )))])
            .block(
                Block::default()
                    .title("Recent Transactions")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.dim)),
            );
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .transactions
            .iter()
            .map(|tx| {
                let amount_color = match tx.direction {
                    Direction::Incoming => palette.positive,
                    Direction::Outgoing => palette.fg,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<24}", tx.name), Style::default().fg(palette.fg)),
                    Span::styled(
                        format!("{:<8}", tx.display_date()),
                        Style::default().fg(palette.dim),
                    ),
                    Span::styled(
                        format!("{:>12}", tx.display_amount()),
                        Style::default().fg(amount_color),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Recent Transactions  [v] View all")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        );
        f.render_widget(list, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: u64, name: &str) -> Transaction {
        Transaction::new(
            id,
            name,
            "10".parse().unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 12).unwrap(),
            Direction::Outgoing,
        )
    }

    #[test]
    fn loaded_set_replaces_the_previous_one() {
        let mut recent = RecentTransactions::new();
        assert!(recent.transactions.is_empty());

        recent.set_transactions(vec![tx(1, "a"), tx(2, "b")]);
        assert_eq!(recent.transactions.len(), 2);

        recent.set_transactions(Vec::new());
        assert!(recent.transactions.is_empty());
    }
}
