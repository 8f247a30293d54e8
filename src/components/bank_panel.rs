//! Bank balance panel: linked accounts and their ledgers, opened from
//! the dashboard balance check.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::domain::icons::icon;
use crate::domain::money::format_usd;
use crate::domain::records::{BankAccount, BankDirection, BankTransaction};
use crate::domain::theme::Palette;
use crate::tui::Frame;

use super::Component;

pub struct BankBalancePanel {
    action_tx: UnboundedSender<Action>,
    pub accounts: Vec<BankAccount>,
    pub state: ListState,
    pub transactions: Vec<BankTransaction>,
    pub is_loading: bool,
    pub loading_transactions: bool,
}

impl BankBalancePanel {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            accounts: Vec::new(),
            state: ListState::default(),
            transactions: Vec::new(),
            is_loading: false,
            loading_transactions: false,
        }
    }

    /// Install freshly fetched accounts and select the first one, which
    /// kicks off its ledger fetch.
    pub fn set_accounts(&mut self, accounts: Vec<BankAccount>) -> Result<()> {
        self.accounts = accounts;
        self.is_loading = false;
        self.transactions.clear();
        if let Some(first) = self.accounts.first() {
            self.state.select(Some(0));
            self.loading_transactions = true;
            self.action_tx.send(Action::SelectBankAccount(first.id))?;
        } else {
            self.state.select(None);
        }
        Ok(())
    }

    pub fn set_transactions(&mut self, account_id: u64, transactions: Vec<BankTransaction>) {
        // Drop ledgers for accounts the user has already moved off of
        if self.selected_account().map(|a| a.id) == Some(account_id) {
            self.transactions = transactions;
            self.loading_transactions = false;
        }
    }

    /// Abandon any in-flight refresh without touching the account list,
    /// so a re-opened panel never shows a spinner with nothing pending.
    pub fn cancel_loading(&mut self) {
        self.is_loading = false;
        self.loading_transactions = false;
    }

    pub fn selected_account(&self) -> Option<&BankAccount> {
        self.state.selected().and_then(|i| self.accounts.get(i))
    }

    fn select(&mut self, i: usize) -> Result<()> {
        self.state.select(Some(i));
        if let Some(account) = self.accounts.get(i) {
            self.loading_transactions = true;
            self.transactions.clear();
            self.action_tx.send(Action::SelectBankAccount(account.id))?;
        }
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        if self.accounts.is_empty() {
            return Ok(());
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.accounts.len() => i + 1,
            _ => 0,
        };
        self.select(i)
    }

    fn previous(&mut self) -> Result<()> {
        if self.accounts.is_empty() {
            return Ok(());
        }
        let i = match self.state.selected() {
            Some(0) | None => self.accounts.len() - 1,
            Some(i) => i - 1,
        };
        self.select(i)
    }
}

impl Component for BankBalancePanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next()?,
            KeyCode::Up | KeyCode::Char('k') => self.previous()?,
            KeyCode::Char('g') => self.action_tx.send(Action::CheckBankBalance)?,
            KeyCode::Esc | KeyCode::Char('x') => self.action_tx.send(Action::CloseBankPanel)?,
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let chunks =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(area);

        if self.is_loading {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Checking bank balances...", icon("RefreshCw")),
                    Style::default().fg(palette.accent),
                )),
            ])
            .block(
                Block::default()
                    .title(format!("{} Linked Accounts", icon("Building")))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent)),
            );
            f.render_widget(loading, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .accounts
                .iter()
                .map(|account| {
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(
                                account.bank_name.clone(),
                                Style::default().fg(palette.fg),
                            ),
                            Span::raw("  "),
                            Span::styled(
                                account.account_type.clone(),
                                Style::default().fg(palette.dim),
                            ),
                        ]),
                        Line::from(vec![
                            Span::styled(
                                format!("  {}  ", account.account_number),
                                Style::default().fg(palette.dim),
                            ),
                            Span::styled(
                                format_usd(account.balance),
                                Style::default()
                                    .fg(palette.positive)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        ]),
                        Line::from(""),
                    ])
                })
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!(
                            "{} Linked Accounts  [j/k] Select  [g] Refresh  [Esc] Close",
                            icon("Building")
                        ))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.accent)),
                )
                .highlight_style(
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                );
            f.render_stateful_widget(list, chunks[0], &mut self.state);
        }

        let ledger_title = match self.selected_account() {
            Some(account) => format!("{} Transactions", account.bank_name),
            None => "Transactions".to_string(),
        };
        if self.loading_transactions {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(palette.dim),
                )),
            ])
            .block(
                Block::default()
                    .title(ledger_title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.dim)),
            );
            f.render_widget(loading, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .transactions
            .iter()
            .map(|tx| {
                let amount_color = match tx.direction {
                    BankDirection::Credit => palette.positive,
                    BankDirection::Debit => palette.fg,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<22}", tx.merchant), Style::default().fg(palette.fg)),
                    Span::styled(
                        format!("{:<14}", tx.display_date()),
                        Style::default().fg(palette.dim),
                    ),
                    Span::styled(
                        format!("{:>12}", tx.display_amount()),
                        Style::default().fg(amount_color),
                    ),
                ]))
            })
            .collect();
        let ledger = List::new(items).block(
            Block::default()
                .title(ledger_title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.dim)),
        );
        f.render_widget(ledger, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn account(id: u64, bank_name: &str) -> BankAccount {
        BankAccount {
            id,
            bank_name: bank_name.to_string(),
            account_type: "Checking".to_string(),
            account_number: "****0000".to_string(),
            balance: "100".parse().unwrap(),
            color: None,
        }
    }

    fn panel() -> (BankBalancePanel, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (BankBalancePanel::new(tx), rx)
    }

    #[test]
    fn installing_accounts_selects_and_fetches_the_first_ledger() {
        let (mut panel, mut rx) = panel();
        panel
            .set_accounts(vec![account(1, "First National Bank"), account(2, "City Credit Union")])
            .unwrap();
        assert_eq!(panel.state.selected(), Some(0));
        assert!(panel.loading_transactions);
        assert_eq!(rx.try_recv().unwrap(), Action::SelectBankAccount(1));
    }

    #[test]
    fn navigation_switches_the_ledger_fetch() {
        let (mut panel, mut rx) = panel();
        panel
            .set_accounts(vec![account(1, "a"), account(2, "b")])
            .unwrap();
        let _ = rx.try_recv();

        panel.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::SelectBankAccount(2));
    }

    #[test]
    fn stale_ledger_results_are_dropped() {
        let (mut panel, mut rx) = panel();
        panel
            .set_accounts(vec![account(1, "a"), account(2, "b")])
            .unwrap();
        let _ = rx.try_recv();
        panel.handle_key_event(key(KeyCode::Down)).unwrap();

        // Result for the account we already moved off of
        panel.set_transactions(
            1,
            vec![BankTransaction {
                id: 101,
                merchant: "Grocery Store".to_string(),
                amount: "78.35".parse().unwrap(),
                direction: BankDirection::Debit,
                date: NaiveDate::from_ymd_opt(2023, 8, 12).unwrap(),
                bank_account: 1,
            }],
        );
        assert!(panel.transactions.is_empty());
        assert!(panel.loading_transactions);
    }

    #[test]
    fn cancelling_a_refresh_clears_both_loading_flags() {
        let (mut panel, _rx) = panel();
        panel.accounts = vec![account(1, "a")];
        panel.is_loading = true;
        panel.loading_transactions = true;

        panel.cancel_loading();

        assert!(!panel.is_loading);
        assert!(!panel.loading_transactions);
        assert_eq!(panel.accounts.len(), 1);
    }

    #[test]
    fn close_keys_emit_the_close_action() {
        let (mut panel, mut rx) = panel();
        panel.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::CloseBankPanel);
        panel.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::CloseBankPanel);
    }
}
