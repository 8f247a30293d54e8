use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::{Action, DashboardBatch, Notice, NoticeKind},
    cli::Args,
    components::{
        bank_panel::BankBalancePanel, cards::CardsComponent, login::LoginComponent,
        request::RequestComponent, scan::ScanComponent, send::SendComponent,
        transactions::RecentTransactions, Component,
    },
    config::{BackendKind, Config},
    domain::{
        icons::icon,
        money::format_usd,
        records::{BankAccount, Wallet},
        session::{resolve_route, Route, Session},
        theme::{Palette, ThemePreference},
    },
    infra::{
        api::ApiClient,
        auth::{DemoIdentityProvider, IdentityProvider, RemoteIdentityProvider},
        backend::{fetch_or_create_wallet, Filter, RecordStore},
        mock::MockBackend,
        store::Store,
    },
    tui::{Event, Tui},
};

/// How many wallet transactions the dashboard shows.
const RECENT_LIMIT: usize = 4;
/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(3);
/// Simulated bank balance refresh delay.
const BALANCE_REFRESH_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Send,
    Request,
    Scan,
    Cards,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![Tab::Send, Tab::Request, Tab::Scan, Tab::Cards]
    }

    pub fn title(&self, palette: &Palette) -> Line<'static> {
        let hotkey = Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD);
        match self {
            Tab::Send => Line::from(vec![
                Span::styled("1", hotkey),
                Span::raw(format!(" {} Send", icon("SendHorizonal"))),
            ]),
            Tab::Request => Line::from(vec![
                Span::styled("2", hotkey),
                Span::raw(format!(" {} Request", icon("Download"))),
            ]),
            Tab::Scan => Line::from(vec![
                Span::styled("3", hotkey),
                Span::raw(format!(" {} Scan", icon("QrCode"))),
            ]),
            Tab::Cards => Line::from(vec![
                Span::styled("4", hotkey),
                Span::raw(format!(" {} Cards", icon("CreditCard"))),
            ]),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Send => 0,
            Tab::Request => 1,
            Tab::Scan => 2,
            Tab::Cards => 3,
        }
    }

    pub fn from_index(index: usize) -> Tab {
        match index {
            1 => Tab::Request,
            2 => Tab::Scan,
            3 => Tab::Cards,
            _ => Tab::Send,
        }
    }
}

struct ActiveNotice {
    notice: Notice,
    expires_at: Instant,
}

/// Quick-access dashboard actions that are placeholders in the demo;
/// each raises a notice instead of a real flow.
fn quick_action_notice(code: KeyCode) -> Option<Notice> {
    let text = match code {
        KeyCode::Char('a') => format!("{} Adding money is coming soon", icon("Plus")),
        KeyCode::Char('w') => format!("{} Withdrawals are coming soon", icon("ArrowDownToLine")),
        KeyCode::Char('v') => "The full transaction history is coming soon".to_string(),
        KeyCode::Char('p') => format!("{} Bill payments are coming soon", icon("Receipt")),
        KeyCode::Char('s') => format!("{} Shopping deals are coming soon", icon("ShoppingBag")),
        KeyCode::Char('r') => format!("{} Transport passes are coming soon", icon("Bus")),
        _ => return None,
    };
    Some(Notice::info(text))
}

/// Store failures are never fatal; they are logged and surfaced as a
/// notice while the in-memory state keeps going.
fn persistence_notice(result: Result<()>, what: &str) -> Option<Notice> {
    match result {
        Ok(()) => None,
        Err(err) => {
            error!("Persisting {} failed: {}", what, err);
            Some(Notice::error(format!("Could not save {}", what)))
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub store: Store,
    pub records: Arc<dyn RecordStore>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub session: Session,
    pub theme: ThemePreference,
    pub route: Route,
    pub active_tab: Tab,
    pub login_component: LoginComponent,
    pub send_component: SendComponent,
    pub request_component: RequestComponent,
    pub scan_component: ScanComponent,
    pub cards_component: CardsComponent,
    pub bank_panel: BankBalancePanel,
    pub recent_transactions: RecentTransactions,
    pub wallet: Option<Wallet>,
    pub bank_accounts: Vec<BankAccount>,
    pub is_loading: bool,
    pub is_checking_balance: bool,
    pub show_bank_panel: bool,
    /// Bumped on every dashboard load and on leaving the dashboard;
    /// results tagged with an older value are dropped.
    generation: u64,
    notices: Vec<ActiveNotice>,
    clock: String,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = Config::new(&args.backend, args.api_url.as_deref());
        let store = Store::new()?;

        let (records, identity_provider): (Arc<dyn RecordStore>, Arc<dyn IdentityProvider>) =
            match config.backend {
                BackendKind::Mock => (
                    Arc::new(MockBackend::new()),
                    Arc::new(DemoIdentityProvider::new()),
                ),
                BackendKind::Remote => (
                    Arc::new(ApiClient::new(&config.api)),
                    Arc::new(RemoteIdentityProvider::new(&config.api)),
                ),
            };

        let mut session = Session::default();
        if let Some(identity) = store.load_session()? {
            info!("Restored session for {}", identity.email);
            session.set_identity(identity);
        }
        let theme = ThemePreference::load(&store);

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate);

        let route = resolve_route(Route::Dashboard, &session);

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            config,
            login_component: LoginComponent::new(action_tx.clone()),
            send_component: SendComponent::new(action_tx.clone()),
            request_component: RequestComponent::new(action_tx.clone()),
            scan_component: ScanComponent::new(action_tx.clone()),
            cards_component: CardsComponent::new(action_tx.clone()),
            bank_panel: BankBalancePanel::new(action_tx.clone()),
            recent_transactions: RecentTransactions::new(),
            action_tx,
            action_rx,
            tui,
            store,
            records,
            identity_provider,
            session,
            theme,
            route,
            active_tab: Tab::Send,
            wallet: None,
            bank_accounts: Vec::new(),
            is_loading: false,
            is_checking_balance: false,
            show_bank_panel: false,
            generation: 0,
            notices: Vec::new(),
            clock: String::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        if self.route == Route::Dashboard {
            self.action_tx.send(Action::LoadDashboard)?;
        }

        loop {
            if let Some(event) = self.tui.next().await {
                self.handle_event(event).await?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action).await?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => {
                self.action_tx.send(Action::Tick)?;
            }
            Event::Render => {
                self.draw_ui()?;
            }
            Event::Key(key_event) => {
                self.handle_key_event(key_event)?;
            }
            Event::Resize(w, h) => {
                self.action_tx.send(Action::Resize(w, h))?;
            }
            Event::Init => {
                info!("Application initialized");
            }
            Event::Quit => {
                self.should_quit = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }
        if key.code == KeyCode::Char('z') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Suspend)?;
            return Ok(());
        }

        match self.route {
            Route::Home => self.handle_home_key(key)?,
            Route::Login => {
                if key.code == KeyCode::Char('q') && !self.login_component.is_editing {
                    self.action_tx.send(Action::Quit)?;
                } else {
                    self.login_component.handle_key_event(key)?;
                }
            }
            Route::Signup => match key.code {
                KeyCode::Char('q') => self.action_tx.send(Action::Quit)?,
                KeyCode::Char('l') => self.action_tx.send(Action::Navigate(Route::Login))?,
                KeyCode::Char('h') | KeyCode::Esc => {
                    self.action_tx.send(Action::Navigate(Route::Home))?;
                }
                _ => {}
            },
            Route::NotFound => match key.code {
                KeyCode::Char('q') => self.action_tx.send(Action::Quit)?,
                _ => self.action_tx.send(Action::Navigate(Route::Home))?,
            },
            Route::Dashboard => self.handle_dashboard_key(key)?,
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.action_tx.send(Action::Quit)?,
            KeyCode::Char('l') | KeyCode::Enter => {
                self.action_tx.send(Action::Navigate(Route::Login))?;
            }
            KeyCode::Char('s') => self.action_tx.send(Action::Navigate(Route::Signup))?,
            KeyCode::Char('t') => self.action_tx.send(Action::ToggleTheme)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.show_bank_panel {
            return self.bank_panel.handle_key_event(key);
        }

        let is_editing = match self.active_tab {
            Tab::Send => self.send_component.is_editing(),
            Tab::Request => self.request_component.is_editing(),
            _ => false,
        };
        if is_editing {
            return match self.active_tab {
                Tab::Send => self.send_component.handle_key_event(key),
                Tab::Request => self.request_component.handle_key_event(key),
                _ => Ok(()),
            };
        }

        match key.code {
            KeyCode::Char('q') => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('t') => {
                self.action_tx.send(Action::ToggleTheme)?;
            }
            KeyCode::Char('b') => {
                self.action_tx.send(Action::CheckBankBalance)?;
            }
            KeyCode::Char('l') => {
                self.action_tx.send(Action::Logout)?;
            }
            KeyCode::Char('a' | 'w' | 'v' | 'p' | 's' | 'r') => {
                if let Some(notice) = quick_action_notice(key.code) {
                    self.action_tx.send(Action::Notify(notice))?;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.select_tab(Tab::from_index(c as usize - '1' as usize));
            }
            KeyCode::Tab => {
                self.select_tab(Tab::from_index(
                    (self.active_tab.index() + 1) % Tab::all().len(),
                ));
            }
            KeyCode::BackTab => {
                let count = Tab::all().len();
                self.select_tab(Tab::from_index(
                    (self.active_tab.index() + count - 1) % count,
                ));
            }
            _ => match self.active_tab {
                Tab::Send => self.send_component.handle_key_event(key)?,
                Tab::Request => self.request_component.handle_key_event(key)?,
                Tab::Scan => self.scan_component.handle_key_event(key)?,
                Tab::Cards => self.cards_component.handle_key_event(key)?,
            },
        }
        Ok(())
    }

    /// Switching tabs discards uncommitted form input.
    fn select_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            self.send_component.reset();
            self.request_component.reset();
            self.active_tab = tab;
        }
    }

    fn navigate(&mut self, requested: Route) -> Result<()> {
        let resolved = resolve_route(requested, &self.session);
        if resolved == self.route {
            return Ok(());
        }
        debug!("Navigating {} -> {}", self.route, resolved);

        if self.route == Route::Dashboard {
            // Leaving invalidates in-flight dashboard work
            self.generation += 1;
            self.send_component.reset();
            self.request_component.reset();
            self.show_bank_panel = false;
            self.is_checking_balance = false;
            self.bank_panel.cancel_loading();
        }
        self.route = resolved;
        if resolved == Route::Dashboard {
            self.action_tx.send(Action::LoadDashboard)?;
        }
        Ok(())
    }

    fn load_dashboard(&mut self) {
        self.generation += 1;
        self.is_loading = true;
        let generation = self.generation;
        let records = Arc::clone(&self.records);
        let owner = self
            .session
            .identity()
            .map(|identity| identity.first_name.clone());
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let (transactions, bank_accounts, wallet) = tokio::join!(
                records.fetch_transactions(Filter::latest(RECENT_LIMIT)),
                records.fetch_bank_accounts(Filter::default()),
                fetch_or_create_wallet(records.as_ref(), owner.as_deref()),
            );
            let batch = DashboardBatch {
                transactions,
                bank_accounts,
                wallet,
            };
            let _ = tx.send(Action::DashboardLoaded { generation, batch });
        });
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(ActiveNotice {
            notice,
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    async fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Handling action: {}", action);
        match action {
            Action::Tick => {
                self.clock = chrono::Local::now().format("%H:%M:%S").to_string();
                let now = Instant::now();
                self.notices.retain(|n| n.expires_at > now);
            }
            Action::Render => {
                self.draw_ui()?;
            }
            Action::Resize(w, h) => {
                self.tui.resize(Rect::new(0, 0, w, h))?;
                self.draw_ui()?;
            }
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Suspend => {
                self.should_suspend = true;
            }
            Action::Resume => {
                self.action_tx.send(Action::ClearScreen)?;
            }
            Action::ClearScreen => {
                self.tui.terminal.clear()?;
            }
            Action::Error(message) => {
                error!("{}", message);
                self.notify(Notice::error(message));
            }
            Action::Navigate(route) => {
                self.navigate(route)?;
            }
            Action::ToggleTheme => {
                let result = self.theme.toggle(&self.store);
                if let Some(notice) = persistence_notice(result, "theme preference") {
                    self.notify(notice);
                }
            }
            Action::SubmitLogin => {
                let provider = Arc::clone(&self.identity_provider);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let action = match provider.login().await {
                        Ok(identity) => Action::LoginSucceeded(identity),
                        Err(err) => Action::LoginFailed(err.to_string()),
                    };
                    let _ = tx.send(action);
                });
            }
            Action::LoginSucceeded(identity) => {
                let result = self.store.save_session(&identity);
                if let Some(notice) = persistence_notice(result, "session") {
                    self.notify(notice);
                }
                self.session.set_identity(identity);
                self.login_component.set_idle(None);
                self.navigate(Route::Dashboard)?;
            }
            Action::LoginFailed(message) => {
                self.login_component.set_idle(Some(message));
            }
            Action::Logout => {
                let provider = Arc::clone(&self.identity_provider);
                tokio::spawn(async move {
                    if let Err(err) = provider.logout().await {
                        error!("Sign-out failed: {}", err);
                    }
                });
                self.session.clear();
                let result = self.store.clear_session();
                if let Some(notice) = persistence_notice(result, "session") {
                    self.notify(notice);
                }
                self.wallet = None;
                self.bank_accounts.clear();
                self.recent_transactions.set_transactions(Vec::new());
                self.navigate(Route::Home)?;
                self.notify(Notice::info("Signed out"));
            }
            Action::LoadDashboard => {
                self.load_dashboard();
            }
            Action::DashboardLoaded { generation, batch } => {
                if generation != self.generation {
                    debug!("Dropping stale dashboard batch (generation {})", generation);
                    return Ok(());
                }
                self.is_loading = false;
                let mut failed = false;
                match batch.transactions {
                    Ok(transactions) => self.recent_transactions.set_transactions(transactions),
                    Err(err) => {
                        error!("Transactions fetch failed: {}", err);
                        failed = true;
                    }
                }
                match batch.bank_accounts {
                    Ok(accounts) => self.bank_accounts = accounts,
                    Err(err) => {
                        error!("Bank accounts fetch failed: {}", err);
                        failed = true;
                    }
                }
                match batch.wallet {
                    Ok(wallet) => self.wallet = Some(wallet),
                    Err(err) => {
                        error!("Wallet fetch failed: {}", err);
                        failed = true;
                    }
                }
                if failed {
                    self.notify(Notice::error("Some dashboard data failed to load"));
                }
            }
            Action::CheckBankBalance => {
                self.is_checking_balance = true;
                self.show_bank_panel = true;
                self.bank_panel.is_loading = true;
                let generation = self.generation;
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(BALANCE_REFRESH_DELAY).await;
                    let _ = tx.send(Action::BankBalancesRefreshed { generation });
                });
            }
            Action::BankBalancesRefreshed { generation } => {
                if generation != self.generation {
                    debug!("Dropping stale balance refresh (generation {})", generation);
                    self.is_checking_balance = false;
                    self.bank_panel.cancel_loading();
                    return Ok(());
                }
                self.is_checking_balance = false;
                self.bank_panel.set_accounts(self.bank_accounts.clone())?;
            }
            Action::CloseBankPanel => {
                self.show_bank_panel = false;
            }
            Action::SelectBankAccount(account_id) => {
                let records = Arc::clone(&self.records);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = records
                        .fetch_bank_transactions(Filter::for_bank_account(account_id))
                        .await;
                    let _ = tx.send(Action::BankTransactionsLoaded { account_id, result });
                });
            }
            Action::BankTransactionsLoaded { account_id, result } => match result {
                Ok(transactions) => {
                    self.bank_panel.set_transactions(account_id, transactions);
                }
                Err(err) => {
                    self.bank_panel.loading_transactions = false;
                    error!("Bank transactions fetch failed: {}", err);
                    self.notify(Notice::error("Could not load bank transactions"));
                }
            },
            Action::SendPayment { recipient, amount } => {
                let points = crate::domain::money::calculate_rewards(amount);
                self.notify(Notice::success(format!(
                    "Sent {} to {} (+{} points)",
                    format_usd(amount),
                    recipient,
                    points
                )));
                let records = Arc::clone(&self.records);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let new = crate::domain::records::NewTransaction {
                        name: recipient,
                        amount: -amount.abs(),
                        date: chrono::Local::now().date_naive(),
                        direction: crate::domain::records::Direction::Outgoing,
                    };
                    match records.create_transaction(new).await {
                        Ok(_) => {
                            let _ = tx.send(Action::LoadDashboard);
                        }
                        Err(err) => {
                            let _ = tx.send(Action::Error(format!("Payment failed: {}", err)));
                        }
                    }
                });
            }
            Action::RequestPayment { recipient, amount } => {
                self.notify(Notice::success(format!(
                    "Requested {} from {}",
                    format_usd(amount),
                    recipient
                )));
            }
            Action::Notify(notice) => {
                self.notify(notice);
            }
        }
        Ok(())
    }

    fn draw_ui(&mut self) -> Result<()> {
        let palette = self.theme.palette();
        let route = self.route;
        let active_tab = self.active_tab;
        let clock = self.clock.clone();
        let greeting = self
            .session
            .identity()
            .map(|identity| format!("Hi, {}", identity.display_name()));
        let balance = self.wallet.as_ref().map(|wallet| wallet.balance);
        let is_loading = self.is_loading;
        let is_checking_balance = self.is_checking_balance;
        let show_bank_panel = self.show_bank_panel;

        let Self {
            tui,
            login_component,
            send_component,
            request_component,
            scan_component,
            cards_component,
            bank_panel,
            recent_transactions,
            notices,
            ..
        } = self;

        tui.draw(|f| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

            let mut header_spans = vec![Span::styled(
                format!("{} PayWave", icon("Wallet")),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(ref greeting) = greeting {
                header_spans.push(Span::raw("  "));
                header_spans.push(Span::styled(
                    greeting.clone(),
                    Style::default().fg(palette.fg),
                ));
            }
            if !clock.is_empty() {
                header_spans.push(Span::raw("  "));
                header_spans.push(Span::styled(clock.clone(), Style::default().fg(palette.dim)));
            }
            let header = Paragraph::new(Line::from(header_spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.dim)),
            );
            f.render_widget(header, chunks[0]);

            match route {
                Route::Home => draw_home(f, chunks[1], &palette),
                Route::Login => login_component.draw(f, chunks[1], &palette),
                Route::Signup => draw_signup(f, chunks[1], &palette),
                Route::NotFound => draw_not_found(f, chunks[1], &palette),
                Route::Dashboard => {
                    if is_loading {
                        let loading = Paragraph::new(vec![
                            Line::from(""),
                            Line::from(Span::styled(
                                "Loading your dashboard...",
                                Style::default().fg(palette.accent),
                            )),
                        ])
                        .alignment(Alignment::Center);
                        f.render_widget(loading, chunks[1]);
                    } else if show_bank_panel {
                        bank_panel.draw(f, chunks[1], &palette);
                    } else {
                        let dash = Layout::vertical([
                            Constraint::Length(5), // Balance card
                            Constraint::Length(3), // Tabs
                            Constraint::Min(0),    // Tab content + recent
                        ])
                        .split(chunks[1]);

                        let balance_line = match balance {
                            Some(balance) => Line::from(vec![
                                Span::styled(
                                    format_usd(balance),
                                    Style::default()
                                        .fg(palette.fg)
                                        .add_modifier(Modifier::BOLD),
                                ),
                                Span::styled(
                                    if is_checking_balance {
                                        "   Checking bank balances..."
                                    } else {
                                        "   [b] Check bank balances"
                                    },
                                    Style::default().fg(palette.dim),
                                ),
                            ]),
                            None => Line::from(Span::styled(
                                "Balance unavailable",
                                Style::default().fg(palette.dim),
                            )),
                        };
                        let balance_card =
                            Paragraph::new(vec![Line::from(""), balance_line]).block(
                                Block::default()
                                    .title("Balance")
                                    .borders(Borders::ALL)
                                    .border_style(Style::default().fg(palette.accent)),
                            );
                        f.render_widget(balance_card, dash[0]);

                        let titles: Vec<Line> =
                            Tab::all().iter().map(|t| t.title(&palette)).collect();
                        let tabs = Tabs::new(titles)
                            .block(Block::default().borders(Borders::ALL))
                            .select(active_tab.index())
                            .style(Style::default().fg(palette.fg))
                            .highlight_style(
                                Style::default()
                                    .fg(palette.accent)
                                    .add_modifier(Modifier::BOLD),
                            );
                        f.render_widget(tabs, dash[1]);

                        let content = Layout::horizontal([
                            Constraint::Percentage(58),
                            Constraint::Percentage(42),
                        ])
                        .split(dash[2]);
                        match active_tab {
                            Tab::Send => send_component.draw(f, content[0], &palette),
                            Tab::Request => request_component.draw(f, content[0], &palette),
                            Tab::Scan => scan_component.draw(f, content[0], &palette),
                            Tab::Cards => cards_component.draw(f, content[0], &palette),
                        }
                        recent_transactions.draw(f, content[1], &palette);
                    }
                }
            }

            let footer_text = match route {
                Route::Home => "[l] Sign in  [s] Sign up  [t] Theme  [q] Quit",
                Route::Login => "[e] Edit email  [Enter] Sign in  [q] Quit",
                Route::Signup => "[l] Sign in instead  [h] Home  [q] Quit",
                Route::NotFound => "Press any key to go home",
                Route::Dashboard => {
                    "[1-4/Tab] Tabs  [b] Bank  [p] Bills  [s] Shop  [r] Transport  [a] Add  [w] Withdraw  [t] Theme  [l] Sign out  [q] Quit"
                }
            };
            let footer = Paragraph::new(Line::from(Span::styled(
                footer_text,
                Style::default().fg(palette.dim),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.dim)),
            );
            f.render_widget(footer, chunks[2]);

            draw_notices(f, chunks[1], &palette, notices);
        })?;
        Ok(())
    }
}

fn draw_home(f: &mut crate::tui::Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Pay anyone, instantly", icon("Wallet")),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Send and request money, scan to pay, and keep your cards in one place.",
            Style::default().fg(palette.fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[l] Sign in    [s] Sign up",
            Style::default().fg(palette.dim),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(widget, area);
}

fn draw_signup(f: &mut crate::tui::Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Sign-up is not available in the demo",
            Style::default().fg(palette.fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[l] Sign in with the demo account instead",
            Style::default().fg(palette.dim),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title("Sign up")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(widget, area);
}

fn draw_not_found(f: &mut crate::tui::Frame, area: Rect, palette: &Palette) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "This screen does not exist",
            Style::default().fg(palette.negative),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.dim)),
    );
    f.render_widget(widget, area);
}

fn draw_notices(
    f: &mut crate::tui::Frame,
    area: Rect,
    palette: &Palette,
    notices: &[ActiveNotice],
) {
    let width = 44.min(area.width);
    for (i, active) in notices.iter().rev().take(4).enumerate() {
        let y = area.y + (i as u16) * 3;
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width.saturating_sub(width), y, width, 3);
        let color = match active.notice.kind {
            NoticeKind::Info => palette.accent,
            NoticeKind::Success => palette.positive,
            NoticeKind::Error => palette.negative,
        };
        let widget = Paragraph::new(Line::from(Span::styled(
            active.notice.text.clone(),
            Style::default().fg(color),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_indices_round_trip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), tab);
        }
        assert_eq!(Tab::from_index(99), Tab::Send);
    }

    #[test]
    fn every_quick_action_key_raises_a_notice() {
        for c in ['a', 'w', 'v', 'p', 's', 'r'] {
            let notice = quick_action_notice(KeyCode::Char(c)).unwrap();
            assert_eq!(notice.kind, NoticeKind::Info);
        }
        assert!(quick_action_notice(KeyCode::Char('z')).is_none());
        assert!(quick_action_notice(KeyCode::Enter).is_none());

        let bills = quick_action_notice(KeyCode::Char('p')).unwrap();
        assert!(bills.text.contains("Bill payments"));
        let transport = quick_action_notice(KeyCode::Char('r')).unwrap();
        assert!(transport.text.contains("Transport"));
    }

    #[test]
    fn store_failures_turn_into_notices() {
        assert!(persistence_notice(Ok(()), "theme preference").is_none());

        let notice =
            persistence_notice(Err(color_eyre::eyre::eyre!("disk full")), "session").unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("session"));
    }
}
