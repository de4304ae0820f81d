use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eat_n_split::{
    balance_message, format_amount, AddFriendField, AppState, Event, IdGenerator,
    Payer, SplitBillField, SplitBillInput, Tone, UuidGenerator,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

/// Which panel receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Friends,
    AddForm(AddFriendField),
    SplitForm(SplitBillField),
}

pub struct App {
    pub state: AppState,
    pub list_state: ListState,
    pub focus: Focus,
    pub currency: String,
    pub running: bool,
    ids: Box<dyn IdGenerator>,
}

impl App {
    pub fn new(state: AppState, currency: String) -> Self {
        Self::with_ids(state, currency, Box::new(UuidGenerator))
    }

    pub fn with_ids(state: AppState, currency: String, ids: Box<dyn IdGenerator>) -> Self {
        let mut list_state = ListState::default();
        if !state.friends.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            state,
            list_state,
            focus: Focus::Friends,
            currency,
            running: true,
            ids,
        }
    }

    pub fn next(&mut self) {
        let len = self.state.friends.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.state.friends.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Press the Select/Close button of the row under the cursor
    pub fn select_current(&mut self) {
        let id = self
            .list_state
            .selected()
            .and_then(|i| self.state.friends.as_slice().get(i))
            .map(|f| f.id.clone());

        if let Some(id) = id {
            self.state.dispatch(Event::FriendSelected(id));
        }
    }

    pub fn toggle_add_form(&mut self) {
        self.state.dispatch(Event::ToggleAddForm);
        if self.state.is_add_form_open {
            self.focus = Focus::AddForm(AddFriendField::Name);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        match self.focus {
            Focus::Friends => self.handle_friends_key(key),
            Focus::AddForm(field) => self.handle_add_form_key(field, key),
            Focus::SplitForm(field) => self.handle_split_form_key(field, key),
        }

        // Focus cannot stay on a panel that is no longer shown
        match self.focus {
            Focus::AddForm(_) if !self.state.is_add_form_open => self.focus = Focus::Friends,
            Focus::SplitForm(_) if !self.state.split_form_visible() => self.focus = Focus::Friends,
            _ => {}
        }
    }

    fn handle_friends_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_current(),
            KeyCode::Char('a') => self.toggle_add_form(),
            KeyCode::Tab => {
                if self.state.is_add_form_open {
                    self.focus = Focus::AddForm(AddFriendField::Name);
                } else if self.state.split_form_visible() {
                    self.focus = Focus::SplitForm(SplitBillField::BillTotal);
                }
            }
            _ => {}
        }
    }

    fn handle_add_form_key(&mut self, field: AddFriendField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Friends,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = Focus::AddForm(field.next());
            }
            KeyCode::Enter => {
                if self.state.submit_add_friend(&mut *self.ids) {
                    self.focus = Focus::Friends;
                    self.list_state.select(Some(self.state.friends.len() - 1));
                }
            }
            KeyCode::Char(c) => {
                let mut text = self.state.add_form.value(field).to_string();
                text.push(c);
                self.state.dispatch(Event::AddForm(field, text));
            }
            KeyCode::Backspace => {
                let mut text = self.state.add_form.value(field).to_string();
                text.pop();
                self.state.dispatch(Event::AddForm(field, text));
            }
            _ => {}
        }
    }

    fn handle_split_form_key(&mut self, field: SplitBillField, key: KeyEvent) {
        match (field, key.code) {
            (_, KeyCode::Esc) => self.focus = Focus::Friends,
            (_, KeyCode::Tab) | (_, KeyCode::Down) => {
                self.focus = Focus::SplitForm(field.next());
            }
            (_, KeyCode::BackTab) | (_, KeyCode::Up) => {
                self.focus = Focus::SplitForm(field.previous());
            }
            (_, KeyCode::Enter) => {
                if self.state.submit_split_bill() {
                    self.focus = Focus::Friends;
                }
            }
            (SplitBillField::Payer, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                let payer = self.state.split_form.payer().toggle();
                self.state.dispatch(Event::SplitForm(SplitBillInput::Payer(payer)));
            }
            (SplitBillField::BillTotal | SplitBillField::UserExpense, KeyCode::Char(c)) => {
                let mut text = self.amount_text(field);
                text.push(c);
                self.edit_amount(field, text);
            }
            (SplitBillField::BillTotal | SplitBillField::UserExpense, KeyCode::Backspace) => {
                let mut text = self.amount_text(field);
                text.pop();
                self.edit_amount(field, text);
            }
            _ => {}
        }
    }

    fn amount_text(&self, field: SplitBillField) -> String {
        let form = &self.state.split_form;
        match field {
            SplitBillField::BillTotal => form.bill_total().text().to_string(),
            SplitBillField::UserExpense => form.user_expense().text().to_string(),
            SplitBillField::Payer => String::new(),
        }
    }

    fn edit_amount(&mut self, field: SplitBillField, text: String) {
        let input = match field {
            SplitBillField::BillTotal => SplitBillInput::BillTotal(text),
            SplitBillField::UserExpense => SplitBillInput::UserExpense(text),
            SplitBillField::Payer => return,
        };
        self.state.dispatch(Event::SplitForm(input));
    }
}

/// Runs `restore` when dropped, so every exit path out of `run_ui`
/// (including a failed setup step) gives the terminal back.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let _guard = TerminalGuard {
        restore: restore_terminal,
    };
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, app)?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    while app.running {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with totals
            Constraint::Min(0),    // Sidebar + split form
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let add_form_height = if app.state.is_add_form_open { 7 } else { 0 };
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(add_form_height),
            Constraint::Length(3),
        ])
        .split(content[0]);

    render_friends(f, sidebar[0], app);
    if app.state.is_add_form_open {
        render_add_form(f, sidebar[1], app);
    }
    render_toggle_button(f, sidebar[2], app);

    if app.state.split_form_visible() {
        render_split_form(f, content[1], app);
    } else {
        render_split_hint(f, content[1]);
    }

    render_status_bar(f, chunks[2], app);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Negative => Color::Red,
        Tone::Positive => Color::Green,
        Tone::Neutral => Color::Gray,
    }
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn marker(focused: bool) -> &'static str {
    if focused {
        "→ "
    } else {
        "  "
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let totals = app.state.ledger_totals();
    let cur = &app.currency;

    let net_color = if totals.net < 0.0 { Color::Red } else { Color::Green };
    let header_text = vec![Line::from(vec![
        Span::styled(
            "Eat-N-Split",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Friends: {}", app.state.friends.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Owed to you: {}{}", cur, format_amount(totals.owed_to_you)),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("You owe: {}{}", cur, format_amount(totals.you_owe)),
            Style::default().fg(Color::Red),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Net: {}{}", cur, format_amount(totals.net)),
            Style::default().fg(net_color),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_friends(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .state
        .friends
        .iter()
        .map(|friend| {
            let is_selected = app.state.selection.is_selected(&friend.id);
            let (message, tone) = balance_message(friend, &app.currency);

            let name_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let button = if is_selected { "[Close]" } else { "[Select]" };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:<20}", truncate(&friend.name, 20)), name_style),
                    Span::raw(" "),
                    Span::styled(button, Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(
                        truncate(&friend.image, 40),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(tone_color(tone)),
                )),
            ])
        })
        .collect();

    let border = if app.focus == Focus::Friends { Color::Yellow } else { Color::White };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Friends "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_add_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.add_form;
    let focused = |field: AddFriendField| app.focus == Focus::AddForm(field);

    let field_line = |field: AddFriendField| {
        Line::from(vec![
            Span::raw(marker(focused(field))),
            Span::styled(format!("{:<12}", field.label()), field_style(focused(field))),
            Span::raw(form.value(field).to_string()),
        ])
    };

    let content = vec![
        Line::from(""),
        field_line(AddFriendField::Name),
        field_line(AddFriendField::AvatarUrl),
        Line::from(""),
        Line::from(Span::styled(
            "  [ Add ]",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Friend "),
    );

    f.render_widget(panel, area);
}

fn render_toggle_button(f: &mut Frame, area: Rect, app: &App) {
    let label = if app.state.is_add_form_open { "Close" } else { "Add Friends" };

    let button = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (a)", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(button, area);
}

fn render_split_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(friend) = app.state.selected_friend() else {
        return;
    };
    let form = &app.state.split_form;
    let focused = |field: SplitBillField| app.focus == Focus::SplitForm(field);

    let friend_expense = form
        .friend_expense()
        .map(format_amount)
        .unwrap_or_default();
    let payer = match form.payer() {
        Payer::User => "You".to_string(),
        Payer::Friend => friend.name.clone(),
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(focused(SplitBillField::BillTotal))),
            Span::styled("Bill value: ", field_style(focused(SplitBillField::BillTotal))),
            Span::raw(form.bill_total().text().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(focused(SplitBillField::UserExpense))),
            Span::styled("Your expense: ", field_style(focused(SplitBillField::UserExpense))),
            Span::raw(form.user_expense().text().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{}'s expense: ", friend.name),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(friend_expense, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(marker(focused(SplitBillField::Payer))),
            Span::styled(
                "Who is paying the bill: ",
                field_style(focused(SplitBillField::Payer)),
            ),
            Span::styled(format!("< {} >", payer), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [ Split Bill ]",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Split a bill with {} ", friend.name)),
    );

    f.render_widget(panel, area);
}

fn render_split_hint(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Select a friend to split a bill",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(hint, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Friends => &[
            ("↑/↓", " Nav | "),
            ("Enter", " Select | "),
            ("a", " Add friend | "),
            ("Tab", " Form | "),
        ],
        Focus::AddForm(_) => &[("Tab", " Field | "), ("Enter", " Add | "), ("Esc", " Back | ")],
        Focus::SplitForm(_) => &[
            ("Tab", " Field | "),
            ("←/→", " Payer | "),
            ("Enter", " Split | "),
            ("Esc", " Back | "),
        ],
    };

    let mut status_spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*label));
    }
    let quit = if app.focus == Focus::Friends { "q" } else { "Ctrl+C" };
    status_spans.push(Span::styled(quit, Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
