use anyhow::Result;
use bmi_tracker::{BmiCategory, Record};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const PAGE_SIZE: usize = 10;

pub struct App {
    pub records: Vec<Record>,
    pub filtered_records: Vec<Record>,
    pub state: TableState,
    pub active_filter: Option<BmiCategory>,
    pub data_file: String,
}

impl App {
    pub fn new(records: Vec<Record>, data_file: String) -> Self {
        let mut state = TableState::default();
        if !records.is_empty() {
            state.select(Some(0));
        }

        let filtered_records = records.clone();

        Self {
            records,
            filtered_records,
            state,
            active_filter: None,
            data_file,
        }
    }

    pub fn apply_filter(&mut self, category: BmiCategory) {
        self.active_filter = Some(category);
        self.filtered_records = self
            .records
            .iter()
            .filter(|r| r.category() == category)
            .cloned()
            .collect();
        self.reset_selection();
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
        self.filtered_records = self.records.clone();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.filtered_records.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        self.move_by(1);
    }

    pub fn previous(&mut self) {
        self.move_by(-1);
    }

    pub fn page_down(&mut self) {
        self.move_by(PAGE_SIZE as isize);
    }

    pub fn page_up(&mut self) {
        self.move_by(-(PAGE_SIZE as isize));
    }

    pub fn first(&mut self) {
        self.reset_selection();
    }

    pub fn last(&mut self) {
        if !self.filtered_records.is_empty() {
            self.state.select(Some(self.filtered_records.len() - 1));
        }
    }

    // Clamped at both ends, no wrap-around
    fn move_by(&mut self, delta: isize) {
        if self.filtered_records.is_empty() {
            return;
        }

        let max = self.filtered_records.len() as isize - 1;
        let current = self.state.selected().unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, max);
        self.state.select(Some(target as usize));
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.state.selected().and_then(|i| self.filtered_records.get(i))
    }

    pub fn stats(&self) -> CategoryStats {
        let mut stats = CategoryStats::default();

        for record in &self.records {
            match record.category() {
                BmiCategory::Underweight => stats.underweight += 1,
                BmiCategory::NormalWeight => stats.normal += 1,
                BmiCategory::Overweight => stats.overweight += 1,
                BmiCategory::Obesity => stats.obesity += 1,
                BmiCategory::CannotInterpret => {}
            }
        }

        if !self.records.is_empty() {
            stats.average_bmi =
                self.records.iter().map(|r| r.bmi()).sum::<f64>() / self.records.len() as f64;
        }

        stats
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CategoryStats {
    pub underweight: usize,
    pub normal: usize,
    pub overweight: usize,
    pub obesity: usize,
    pub average_bmi: f64,
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('1') => app.apply_filter(BmiCategory::Underweight),
                KeyCode::Char('2') => app.apply_filter(BmiCategory::NormalWeight),
                KeyCode::Char('3') => app.apply_filter(BmiCategory::Overweight),
                KeyCode::Char('4') => app.apply_filter(BmiCategory::Obesity),
                KeyCode::Char('c') => app.clear_filter(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with totals
            Constraint::Min(0),    // Records table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn category_color(category: BmiCategory) -> Color {
    match category {
        BmiCategory::Underweight => Color::Cyan,
        BmiCategory::NormalWeight => Color::Green,
        BmiCategory::Overweight => Color::Yellow,
        BmiCategory::Obesity => Color::Red,
        BmiCategory::CannotInterpret => Color::DarkGray,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let counts = [
        (BmiCategory::Underweight, stats.underweight),
        (BmiCategory::NormalWeight, stats.normal),
        (BmiCategory::Overweight, stats.overweight),
        (BmiCategory::Obesity, stats.obesity),
    ];

    let mut spans = vec![
        Span::styled(
            "BMI Records",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Total: {}", app.records.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Avg BMI: {:.2}", stats.average_bmi),
            Style::default().fg(Color::White),
        ),
    ];

    for (category, count) in counts {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {}", category.label(), count),
            Style::default().fg(category_color(category)),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Weight (kg)", "Height (m)", "BMI", "Category"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_records.iter().map(|record| {
        let color = category_color(record.category());

        let cells = vec![
            Cell::from(truncate(record.name(), 30)),
            Cell::from(format!("{:.2}", record.weight_kg())),
            Cell::from(format!("{:.2}", record.height_m())),
            Cell::from(format!("{:.2}", record.bmi())).style(Style::default().fg(color)),
            Cell::from(record.category().label()).style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.data_file)),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered_records.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(record) = app.selected_record() {
        status_spans.push(Span::styled(
            truncate(record.name(), 20),
            Style::default().fg(Color::White),
        ));
    }

    if let Some(category) = app.active_filter {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", category.label()),
            Style::default().fg(category_color(category)),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("1-4", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Filter | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Fast | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
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
