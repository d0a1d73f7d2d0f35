//! Ratatui-based registration form.
//!
//! The form mirrors the paper workflow: student details on top, a subject
//! table below with catalog-derived columns, a running unit total, and an
//! enrollment chart view over the saved ledger.
//!
//! All core operations (row resolution, totals, validation, serialization,
//! counting) live outside this module; the TUI only wires key presses to
//! them and renders their results.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, TableState},
    Terminal,
};
use tracing::{info, warn};

use crate::domain::{EnrollmentReport, EnrollmentType, FormPaths, Registration, RegistrationRow};
use crate::error::FormError;
use crate::io::catalog::{load_catalog_or_empty, load_course_names_or_empty, Catalog};

mod chart;

use chart::EnrollmentChart;

/// Start the registration form.
pub fn run(paths: FormPaths) -> Result<(), FormError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FormError::Terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(paths);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, FormError> {
        enable_raw_mode()
            .map_err(|e| FormError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(FormError::Terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Form fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    IdNumber,
    LastName,
    FirstName,
    MiddleName,
    Course,
    Semester,
    SchoolYear,
    Date,
    YearLevel,
    EnrollmentType,
}

const FIELDS: [Field; 10] = [
    Field::IdNumber,
    Field::LastName,
    Field::FirstName,
    Field::MiddleName,
    Field::Course,
    Field::Semester,
    Field::SchoolYear,
    Field::Date,
    Field::YearLevel,
    Field::EnrollmentType,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::IdNumber => "ID number",
            Field::LastName => "Last name",
            Field::FirstName => "First name",
            Field::MiddleName => "Middle name",
            Field::Course => "Course",
            Field::Semester => "Semester",
            Field::SchoolYear => "School year",
            Field::Date => "Date (YYYY-MM-DD)",
            Field::YearLevel => "Year level",
            Field::EnrollmentType => "Enrollment type",
        }
    }

    /// Choice fields are cycled with arrows rather than typed into.
    fn is_choice(self) -> bool {
        matches!(self, Field::Course | Field::EnrollmentType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Fields,
    Subjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Form,
    Chart,
}

#[derive(Debug, Clone)]
enum EditTarget {
    Field(Field),
    RowCode(usize),
    RowTitle(usize),
}

#[derive(Debug, Clone)]
struct Editing {
    target: EditTarget,
    buffer: String,
}

/// The in-progress registration, kept as raw text until submit.
struct Draft {
    id_number: String,
    last_name: String,
    first_name: String,
    middle_name: String,
    course_idx: Option<usize>,
    semester: String,
    school_year: String,
    date_input: String,
    year_level: String,
    enrollment_type: EnrollmentType,
    rows: Vec<RegistrationRow>,
}

impl Draft {
    fn new() -> Self {
        Self {
            id_number: String::new(),
            last_name: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            course_idx: None,
            semester: String::new(),
            school_year: String::new(),
            // The date defaults to today; the user can still edit it.
            date_input: chrono::Local::now().date_naive().to_string(),
            year_level: String::new(),
            enrollment_type: EnrollmentType::New,
            rows: vec![RegistrationRow::default()],
        }
    }
}

struct App {
    paths: FormPaths,
    catalog: Catalog,
    course_options: Vec<String>,
    draft: Draft,
    focus: Focus,
    view: View,
    selected_field: usize,
    selected_row: usize,
    editing: Option<Editing>,
    total_units: i32,
    report: Option<EnrollmentReport>,
    status: String,
}

impl App {
    fn new(paths: FormPaths) -> Self {
        let catalog = load_catalog_or_empty(&paths.catalog);
        let course_options = load_course_names_or_empty(&paths.courses);

        let status = if catalog.is_empty() {
            "Catalog unavailable; subject rows will not auto-fill.".to_string()
        } else {
            format!("Catalog loaded: {} entries.", catalog.len())
        };

        Self {
            paths,
            catalog,
            course_options,
            draft: Draft::new(),
            focus: Focus::Fields,
            view: View::Form,
            selected_field: 0,
            selected_row: 0,
            editing: None,
            total_units: 0,
            report: None,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), FormError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| FormError::Terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| FormError::Terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| FormError::Terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.view == View::Chart {
            if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                self.view = View::Form;
            }
            return false;
        }

        if self.editing.is_some() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Fields => Focus::Subjects,
                    Focus::Subjects => Focus::Fields,
                };
            }
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('g') => self.show_chart(),
            KeyCode::Up => match self.focus {
                Focus::Fields => self.selected_field = self.selected_field.saturating_sub(1),
                Focus::Subjects => self.selected_row = self.selected_row.saturating_sub(1),
            },
            KeyCode::Down => match self.focus {
                Focus::Fields => {
                    if self.selected_field + 1 < FIELDS.len() {
                        self.selected_field += 1;
                    }
                }
                Focus::Subjects => {
                    if self.selected_row + 1 < self.draft.rows.len() {
                        self.selected_row += 1;
                    }
                }
            },
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => match self.focus {
                Focus::Fields => self.start_field_edit(),
                Focus::Subjects => self.start_row_edit(EditTarget::RowCode(self.selected_row)),
            },
            KeyCode::Char('t') => {
                if self.focus == Focus::Subjects {
                    self.start_row_edit(EditTarget::RowTitle(self.selected_row));
                }
            }
            KeyCode::Char('a') => {
                if self.focus == Focus::Subjects {
                    self.draft.rows.push(RegistrationRow::default());
                    self.selected_row = self.draft.rows.len() - 1;
                    self.update_total();
                }
            }
            KeyCode::Char('d') => {
                if self.focus == Focus::Subjects {
                    self.delete_selected_row();
                }
            }
            _ => {}
        }

        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(editing) = self.editing.as_mut() {
                    editing.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(editing) = self.editing.as_mut() {
                    if !c.is_control() {
                        editing.buffer.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn start_field_edit(&mut self) {
        let field = FIELDS[self.selected_field];
        if field.is_choice() {
            self.status = format!("Use ←/→ to choose the {}.", field.label().to_lowercase());
            return;
        }

        let buffer = match field {
            Field::IdNumber => self.draft.id_number.clone(),
            Field::LastName => self.draft.last_name.clone(),
            Field::FirstName => self.draft.first_name.clone(),
            Field::MiddleName => self.draft.middle_name.clone(),
            Field::Semester => self.draft.semester.clone(),
            Field::SchoolYear => self.draft.school_year.clone(),
            Field::Date => self.draft.date_input.clone(),
            Field::YearLevel => self.draft.year_level.clone(),
            Field::Course | Field::EnrollmentType => String::new(),
        };

        self.editing = Some(Editing {
            target: EditTarget::Field(field),
            buffer,
        });
    }

    fn start_row_edit(&mut self, target: EditTarget) {
        let buffer = match &target {
            EditTarget::RowCode(idx) => self
                .draft
                .rows
                .get(*idx)
                .map(|row| row.class_code.clone())
                .unwrap_or_default(),
            EditTarget::RowTitle(idx) => self
                .draft
                .rows
                .get(*idx)
                .map(|row| row.title.clone())
                .unwrap_or_default(),
            EditTarget::Field(_) => String::new(),
        };
        self.editing = Some(Editing { target, buffer });
    }

    fn commit_edit(&mut self) {
        let Some(editing) = self.editing.take() else {
            return;
        };
        let value = editing.buffer.trim().to_string();

        match editing.target {
            EditTarget::Field(field) => self.apply_field_edit(field, value),
            EditTarget::RowCode(idx) => {
                if let Some(row) = self.draft.rows.get_mut(idx) {
                    row.class_code = value;
                    *row = crate::form::resolve_row(row, &self.catalog);
                }
                self.update_total();
            }
            EditTarget::RowTitle(idx) => {
                if let Some(row) = self.draft.rows.get_mut(idx) {
                    row.title = value;
                    *row = crate::form::resolve_row(row, &self.catalog);
                }
                self.update_total();
            }
        }
    }

    fn apply_field_edit(&mut self, field: Field, value: String) {
        match field {
            Field::IdNumber => self.draft.id_number = value,
            Field::LastName => self.draft.last_name = value,
            Field::FirstName => self.draft.first_name = value,
            Field::MiddleName => self.draft.middle_name = value,
            Field::Semester => self.draft.semester = value,
            Field::SchoolYear => self.draft.school_year = value,
            Field::Date => self.draft.date_input = value,
            Field::YearLevel => self.draft.year_level = value,
            Field::Course | Field::EnrollmentType => {}
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        if self.focus != Focus::Fields {
            return;
        }
        match FIELDS[self.selected_field] {
            Field::Course => self.cycle_course(delta),
            Field::EnrollmentType => {
                self.draft.enrollment_type = if delta >= 0 {
                    self.draft.enrollment_type.next()
                } else {
                    self.draft.enrollment_type.prev()
                };
            }
            _ => {}
        }
    }

    fn cycle_course(&mut self, delta: i32) {
        if self.course_options.is_empty() {
            self.status = "No course options loaded.".to_string();
            return;
        }
        let len = self.course_options.len() as i32;
        let next = match self.draft.course_idx {
            Some(cur) => (cur as i32 + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.draft.course_idx = Some(next as usize);
    }

    fn delete_selected_row(&mut self) {
        if self.selected_row < self.draft.rows.len() {
            self.draft.rows.remove(self.selected_row);
        }
        // The form always shows at least one (possibly empty) subject row.
        if self.draft.rows.is_empty() {
            self.draft.rows.push(RegistrationRow::default());
        }
        if self.selected_row >= self.draft.rows.len() {
            self.selected_row = self.draft.rows.len() - 1;
        }
        self.update_total();
    }

    fn update_total(&mut self) {
        self.total_units = crate::form::total_units(&self.draft.rows);
    }

    fn selected_course(&self) -> Option<&str> {
        self.draft
            .course_idx
            .and_then(|idx| self.course_options.get(idx))
            .map(String::as_str)
    }

    fn build_registration(&self) -> Result<Registration, FormError> {
        let date_input = self.draft.date_input.trim();
        let date = if date_input.is_empty() {
            None
        } else {
            Some(
                chrono::NaiveDate::parse_from_str(date_input, "%Y-%m-%d")
                    .map_err(|_| FormError::IncompleteForm("a valid date (YYYY-MM-DD)"))?,
            )
        };

        let registration = Registration {
            id_number: self.draft.id_number.clone(),
            last_name: self.draft.last_name.clone(),
            first_name: self.draft.first_name.clone(),
            middle_name: self.draft.middle_name.clone(),
            course: self.selected_course().unwrap_or_default().to_string(),
            semester: self.draft.semester.clone(),
            school_year: self.draft.school_year.clone(),
            date,
            year_level: self.draft.year_level.clone(),
            enrollment_type: self.draft.enrollment_type,
            rows: self.draft.rows.clone(),
        };

        crate::form::submit::validate(&registration)?;
        Ok(registration)
    }

    fn submit(&mut self) {
        let registration = match self.build_registration() {
            Ok(reg) => reg,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        let record = crate::form::submit::serialize(&registration);
        match crate::io::ledger::append_record(&self.paths.ledger, &record) {
            Ok(()) => {
                info!(ledger = %self.paths.ledger.display(), "registration saved");
                self.status = format!("Saved registration for {}.", registration.full_name());
                // Reset for the next student; the save is already durable.
                self.draft = Draft::new();
                self.selected_row = 0;
                self.update_total();
            }
            Err(err) => {
                warn!(%err, "ledger append failed");
                self.status = err.to_string();
            }
        }
    }

    fn show_chart(&mut self) {
        match crate::report::course_counts(&self.paths.ledger) {
            Ok(counts) if counts.is_empty() => {
                self.status = "No enrollment data available to chart.".to_string();
            }
            Ok(counts) => {
                self.report = Some(crate::report::build_report(
                    &counts,
                    chrono::Local::now().date_naive(),
                ));
                self.view = View::Chart;
            }
            Err(err) => {
                warn!(%err, "ledger read failed");
                self.status = "No enrollment data available to chart.".to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        match self.view {
            View::Form => self.draw_form(frame),
            View::Chart => self.draw_chart_view(frame),
        }
    }

    fn draw_form(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(12),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_fields(frame, chunks[1]);
        self.draw_subjects(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("enroll", Style::default().fg(Color::Cyan)),
            Span::raw(" — student course registration"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "catalog: {} entries | courses: {} | ledger: {}",
                self.catalog.len(),
                self.course_options.len(),
                self.paths.ledger.display(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_fields(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FIELDS
            .iter()
            .map(|field| {
                let value = match field {
                    Field::IdNumber => self.draft.id_number.clone(),
                    Field::LastName => self.draft.last_name.clone(),
                    Field::FirstName => self.draft.first_name.clone(),
                    Field::MiddleName => self.draft.middle_name.clone(),
                    Field::Course => self.selected_course().unwrap_or("-").to_string(),
                    Field::Semester => self.draft.semester.clone(),
                    Field::SchoolYear => self.draft.school_year.clone(),
                    Field::Date => self.draft.date_input.clone(),
                    Field::YearLevel => self.draft.year_level.clone(),
                    Field::EnrollmentType => self.draft.enrollment_type.display_name().to_string(),
                };
                let value = if value.is_empty() {
                    "-".to_string()
                } else {
                    value
                };
                ListItem::new(format!("{:<18} {value}", field.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Student").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        if self.focus == Focus::Fields {
            state.select(Some(self.selected_field));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_subjects(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec!["code", "title", "time", "day", "room", "units"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .draft
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.class_code.clone(),
                    row.title.clone(),
                    row.time.clone(),
                    row.day.clone(),
                    row.room.clone(),
                    row.unit_count.clone(),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!("Subjects — total units: {}", self.total_units))
                    .borders(Borders::ALL),
            )
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = TableState::default();
        if self.focus == Focus::Subjects {
            state.select(Some(self.selected_row));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.focus {
            Focus::Fields => "↑/↓ select  Enter edit  ←/→ choose  Tab subjects  s submit  g chart  q quit",
            Focus::Subjects => "↑/↓ select  Enter code  t title  a add  d delete  Tab fields  s submit  g chart  q quit",
        };

        let status = match &self.editing {
            Some(editing) => {
                let label = match &editing.target {
                    EditTarget::Field(field) => field.label(),
                    EditTarget::RowCode(_) => "class code",
                    EditTarget::RowTitle(_) => "title",
                };
                format!("Editing {label}: {}▏ (Enter apply, Esc cancel)", editing.buffer)
            }
            None => self.status.clone(),
        };

        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart_view(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(size);

        let Some(report) = &self.report else {
            return;
        };

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Enrollment per course", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  (registrations: {})", report.total),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1]);

        let chart_block = Block::default().borders(Borders::ALL);
        let chart_inner = chart_block.inner(body[0]);
        frame.render_widget(chart_block, body[0]);
        frame.render_widget(
            EnrollmentChart {
                entries: &report.entries,
            },
            chart_inner,
        );

        let items: Vec<ListItem> = report
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                ListItem::new(format!(
                    "{}. {} — {} ({}%)",
                    idx + 1,
                    entry.course,
                    entry.count,
                    crate::report::format::format_percent(entry.share_percent),
                ))
            })
            .collect();
        let legend = List::new(items).block(Block::default().title("Legend").borders(Borders::ALL));
        frame.render_widget(legend, body[1]);

        let footer = Paragraph::new(Line::from(Span::styled(
            "Esc/q back to form",
            Style::default().fg(Color::Gray),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }
}
