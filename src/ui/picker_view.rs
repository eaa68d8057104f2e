use crate::calc::grid::{month_cells, DayCell, WEEKDAY_LABELS};
use crate::calc::month::{add_months, month_name};
use crate::calc::range::format_display_date;
use crate::data::Settings;
use crate::picker::{Direction as NavDirection, Phase, RangePicker};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Selection colors
const ACCENT: Color = Color::Rgb(25, 118, 210);
const RANGE_FILL: Color = Color::Rgb(220, 236, 255);

const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 18;
const MONTH_WIDTH: u16 = 21;

/// Everything a left-click can land on. Hit rects are rebuilt on every
/// render; the last-registered (topmost) rect containing the click wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    Field,
    CloseModal,
    ClearStart,
    ClearEnd,
    PrevMonth,
    NextMonth,
    Day(NaiveDate),
    ClearAll,
    Apply,
}

enum Side {
    Left,
    Right,
}

pub struct App {
    picker: RangePicker,
    settings: Settings,
    modal_open: bool,
    /// Keyboard position inside the calendars while the modal is open.
    cursor: NaiveDate,
    hits: Vec<(Rect, HitTarget)>,
    modal_area: Rect,
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

impl App {
    pub fn new(picker: RangePicker, settings: Settings) -> Self {
        let cursor = picker.today();
        App {
            picker,
            settings,
            modal_open: false,
            cursor,
            hits: Vec::new(),
            modal_area: Rect::default(),
        }
    }

    fn open_modal(&mut self) {
        self.modal_open = true;
        self.cursor = self.picker.state().start.unwrap_or(self.picker.today());
        // Scroll until the cursor's month is on screen. Backward scrolling
        // stops at the current month; a cursor stuck before it (a seeded
        // past start) falls back to today.
        while month_index(self.cursor) > month_index(self.picker.right_month()) {
            if !self.picker.navigate(NavDirection::Next) {
                break;
            }
        }
        while month_index(self.cursor) < month_index(self.picker.left_month()) {
            if !self.picker.navigate(NavDirection::Previous) {
                self.cursor = self.picker.today();
                break;
            }
        }
    }

    fn move_cursor(&mut self, delta_days: i64) {
        let Some(next) = self.cursor.checked_add_signed(Duration::days(delta_days)) else {
            return;
        };
        let target = month_index(next);
        if target < month_index(self.picker.left_month())
            && !self.picker.navigate(NavDirection::Previous)
        {
            // Already showing the current month; keep the cursor in place.
            return;
        }
        if target > month_index(self.picker.right_month()) {
            self.picker.navigate(NavDirection::Next);
        }
        self.cursor = next;
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if !self.modal_open {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => self.open_modal(),
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Esc => {
                self.modal_open = false;
            }
            KeyCode::Enter => {
                // Past-date clicks are silently rejected inside the picker.
                self.picker.click_day(self.cursor);
            }
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Char('n') => {
                if self.picker.navigate(NavDirection::Next) {
                    self.cursor = add_months(self.cursor, 1);
                }
            }
            KeyCode::Char('p') => {
                if self.picker.navigate(NavDirection::Previous) {
                    self.cursor = add_months(self.cursor, -1);
                }
            }
            KeyCode::Char('c') => {
                self.picker.clear_selection();
            }
            KeyCode::Char('s') => {
                self.picker.clear_start();
            }
            KeyCode::Char('e') => {
                self.picker.clear_end();
            }
            KeyCode::Char('a') => {
                if self.picker.can_apply() {
                    self.modal_open = false;
                }
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, column: u16, row: u16) {
        let pos = Position::new(column, row);
        let target = self
            .hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, target)| *target);
        if let Some(target) = target {
            self.activate(target);
        } else if self.modal_open && !self.modal_area.contains(pos) {
            // Outside-dismiss
            self.modal_open = false;
        }
    }

    fn activate(&mut self, target: HitTarget) {
        match target {
            HitTarget::Field => self.open_modal(),
            HitTarget::CloseModal => self.modal_open = false,
            HitTarget::ClearStart => {
                self.picker.clear_start();
            }
            HitTarget::ClearEnd => {
                self.picker.clear_end();
            }
            HitTarget::PrevMonth => {
                if self.picker.navigate(NavDirection::Previous) {
                    self.cursor = add_months(self.cursor, -1);
                }
            }
            HitTarget::NextMonth => {
                if self.picker.navigate(NavDirection::Next) {
                    self.cursor = add_months(self.cursor, 1);
                }
            }
            HitTarget::Day(date) => {
                if self.picker.click_day(date) {
                    self.cursor = date;
                }
            }
            HitTarget::ClearAll => {
                self.picker.clear_selection();
            }
            HitTarget::Apply => {
                if self.picker.can_apply() {
                    self.modal_open = false;
                }
            }
        }
    }

    // ── rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        self.hits.clear();
        let area = f.area();
        self.render_host(f, area);
        if self.modal_open {
            self.render_modal(f, area);
        }
    }

    fn render_host(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // duration field
                Constraint::Length(1), // key hints
                Constraint::Min(0),
            ])
            .split(area);

        let text = self.picker.display_text();
        let field_line = if text.is_empty() {
            Line::from(Span::styled(
                self.settings.field_placeholder.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(text)
        };
        let field = Paragraph::new(field_line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Storage duration "),
        );
        f.render_widget(field, chunks[0]);
        if !self.modal_open {
            self.hits.push((chunks[0], HitTarget::Field));
        }

        let hints = Paragraph::new(Line::from(Span::styled(
            "Enter/click = open picker   q = quit",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(hints, chunks[1]);
    }

    fn render_modal(&mut self, f: &mut Frame, area: Rect) {
        let modal = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        f.render_widget(Clear, modal);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Storage Durations ");
        let inner = block.inner(modal);
        f.render_widget(block, modal);
        self.modal_area = modal;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // note + close
                Constraint::Length(3), // endpoint summary boxes
                Constraint::Length(1), // spacer
                Constraint::Length(8), // calendars
                Constraint::Length(1), // warning / key hints
                Constraint::Length(1), // buttons
                Constraint::Min(0),
            ])
            .split(inner);

        self.render_note_row(f, chunks[0]);
        self.render_endpoint_boxes(f, chunks[1]);
        self.render_calendars(f, chunks[3]);
        self.render_status_row(f, chunks[4]);
        self.render_buttons(f, chunks[5]);
    }

    fn render_note_row(&mut self, f: &mut Frame, area: Rect) {
        let note = format!(
            "The storage must be booked for at least {} days.",
            self.picker.min_stay_days()
        );
        let pad = area.width.saturating_sub(note.len() as u16 + 3);
        let line = Line::from(vec![
            Span::styled(note, Style::default().fg(Color::DarkGray)),
            Span::raw(" ".repeat(pad as usize)),
            Span::styled("[x]", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let close = Rect::new(area.right().saturating_sub(3), area.y, 3, 1);
        self.hits.push((close, HitTarget::CloseModal));
    }

    fn render_endpoint_boxes(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let state = *self.picker.state();
        let phase = self.picker.phase();
        self.render_endpoint_box(
            f,
            chunks[0],
            " Start Date ",
            state.start,
            phase == Phase::Empty,
            HitTarget::ClearStart,
            "Select Start Date",
        );
        self.render_endpoint_box(
            f,
            chunks[1],
            " End Date ",
            state.end,
            phase == Phase::Partial,
            HitTarget::ClearEnd,
            "Select End Date",
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_endpoint_box(
        &mut self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        value: Option<NaiveDate>,
        active: bool,
        clear_target: HitTarget,
        empty_label: &str,
    ) {
        let border_style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let line = match value {
            Some(date) => {
                let text = format_display_date(date);
                let pad = inner.width.saturating_sub(text.len() as u16 + 3);
                let clear = Rect::new(inner.right().saturating_sub(3), inner.y, 3, 1);
                self.hits.push((clear, clear_target));
                Line::from(vec![
                    Span::raw(text),
                    Span::raw(" ".repeat(pad as usize)),
                    Span::styled("[x]", Style::default().fg(Color::DarkGray)),
                ])
            }
            None => Line::from(Span::styled(
                empty_label.to_string(),
                Style::default().add_modifier(Modifier::DIM),
            )),
        };
        f.render_widget(Paragraph::new(line), inner);
    }

    fn render_calendars(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(MONTH_WIDTH),
                Constraint::Length(8),
                Constraint::Length(MONTH_WIDTH),
                Constraint::Min(0),
            ])
            .split(area);

        let left = self.picker.left_month();
        let right = self.picker.right_month();
        self.render_month(f, chunks[1], left, Side::Left);
        self.render_month(f, chunks[3], right, Side::Right);
    }

    fn render_month(&mut self, f: &mut Frame, area: Rect, base: NaiveDate, side: Side) {
        let state = *self.picker.state();
        let today = self.picker.today();
        let cells = month_cells(base, today, state.start, state.end);
        let title = format!("{} {}", month_name(base.month()), base.year());
        let title_span = Span::styled(
            format!("{:^17}", title),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let chevron_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let nav_line = match side {
            Side::Left => {
                // The chevron disappears once the current month is reached.
                if state.left_offset > 0 {
                    self.hits
                        .push((Rect::new(area.x, area.y, 2, 1), HitTarget::PrevMonth));
                    Line::from(vec![
                        Span::styled("‹ ", chevron_style),
                        title_span,
                        Span::raw("  "),
                    ])
                } else {
                    Line::from(vec![Span::raw("  "), title_span, Span::raw("  ")])
                }
            }
            Side::Right => {
                self.hits.push((
                    Rect::new(area.x + MONTH_WIDTH - 2, area.y, 2, 1),
                    HitTarget::NextMonth,
                ));
                Line::from(vec![
                    Span::raw("  "),
                    title_span,
                    Span::styled(" ›", chevron_style),
                ])
            }
        };

        let mut lines: Vec<Line> = vec![nav_line, Line::from(WEEKDAY_LABELS.join(" "))];

        for (row, chunk) in cells.chunks(7).enumerate() {
            let mut spans = Vec::new();
            for (col, cell) in chunk.iter().enumerate() {
                match cell.date {
                    None => spans.push(Span::raw("   ")),
                    Some(date) => {
                        let style =
                            picker_day_style(cell, date == self.cursor, date == today);
                        spans.push(Span::styled(format!("{:2}", date.day()), style));
                        spans.push(Span::raw(" "));
                        let rect = Rect::new(
                            area.x + (col as u16) * 3,
                            area.y + 2 + row as u16,
                            2,
                            1,
                        );
                        self.hits.push((rect, HitTarget::Day(date)));
                    }
                }
            }
            lines.push(Line::from(spans));
        }

        let month_widget = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
        f.render_widget(month_widget, area);
    }

    fn render_status_row(&mut self, f: &mut Frame, area: Rect) {
        let line = if self.picker.phase() == Phase::Complete && !self.picker.is_valid_range() {
            Line::from(Span::styled(
                format!(
                    "The storage duration must be at least {} days.",
                    self.picker.min_stay_days()
                ),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                "Enter=pick  n/p=month  c=clear  s/e=endpoint  a=apply",
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_buttons(&mut self, f: &mut Frame, area: Rect) {
        let state = self.picker.state();
        let show_clear = state.start.is_some() || state.end.is_some();
        let clear = "[ Clear ]";
        let apply = "[ Apply ]";
        let apply_style = if self.picker.can_apply() {
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let used = apply.len() as u16 + if show_clear { clear.len() as u16 + 2 } else { 0 };
        let pad = area.width.saturating_sub(used);
        let mut spans = vec![Span::raw(" ".repeat(pad as usize))];
        let mut x = area.x + pad;
        if show_clear {
            self.hits
                .push((Rect::new(x, area.y, clear.len() as u16, 1), HitTarget::ClearAll));
            spans.push(Span::styled(clear, Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw("  "));
            x += clear.len() as u16 + 2;
        }
        self.hits
            .push((Rect::new(x, area.y, apply.len() as u16, 1), HitTarget::Apply));
        spans.push(Span::styled(apply, apply_style));

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Determines the ratatui `Style` for a day cell based on its tags.
fn picker_day_style(cell: &DayCell, is_cursor: bool, is_today: bool) -> Style {
    let mut style = if cell.is_range_start || cell.is_range_end {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else if cell.is_in_range {
        Style::default().fg(Color::Black).bg(RANGE_FILL)
    } else if cell.is_past {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if is_today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.handle_mouse(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
