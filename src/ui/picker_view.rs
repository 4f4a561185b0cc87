use crate::ui::display_text;
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use rangepick::calc::calendar_math::{add_months, month_abbrev};
use rangepick::{DateRange, DateRangePicker, DayCell, MonthGrid, PickerConfig, QuickJumpMode};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::Stdout;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration as StdDuration;

// Range cell colors
const RANGE_COLOR: Color = Color::Indexed(91); // purple
const RANGE_FILL: Color = Color::Indexed(183); // light purple

const DAY_COLUMNS_WIDTH: u16 = 21;
const WEEK_NUMBER_WIDTH: u16 = 3;
const GAP_WIDTH: u16 = 4;
const JUMP_COLUMNS: usize = 3;

pub struct App {
    picker: DateRangePicker,
    pub settings: PickerConfig,
    today: NaiveDate,
    /// Keyboard cursor. While `hovering` it is also the picker's hover day.
    cursor: NaiveDate,
    hovering: bool,
    /// Highlighted entry of the open quick-jump grid.
    jump_cursor: usize,
    commit_tx: Sender<DateRange>,
    commit_rx: Receiver<DateRange>,
    /// Result of the last action (message, color). Cleared on next keypress.
    status: Option<(String, Color)>,
}

impl App {
    pub fn new(
        settings: PickerConfig,
        initial: Option<DateRange>,
        today: NaiveDate,
    ) -> Result<Self> {
        let (commit_tx, commit_rx) = mpsc::channel();
        let picker = build_picker(&settings, initial, today, &commit_tx)?;
        let cursor = initial.and_then(|r| r.start()).unwrap_or(today);
        Ok(App {
            picker,
            settings,
            today,
            cursor,
            hovering: false,
            jump_cursor: 0,
            commit_tx,
            commit_rx,
            status: None,
        })
    }

    /// The range as the host should see it, week snapping applied.
    pub fn selected_range(&self) -> DateRange {
        self.picker.effective_range()
    }

    /// Rebuilds the picker after an option change, keeping selection and view.
    fn apply_settings(&mut self) {
        let anchor = self.picker.nav_state().anchor_month;
        let range = self.picker.selection().range;
        match build_picker(&self.settings, Some(range), self.today, &self.commit_tx)
            .and_then(|picker| jump_to(picker, anchor))
        {
            Ok(picker) => {
                self.picker = picker;
                if self.hovering {
                    self.picker.on_day_hover(self.cursor);
                }
                tracing::info!(settings = ?self.settings, "options changed");
            }
            Err(e) => self.status = Some((format!("Invalid settings: {e}"), Color::Red)),
        }
    }

    fn hover_cursor(&mut self) {
        self.picker.on_day_hover(self.cursor);
        self.hovering = true;
    }

    fn move_cursor(&mut self, days: i64) {
        if let Some(d) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = d;
        }
        self.follow_cursor();
        self.hover_cursor();
    }

    /// Navigates until the cursor's month is on screen, or navigation can go no further.
    fn follow_cursor(&mut self) {
        loop {
            let before = self.picker.nav_state().anchor_month;
            let past_end = i32::try_from(self.settings.number_of_months)
                .ok()
                .and_then(|n| add_months(before, n));
            let after = if self.cursor < before {
                self.picker.on_prev_month().anchor_month
            } else if past_end.is_some_and(|end| self.cursor >= end) {
                self.picker.on_next_month().anchor_month
            } else {
                break;
            };
            if after == before {
                break;
            }
        }
    }

    fn shift_months(&mut self, months: i32) {
        if months < 0 {
            self.picker.on_prev_month();
        } else {
            self.picker.on_next_month();
        }
        if let Some(cursor) = add_months(self.cursor, months) {
            self.cursor = cursor;
        }
        self.follow_cursor();
        if self.hovering {
            self.hover_cursor();
        }
    }

    fn click(&mut self) {
        self.picker.on_day_click(self.cursor);
        if self.hovering {
            self.picker.on_day_hover(self.cursor);
        }
        while let Ok(range) = self.commit_rx.try_recv() {
            let days = range.duration_days().unwrap_or(0);
            self.status = Some((
                format!("Selected {} ({days} days)", display_text(&range)),
                Color::Green,
            ));
        }
    }

    fn open_quick_jump(&mut self, mode: QuickJumpMode) {
        let nav = self.picker.on_toggle_quick_jump(mode);
        self.jump_cursor = match nav.quick_jump {
            QuickJumpMode::Month => nav.anchor_month.month0() as usize,
            QuickJumpMode::Year => self
                .picker
                .navigation()
                .year_choices()
                .iter()
                .position(|y| *y == nav.anchor_month.year())
                .unwrap_or(0),
            QuickJumpMode::None => 0,
        };
    }

    fn pick_jump(&mut self, mode: QuickJumpMode) {
        let result = match mode {
            QuickJumpMode::Month => self.picker.on_pick_month(self.jump_cursor as u32 + 1),
            QuickJumpMode::Year => {
                let years = self.picker.navigation().year_choices();
                match years.get(self.jump_cursor) {
                    Some(year) => self.picker.on_pick_year(*year),
                    None => return,
                }
            }
            QuickJumpMode::None => return,
        };
        match result {
            Ok(nav) => {
                if nav.quick_jump == QuickJumpMode::Month {
                    self.jump_cursor = nav.anchor_month.month0() as usize;
                }
                self.cursor = nav.anchor_month;
                if self.hovering {
                    self.hover_cursor();
                }
            }
            Err(e) => self.status = Some((e.to_string(), Color::Red)),
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status = None;

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.picker.nav_state().quick_jump {
            QuickJumpMode::None => self.handle_calendar_key(code),
            mode => self.handle_quick_jump_key(mode, code),
        }
    }

    fn handle_calendar_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Char(' ') | KeyCode::Enter => self.click(),
            KeyCode::Esc => {
                self.picker.on_hover_leave();
                self.hovering = false;
            }
            KeyCode::Char('n') => self.shift_months(1),
            KeyCode::Char('p') => self.shift_months(-1),
            KeyCode::Char('m') => self.open_quick_jump(QuickJumpMode::Month),
            KeyCode::Char('y') => self.open_quick_jump(QuickJumpMode::Year),
            KeyCode::Char('g') => {
                self.cursor = self.today;
                self.follow_cursor();
            }
            KeyCode::Char('c') => {
                self.picker.on_clear();
                self.hovering = false;
                self.status = Some(("Selection cleared".to_string(), Color::Yellow));
            }
            KeyCode::Char('w') => {
                self.settings.show_week_numbers = !self.settings.show_week_numbers;
                self.apply_settings();
            }
            KeyCode::Char('s') => {
                self.settings.week_start = self.settings.week_start.next();
                self.apply_settings();
            }
            KeyCode::Char('t') => {
                self.settings.number_of_months =
                    if self.settings.number_of_months == 2 { 3 } else { 2 };
                self.apply_settings();
            }
            KeyCode::Char('h') => {
                self.settings.highlight_full_week_on_hover =
                    !self.settings.highlight_full_week_on_hover;
                self.apply_settings();
            }
            KeyCode::Char('e') => {
                self.settings.default_to_week_start_and_end_dates =
                    !self.settings.default_to_week_start_and_end_dates;
                self.apply_settings();
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn handle_quick_jump_key(&mut self, mode: QuickJumpMode, code: KeyCode) -> bool {
        let last = rangepick::picker::QUICK_JUMP_CHOICES - 1;
        match code {
            KeyCode::Left => self.jump_cursor = self.jump_cursor.saturating_sub(1),
            KeyCode::Right => self.jump_cursor = (self.jump_cursor + 1).min(last),
            KeyCode::Up => self.jump_cursor = self.jump_cursor.saturating_sub(JUMP_COLUMNS),
            KeyCode::Down => {
                if self.jump_cursor + JUMP_COLUMNS <= last {
                    self.jump_cursor += JUMP_COLUMNS;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.pick_jump(mode),
            KeyCode::Char('m') => self.open_quick_jump(QuickJumpMode::Month),
            KeyCode::Char('y') => self.open_quick_jump(QuickJumpMode::Year),
            KeyCode::Esc => {
                self.picker.on_toggle_quick_jump(mode);
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // selected range summary
                Constraint::Min(10),   // calendars or quick-jump grid (title + 2 header + 6 weeks)
                Constraint::Length(1), // status
                Constraint::Length(2), // help
            ])
            .split(f.area());

        self.render_summary(f, chunks[0]);
        match self.picker.nav_state().quick_jump {
            QuickJumpMode::None => self.render_calendars(f, chunks[1]),
            mode => self.render_quick_jump(f, chunks[1], mode),
        }
        if let Some((msg, color)) = &self.status {
            let p = Paragraph::new(Span::styled(msg.clone(), Style::default().fg(*color)));
            f.render_widget(p, chunks[2]);
        }
        self.render_help(f, chunks[3]);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let range = self.selected_range();
        let mut spans = vec![Span::styled(
            display_text(&range),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(days) = range.duration_days() {
            spans.push(Span::styled(
                format!("  ({days} days)"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let p = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(" Date Range "));
        f.render_widget(p, area);
    }

    fn render_calendars(&self, f: &mut Frame, area: Rect) {
        let grids = match self.picker.visible_grids(self.today) {
            Ok(g) => g,
            Err(e) => {
                f.render_widget(Paragraph::new(format!("Calendar error: {e}")), area);
                return;
            }
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        let title = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.picker.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(title), rows[0]);

        // Fixed-width month columns separated by gaps, Min(0) absorbs leftover
        let width = month_width(self.settings.show_week_numbers);
        let mut constraints = Vec::with_capacity(grids.len() * 2 + 1);
        for _ in &grids {
            constraints.push(Constraint::Length(width));
            constraints.push(Constraint::Length(GAP_WIDTH));
        }
        constraints.push(Constraint::Min(0));
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[1]);

        for (i, grid) in grids.iter().enumerate() {
            let widget = Paragraph::new(self.month_lines(grid))
                .block(Block::default().borders(Borders::NONE));
            f.render_widget(widget, columns[i * 2]);
        }
    }

    fn month_lines(&self, grid: &MonthGrid) -> Vec<Line<'static>> {
        let width = month_width(self.settings.show_week_numbers) as usize;
        let mut header = String::new();
        if self.settings.show_week_numbers {
            header.push_str("Wk ");
        }
        header.push_str(&self.settings.week_start.header_labels().join(" "));

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:^width$}", grid.view.title()),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from(Span::styled(header, Style::default().fg(Color::DarkGray))),
        ];

        for week in &grid.weeks {
            let mut spans = Vec::with_capacity(15);
            if let Some(n) = week.week_number {
                spans.push(Span::styled(
                    format!("{n:>2} "),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            for cell in &week.days {
                if !DateRangePicker::is_interactive(cell) {
                    spans.push(Span::raw("   "));
                    continue;
                }
                let style = calendar_day_style(cell, cell.date == self.cursor);
                spans.push(Span::styled(format!("{:2}", cell.date.day()), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn render_quick_jump(&self, f: &mut Frame, area: Rect, mode: QuickJumpMode) {
        let nav = self.picker.navigation();
        let anchor = nav.anchor_month();
        let (labels, current, title): (Vec<String>, Option<usize>, &str) = match mode {
            QuickJumpMode::Year => {
                let years = nav.year_choices();
                let current = years.iter().position(|y| *y == anchor.year());
                (
                    years.iter().map(|y| y.to_string()).collect(),
                    current,
                    " Pick a year  (←→↑↓=move  Enter=pick  Esc=back) ",
                )
            }
            _ => (
                nav.month_choices()
                    .iter()
                    .map(|m| month_abbrev(m.month()).to_string())
                    .collect(),
                Some(anchor.month0() as usize),
                " Pick a month  (←→↑↓=move  Enter=pick  Esc=back) ",
            ),
        };

        let lines: Vec<Line> = labels
            .chunks(JUMP_COLUMNS)
            .enumerate()
            .map(|(row, chunk)| {
                let spans: Vec<Span> = chunk
                    .iter()
                    .enumerate()
                    .map(|(col, label)| {
                        let idx = row * JUMP_COLUMNS + col;
                        Span::styled(
                            format!(" {label:^6} "),
                            jump_choice_style(idx == self.jump_cursor, Some(idx) == current),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let s = &self.settings;
        let keys = concat!(
            "←→↑↓=move  Space/Enter=pick  Esc=leave  ",
            "n/p=month  m/y=jump  g=today  c=clear  q=quit"
        );
        let options = format!(
            concat!(
                "w=week numbers [{}]  s=week start [{}]  t=months [{}]  ",
                "h=highlight week [{}]  e=snap to week [{}]"
            ),
            on_off(s.show_week_numbers),
            s.week_start,
            s.number_of_months,
            on_off(s.highlight_full_week_on_hover),
            on_off(s.default_to_week_start_and_end_dates),
        );
        let hints = Paragraph::new(vec![
            Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(options, Style::default().fg(Color::DarkGray))),
        ]);
        f.render_widget(hints, area);
    }
}

fn build_picker(
    settings: &PickerConfig,
    initial: Option<DateRange>,
    today: NaiveDate,
    commit_tx: &Sender<DateRange>,
) -> Result<DateRangePicker> {
    let mut picker = DateRangePicker::initialize(initial, settings.clone(), today)?;
    let tx = commit_tx.clone();
    picker.on_range_committed(move |range| {
        let _ = tx.send(*range);
    });
    Ok(picker)
}

/// Points a freshly built picker at `anchor`'s month.
fn jump_to(mut picker: DateRangePicker, anchor: NaiveDate) -> Result<DateRangePicker> {
    picker.on_pick_year(anchor.year())?;
    picker.on_pick_month(anchor.month())?;
    Ok(picker)
}

fn month_width(show_week_numbers: bool) -> u16 {
    if show_week_numbers {
        DAY_COLUMNS_WIDTH + WEEK_NUMBER_WIDTH
    } else {
        DAY_COLUMNS_WIDTH
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Cell styling ──────────────────────────────────────────────────────────────

/// Determines the ratatui `Style` for a day cell from its flags.
pub(crate) fn calendar_day_style(cell: &DayCell, is_cursor: bool) -> Style {
    let is_endpoint = cell.is_range_start || cell.is_range_end;
    if is_cursor {
        let bg = if is_endpoint { RANGE_COLOR } else { Color::White };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if is_endpoint {
        let mut s = Style::default()
            .fg(Color::White)
            .bg(RANGE_COLOR)
            .add_modifier(Modifier::BOLD);
        if cell.is_today {
            s = s.add_modifier(Modifier::UNDERLINED);
        }
        s
    } else if cell.is_in_range {
        let mut s = Style::default().fg(Color::Black).bg(RANGE_FILL);
        if cell.is_today {
            s = s.add_modifier(Modifier::UNDERLINED);
        }
        s
    } else if cell.is_in_preview {
        Style::default()
            .fg(RANGE_FILL)
            .add_modifier(Modifier::UNDERLINED)
    } else if cell.is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn jump_choice_style(is_cursor: bool, is_current: bool) -> Style {
    if is_cursor {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if is_current {
        Style::default().fg(Color::White).bg(RANGE_COLOR)
    } else {
        Style::default()
    }
}
