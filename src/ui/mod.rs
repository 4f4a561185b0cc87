pub mod picker_view;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rangepick::DateRange;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// The one-line summary shown above the calendars.
pub(crate) fn display_text(range: &DateRange) -> String {
    const FMT: &str = "%d/%m/%Y";
    match (range.start(), range.end()) {
        (Some(s), Some(e)) => format!("{} - {}", s.format(FMT), e.format(FMT)),
        (Some(s), None) => format!("{} - Select end date", s.format(FMT)),
        _ => "Select date range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_display_text_empty() {
        assert_eq!(display_text(&DateRange::empty()), "Select date range");
    }

    #[test]
    fn test_display_text_partial() {
        assert_eq!(
            display_text(&DateRange::starting_at(d(2024, 3, 5))),
            "05/03/2024 - Select end date"
        );
    }

    #[test]
    fn test_display_text_complete() {
        let range = DateRange::new(d(2024, 3, 5), d(2024, 4, 1)).unwrap();
        assert_eq!(display_text(&range), "05/03/2024 - 01/04/2024");
    }
}
