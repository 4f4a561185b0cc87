use crate::ui::picker_view::{App, run_app};
use crate::ui::{display_text, restore_terminal, setup_terminal};
use anyhow::{Context, Result};
use chrono::Local;
use rangepick::PickerConfig;

pub fn run(settings: PickerConfig) -> Result<()> {
    let today = Local::now().date_naive();
    // Built before the terminal switches modes so a bad config reports plainly
    let mut app = App::new(settings, None, today)?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    // Options toggled in the picker carry over to the next session
    app.settings
        .save()
        .context("failed to save settings to config.yaml")?;

    println!("{}", display_text(&app.selected_range()));
    result
}
