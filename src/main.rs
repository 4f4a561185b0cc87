mod cmd;
mod logging;
mod ui;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use rangepick::data::persistence::set_data_dir;
use rangepick::{PickerConfig, WeekStart};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rangepick", about = "pick a date range from a terminal calendar")]
struct Cli {
    /// Path to the data directory containing config.yaml (default: ./config)
    #[arg(long, default_value = "./config", global = true)]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    options: PickerOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Command-line overrides for values stored in config.yaml.
#[derive(Args, Debug, Default)]
struct PickerOptions {
    /// First day of the week (name, three-letter abbreviation, or 0-6 from Sunday)
    #[arg(long, global = true)]
    week_start: Option<WeekStart>,

    /// Number of months shown side by side (at least 1)
    #[arg(long, global = true)]
    months: Option<usize>,

    /// Show a week-number column
    #[arg(long, global = true)]
    week_numbers: bool,

    /// Preview whole weeks while hovering
    #[arg(long, global = true)]
    highlight_week: bool,

    /// Snap committed ranges outward to week boundaries
    #[arg(long, global = true)]
    snap_to_week: bool,
}

impl PickerOptions {
    /// Flags only switch options on; absent flags keep the file value.
    fn apply(&self, config: &mut PickerConfig) {
        if let Some(week_start) = self.week_start {
            config.week_start = week_start;
        }
        if let Some(months) = self.months {
            config.number_of_months = months;
        }
        config.show_week_numbers |= self.week_numbers;
        config.highlight_full_week_on_hover |= self.highlight_week;
        config.default_to_week_start_and_end_dates |= self.snap_to_week;
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write config.yaml with default settings (command-line options applied)
    Init,
    /// Print the visible month grids
    Grid {
        /// First visible month (YYYY-MM); defaults to the start month or today
        #[arg(long)]
        month: Option<String>,
        /// Selected range start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Selected range end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Day treated as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Click the given days in order and report the resulting range
    Select {
        /// Days to click (YYYY-MM-DD)
        #[arg(required = true)]
        days: Vec<NaiveDate>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Resolve data_dir to an absolute path so file I/O is independent of
    // later directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    set_data_dir(data_dir.clone());

    // `init` writes fresh defaults rather than re-saving whatever is on disk.
    let mut settings = if matches!(cli.command, Some(Commands::Init)) {
        PickerConfig::default()
    } else {
        PickerConfig::load()
            .with_context(|| format!("failed to load settings from {}", data_dir.display()))?
    };
    cli.options.apply(&mut settings);
    tracing::debug!(?settings, data_dir = %data_dir.display(), "settings resolved");

    match cli.command {
        None => cmd::root::run(settings),
        Some(Commands::Init) => cmd::init::run(&settings),
        Some(Commands::Grid {
            month,
            start,
            end,
            today,
            json,
        }) => cmd::grid::run(
            &settings,
            &cmd::grid::GridArgs {
                month,
                start,
                end,
                today,
                json,
            },
        ),
        Some(Commands::Select { days, json }) => cmd::select::run(&settings, &days, json),
    }
}
