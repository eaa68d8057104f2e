use crate::data::Settings;
use crate::picker::{ExternalRange, RangePicker};
use crate::ui::picker_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;

/// Runs the interactive picker. `from`/`to` seed the initial range; after
/// the TUI exits, the last range the picker reported is printed to stdout
/// (as JSON with `json`).
pub fn run(from: Option<NaiveDate>, to: Option<NaiveDate>, json: bool) -> Result<()> {
    let settings = Settings::load()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let today = Local::now().date_naive();
    let mut picker = RangePicker::new(today, settings.min_stay_days);
    picker.seed(from, to);

    // The host subscription: remember the latest reported range so it can
    // be handed to the shell once the terminal is back to normal.
    let reported: Rc<RefCell<Option<ExternalRange>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&reported);
    picker.set_on_change(move |range| {
        *sink.borrow_mut() = Some(range.clone());
    });

    let mut terminal = setup_terminal()?;
    let mut app = App::new(picker, settings);
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    let reported = reported.borrow();
    if let Some(range) = reported.as_ref() {
        if json {
            println!("{}", serde_json::to_string(range)?);
        } else {
            match (&range.from, &range.to) {
                (Some(f), Some(t)) => println!("{f} → {t}"),
                (Some(f), None) => println!("{f}"),
                _ => {}
            }
        }
    }

    result
}
