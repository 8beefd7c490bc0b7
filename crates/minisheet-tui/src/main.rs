use anyhow::Result;
use clap::Parser;

use minisheet_core::Sheet;
use minisheet_tui::app::App;
use minisheet_tui::{Args, Controller};

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = minisheet_tui::logging::init(args.log_file.as_deref())?;

    let mut controller = Controller::new(Sheet::new(args.rows, args.cols), args.display_limit);
    if let Some(path) = &args.file {
        controller.open(path);
    }

    App::new(controller).run()
}
