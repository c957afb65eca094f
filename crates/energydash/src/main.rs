//! EnergyDash: energy consumption dashboard for sorting algorithms.

use energydash_cli::ui::print_error;
use energydash_lib::{app, config, errors};

fn main() {
    // Parse CLI args and run; logging is set up per mode inside `run`
    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        print_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
