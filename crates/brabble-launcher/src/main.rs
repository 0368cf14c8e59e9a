//! Thin binary entry point: collects the raw arguments, runs the launcher, and exits.

use brabble_launcher::cli::LaunchRequest;
use brabble_launcher::report;

fn main() {
    let request = LaunchRequest::from_env();

    let code = match brabble_launcher::run_in_current_dir(&request) {
        Ok(code) => code,
        Err(e) => {
            report::error(&e);
            1
        }
    };
    std::process::exit(code);
}
