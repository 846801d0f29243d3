//! rTimesheet main entrypoint.

use rtimesheet::errors::AppError;
use rtimesheet::run;
use rtimesheet::ui::messages::{error, warning};

fn main() {
    println!();
    match run() {
        Ok(()) => {}
        // refused workflow operation: not a fault, but not a success either
        Err(AppError::Refused(msg)) => {
            warning(msg);
            std::process::exit(2);
        }
        Err(e) => {
            error(format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
