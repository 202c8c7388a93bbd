//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use dart_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("dart: {err}");
        std::process::exit(1);
    }
}
