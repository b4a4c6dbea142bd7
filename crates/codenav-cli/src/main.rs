//! Codenav CLI - Extract class structure from transcribed source code

mod cli;
mod colorizer;
mod json;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() once CLI flags and environment are known
    let mut app = cli::CodenavApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
