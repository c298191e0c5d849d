//! umlbox CLI - Draw Java classes as text UML boxes

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    // Logging is initialized by the app once the flags are known
    let cli_args = cli::Cli::parse();

    let app = cli::UmlboxApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
