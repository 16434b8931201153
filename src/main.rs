// Reminder Recurrence
// Command line entry point

mod cli;

use clap::Parser;

fn main() {
    env_logger::init();

    let cli = cli::Cli::parse();
    log::debug!("Running {:?}", cli.command);

    if let Err(e) = cli.run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
