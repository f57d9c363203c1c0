use std::process::ExitCode;

use clap::Parser;
use fileTree::runner::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match runner::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
