use std::process::ExitCode;

use clap::Parser;

use crate::cli::App;

mod cli;
mod config;
mod logging;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    match cli::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    eprintln!("error: {err:#}");

    let syntax = err.chain().find_map(|e| match e.downcast_ref::<jenkins_fetch::Error>() {
        Some(jenkins_fetch::Error::Syntax(syntax)) => Some(syntax),
        _ => None,
    });
    if let Some(syntax) = syntax {
        eprintln!("near offset {}: {}", syntax.offset, syntax.excerpt(40));
    }
}
