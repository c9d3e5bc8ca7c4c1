use std::process::ExitCode;

use clap::Parser;
use codespan_reporting::{
    files::SimpleFiles,
    term::{self, termcolor::StandardStream},
};

use crate::codegen::Codegen;

pub mod args;
pub mod codegen;
pub mod diagnostic;
pub mod error;
pub mod gir;
pub mod span;

fn main() -> ExitCode {
    let cli = args::Cli::parse();

    let codegen = Codegen::new(cli.input.clone(), cli.output, cli.uuid);
    match codegen.generate() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Parse errors carry spans into the input document, which the
            // parser attributes to file 0.
            let mut files = SimpleFiles::new();
            let src = std::fs::read_to_string(&cli.input).unwrap_or_default();
            files.add(cli.input.display().to_string(), src);

            let config = diagnostic::config();
            let mut stderr = StandardStream::stderr(term::termcolor::ColorChoice::Auto);
            term::emit(&mut stderr, &config, &files, &err.as_diagnostic()).unwrap();
            ExitCode::FAILURE
        }
    }
}
