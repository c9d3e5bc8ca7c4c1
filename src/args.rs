use std::path::PathBuf;

use clap::Parser;

/// The command line arguments for girlink.
#[derive(Parser)]
#[command(name = "girlink", bin_name = "girlink", version)]
pub struct Cli {
    /// The GIR file describing the namespace to process.
    pub input: PathBuf,

    /// The path of the generated declaration file.
    pub output: PathBuf,

    /// Pins the crate UUID instead of minting a fresh one per run.
    #[clap(long)]
    pub uuid: Option<String>,
}
