use clap::Parser;

mod cli;
mod commands;
mod error;

use cli::{CliArgs, Commands};
pub use error::CliError;

pub type CliResult<T> = std::result::Result<T, CliError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();

    match args.command {
        Commands::Encode(args) => args.run(),
        Commands::Fill(args) => args.run(),
    }
}
