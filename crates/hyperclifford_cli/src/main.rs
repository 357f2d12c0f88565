//! Command-line tool for inspecting Clifford algebra Cayley tables.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;

    let args = cli::Args::parse();
    cli::exec(args.subcommand)
}
