use clap::Parser;
use miette::Result;
use swatch::cli::{init_logging, Cli, Commands};
use swatch::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let printer = Printer::new();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Resolve(args) => swatch::cli::resolve::run(args, config, &printer)?,
        Commands::Check(args) => swatch::cli::check::run(args, config, &printer)?,
        Commands::Completions(args) => swatch::cli::completions::run(args)?,
    }

    Ok(())
}
