mod cli;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Build {
            bundle,
            output,
            format,
            strategy,
            title,
        } => {
            commands::build::handle(&bundle, output.as_deref(), format, strategy, title)?;
        }

        Commands::Evolutions {
            bundle,
            species,
            form,
            strategy,
        } => {
            commands::evolutions::handle(&bundle, species, form, strategy)?;
        }

        Commands::Show { catalog, dex_key } => {
            commands::show::handle(&catalog, &dex_key)?;
        }

        Commands::Configure {
            data_dir,
            output_dir,
            format,
            strategy,
            show,
        } => {
            let update = commands::configure::ConfigUpdate {
                data_dir,
                output_dir,
                format,
                strategy,
            };
            commands::configure::handle(update, show)?;
        }
    }

    Ok(())
}
