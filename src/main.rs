use clap::Parser;
use ::tpx::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{tfo, tpx, tts},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Tfo(_) => "tfo",
        Command::Tts(_) => "tts",
        Command::Tpx(_) => "tpx",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Tfo(args) => tfo::tfo(args)?,
        Command::Tts(args) => tts::tts(args)?,
        Command::Tpx(args) => tpx::tpx(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
