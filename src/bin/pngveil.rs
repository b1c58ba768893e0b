use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pngveil::cli::{Cli, Mode};
use pngveil::error::Error;
use pngveil::pipeline;

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let mode = cli.mode()?;
    let output_path = cli.resolve_output(&mode);

    let cover = fs::read(&cli.input)
        .map_err(|e| Error::NotFound(format!("{}: {e}", cli.input.display())))?;

    match &mode {
        Mode::Encode { payload } => {
            let carrier = pipeline::encode_bytes(&cover, payload.as_bytes())?;
            fs::write(&output_path, &carrier)?;
        }
        Mode::Decode { .. } => {
            let mut payload = pipeline::decode_bytes(&cover)?;
            payload.extend_from_slice(b"\n");
            fs::write(&output_path, &payload)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
