use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tylo_cli::args::CliArgs;
use tylo_cli::driver;

fn main() -> Result<()> {
    tylo::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
