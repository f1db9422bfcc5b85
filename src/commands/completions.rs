//! Shell completion generation

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use subseek::cli::Cli;

pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "subseek", &mut std::io::stdout());
    Ok(())
}
