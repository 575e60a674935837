use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};
use eyre::Result;

use super::Cli;

/// Print a completion script for `scribe` to stdout.
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cli = Cli::command();
        let bin_name = cli.get_name().to_string();
        generate(self.shell, &mut cli, bin_name, &mut io::stdout().lock());
        Ok(())
    }
}
