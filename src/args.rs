use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // Directory that contains assets/.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[arg(long)]
    pub list_levels: bool,

    #[arg(long)]
    pub best_times: Option<String>,

    #[arg(long)]
    pub show_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListLevels,
    BestTimes(String),
    ShowLevel(String),
}

impl Args {
    pub fn command(&self) -> Result<Command> {
        let mut commands = Vec::new();
        if self.list_levels {
            commands.push(Command::ListLevels);
        }
        if let Some(level) = &self.best_times {
            commands.push(Command::BestTimes(level.clone()));
        }
        if let Some(level) = &self.show_level {
            commands.push(Command::ShowLevel(level.clone()));
        }
        if commands.len() > 1 {
            bail!("either --list-levels or --best-times or --show-level, but only one");
        }
        Ok(commands.pop().unwrap_or(Command::ListLevels))
    }
}
