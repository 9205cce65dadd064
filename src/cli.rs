use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

use crate::routes::Route;

const USAGE: &str = "usage: triagex [--config <path>] [assess|contact]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Assess,
    Contact,
}

impl Command {
    pub fn entry_route(self) -> Route {
        match self {
            Command::Assess => Route::Input,
            Command::Contact => Route::Contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

pub fn cli_options_from_args() -> Result<CliOptions> {
    parse_cli_options(env::args().skip(1))
}

pub fn parse_cli_options<I>(mut args: I) -> Result<CliOptions>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config. {USAGE}"))?;
                options.config_path = Some(PathBuf::from(value));
            }
            "assess" | "contact" if command.is_some() => {
                return Err(anyhow!("expected at most one command. {USAGE}"));
            }
            "assess" => command = Some(Command::Assess),
            "contact" => command = Some(Command::Contact),
            other => {
                return Err(anyhow!("unknown argument: {other}. {USAGE}"));
            }
        }
    }

    options.command = command.unwrap_or_default();
    Ok(options)
}
