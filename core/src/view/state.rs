use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prelude::DashboardError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Empty,
    Populated,
}

/// User commands accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Run,
    Reset,
}

impl Command {
    /// Both commands are legal from every state; the target depends only on
    /// the command.
    pub fn target(self) -> ViewState {
        match self {
            Command::Run => ViewState::Populated,
            Command::Reset => ViewState::Empty,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Empty => f.write_str("EMPTY"),
            ViewState::Populated => f.write_str("POPULATED"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Run => f.write_str("run"),
            Command::Reset => f.write_str("reset"),
        }
    }
}

impl FromStr for Command {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "run" => Ok(Command::Run),
            "reset" => Ok(Command::Reset),
            other => Err(DashboardError::InvalidArgument(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_fixed_targets() {
        assert_eq!(Command::Run.target(), ViewState::Populated);
        assert_eq!(Command::Reset.target(), ViewState::Empty);
        assert_eq!(ViewState::default(), ViewState::Empty);
    }

    #[test]
    fn commands_parse_case_insensitively() {
        assert_eq!(" RUN ".parse::<Command>().unwrap(), Command::Run);
        assert_eq!("reset".parse::<Command>().unwrap(), Command::Reset);
        assert!("refresh".parse::<Command>().is_err());
    }
}
