//! Line commands read from stdin.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use dashboard_core::{Msg, ProfileField, ViewMode, Visibility};
use dashboard_logging::dash_warn;
use thiserror::Error;

use super::app::AppInput;

pub const HELP: &str = "commands: refresh | hide | show | view <applications|profile> | edit | set <name|company|experience|skills> <value> | save | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Hide,
    Show,
    View(ViewMode),
    Edit,
    Set { field: ProfileField, value: String },
    Save,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown view `{0}`")]
    UnknownView(String),
    #[error("unknown profile field `{0}`")]
    UnknownField(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Command::Refresh,
        "hide" => Command::Hide,
        "show" => Command::Show,
        "view" => match rest.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::MissingArgument("view")),
            "applications" | "apps" => Command::View(ViewMode::Applications),
            "profile" => Command::View(ViewMode::Profile),
            other => return Err(CommandError::UnknownView(other.to_string())),
        },
        "edit" => Command::Edit,
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err(CommandError::MissingArgument("set"));
            }
            let field = ProfileField::parse(name)
                .ok_or_else(|| CommandError::UnknownField(name.to_string()))?;
            Command::Set {
                field,
                value: value.to_string(),
            }
        }
        "save" => Command::Save,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

impl Command {
    /// The message this command feeds into the controller. `Help` and `Quit` are handled locally.
    pub fn to_msg(&self) -> Option<Msg> {
        match self {
            Command::Refresh => Some(Msg::LoadRequested),
            Command::Hide => Some(Msg::VisibilityChanged(Visibility::Hidden)),
            Command::Show => Some(Msg::VisibilityChanged(Visibility::Visible)),
            Command::View(mode) => Some(Msg::ViewSelected(*mode)),
            Command::Edit => Some(Msg::ProfileEditOpened),
            Command::Set { field, value } => Some(Msg::ProfileFieldEdited {
                field: *field,
                value: value.clone(),
            }),
            Command::Save => Some(Msg::ProfileSaveClicked),
            Command::Help | Command::Quit => None,
        }
    }
}

/// Reads commands until EOF or `quit`, then asks the app to shut down.
pub fn spawn_command_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Help)) => eprintln!("{HELP}"),
                Ok(Some(command)) => {
                    if let Some(msg) = command.to_msg() {
                        if input_tx.send(AppInput::Msg(msg)).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    dash_warn!("Rejected command {:?}: {}", line, err);
                    eprintln!("{err}\n{HELP}");
                }
            }
        }
        let _ = input_tx.send(AppInput::Quit);
    });
}
