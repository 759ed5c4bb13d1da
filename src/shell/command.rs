use std::str::FromStr;

use thiserror::Error;

/// Rejections of a command line before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("first path argument is not valid")]
    BadPath,
    #[error("missing {0}")]
    Missing(&'static str),
}

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect(String),
    Disconnect,
    Upload {
        source: String,
        target: Option<String>,
    },
    Download {
        source: String,
        target: Option<String>,
    },
    Dir,
    ChangeDir(String),
    MakeDir(String),
    RemoveDir(String),
    Delete(String),
    LocalChangeDir(Option<String>),
    Local(String),
    Help,
    Exit,
    Empty,
}

/// Splits a line into the upper-cased verb and its trimmed argument.
fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(' ') {
        Some((verb, param)) => (verb.to_uppercase(), param.trim_matches(' ')),
        None => (line.to_uppercase(), ""),
    }
}

/// Splits off the first path of `param`. A path starting with `"` runs to
/// the next `"`, which must end the line or be followed by a space.
fn split_path(param: &str) -> Result<(&str, &str), SyntaxError> {
    if let Some(quoted) = param.strip_prefix('"') {
        return match quoted.split_once('"') {
            None => Ok((quoted, "")),
            Some((path, "")) => Ok((path, "")),
            Some((path, rest)) if rest.starts_with(' ') => Ok((path, rest.trim_matches(' '))),
            Some(_) => Err(SyntaxError::BadPath),
        };
    }

    Ok(match param.split_once(' ') {
        Some((path, rest)) => (path, rest.trim_matches(' ')),
        None => (param, ""),
    })
}

fn paths(param: &str) -> Result<(String, Option<String>), SyntaxError> {
    if param.is_empty() {
        return Err(SyntaxError::Missing("source path"));
    }

    let (source, target) = split_path(param)?;
    if source.is_empty() {
        return Err(SyntaxError::Missing("source path"));
    }

    let target = match target.strip_prefix('"') {
        Some(quoted) => quoted.trim_end_matches('"'),
        None => target,
    };
    let target = (!target.is_empty()).then(|| target.to_owned());

    Ok((source.to_owned(), target))
}

fn required(param: &str, what: &'static str) -> Result<String, SyntaxError> {
    if param.is_empty() {
        Err(SyntaxError::Missing(what))
    } else {
        Ok(param.to_owned())
    }
}

impl FromStr for Command {
    type Err = SyntaxError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, param) = split_verb(line);

        let command = match verb.as_str() {
            "CONNECT" | "OPEN" => Self::Connect(required(param, "address")?),
            "DISCONNECT" | "DISCO" => Self::Disconnect,
            "UPLOAD" | "UP" => {
                let (source, target) = paths(param)?;
                Self::Upload { source, target }
            }
            "DOWNLOAD" => {
                let (source, target) = paths(param)?;
                Self::Download { source, target }
            }
            "DIR" => Self::Dir,
            "CD" => Self::ChangeDir(param.to_owned()),
            "MKDIR" | "MD" => Self::MakeDir(required(param, "directory name")?),
            "RMDIR" | "RD" => Self::RemoveDir(required(param, "directory name")?),
            "DELETE" | "DEL" => Self::Delete(required(param, "file name")?),
            "LCD" => Self::LocalChangeDir((!param.is_empty()).then(|| param.to_owned())),
            "HELP" | "?" => Self::Help,
            "EXIT" => Self::Exit,
            "" => Self::Empty,
            _ => match verb.strip_prefix('!') {
                // keep the original case of the local command
                Some(_) => {
                    let local = line.trim().trim_start_matches('!');
                    Self::Local(local.to_owned())
                }
                None => return Err(SyntaxError::Unknown(verb)),
            },
        };

        Ok(command)
    }
}
