//! Line Protocol
//!
//! One request per line: a case-insensitive verb followed by
//! whitespace-separated arguments.
//!
//! ```text
//! PING
//! DISTANCE <word> [k]
//! ANALOGY <word1> <word2> <word3> [k]
//! STATS
//! ```

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::vector::WordDistance;

/// Parsed request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Health check
    Ping,

    /// Nearest neighbours of a word
    Distance { word: String, limit: Option<usize> },

    /// Nearest neighbours of `word2 - word1 + word3`
    Analogy {
        word1: String,
        word2: String,
        word3: String,
        limit: Option<usize>,
    },

    /// Table and server statistics
    Stats,
}

impl Command {
    /// Parse a request line
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(verb) = parts.first() else {
            return Err(Error::protocol("empty command"));
        };

        match verb.to_ascii_uppercase().as_str() {
            "PING" => Ok(Command::Ping),

            "STATS" => Ok(Command::Stats),

            "DISTANCE" => match parts.len() {
                2 | 3 => Ok(Command::Distance {
                    word: parts[1].to_string(),
                    limit: parse_limit(parts.get(2))?,
                }),
                _ => Err(Error::protocol("usage: DISTANCE <word> [k]")),
            },

            "ANALOGY" => match parts.len() {
                4 | 5 => Ok(Command::Analogy {
                    word1: parts[1].to_string(),
                    word2: parts[2].to_string(),
                    word3: parts[3].to_string(),
                    limit: parse_limit(parts.get(4))?,
                }),
                _ => Err(Error::protocol(
                    "usage: ANALOGY <word1> <word2> <word3> [k]",
                )),
            },

            other => Err(Error::protocol(format!("unknown command: {}", other))),
        }
    }

    /// Verb used for metrics and logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::Distance { .. } => "DISTANCE",
            Command::Analogy { .. } => "ANALOGY",
            Command::Stats => "STATS",
        }
    }
}

fn parse_limit(arg: Option<&&str>) -> Result<Option<usize>> {
    arg.map(|s| {
        s.parse::<usize>()
            .map_err(|_| Error::protocol(format!("invalid limit: {}", s)))
    })
    .transpose()
}

/// Reply to a request
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Pong,
    Results(Vec<WordDistance>),
    Stats(String),
    Error(String),
}

impl Response {
    /// Render as protocol lines
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Response::Pong => vec!["PONG".to_string()],
            Response::Results(results) => {
                let mut lines = Vec::with_capacity(results.len() + 1);
                lines.push(format!("OK {}", results.len()));
                lines.extend(
                    results
                        .iter()
                        .map(|r| format!("{} {}", escape_line_breaks(&r.word), r.score)),
                );
                lines
            }
            Response::Stats(summary) => vec!["OK 1".to_string(), summary.clone()],
            Response::Error(msg) => vec![format!("ERR {}", msg)],
        }
    }
}

/// Words may hold interior line breaks; keep each result on one line.
fn escape_line_breaks(word: &str) -> Cow<'_, str> {
    if !word.contains(['\n', '\r']) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(word.replace('\n', "\\n").replace('\r', "\\r"))
}

impl From<Error> for Response {
    fn from(e: Error) -> Self {
        Response::Error(e.to_string())
    }
}
