//! Line-oriented host scripts.
//!
//! ```text
//! # vertical win for A
//! play 0,1,0,1,0,1,0
//! expect read winner = 1
//! read cell 3 0
//! ```
//!
//! Commands: `reset [ticks]`, `left`, `right`, `drop`, `idle [ticks]`,
//! `play <col>[,<col>...]`, `read cell <row> <col>`, `read column`,
//! `read winner`, `expect read ... = <value>`, `board`.

use crate::debug_bus::QueryCommand;
use crate::error::ScriptError;
use crate::game::{COLS, ROWS};
use crate::input::Actuation;
use crate::machine::Event;

use super::driver::HostDriver;

/// Reset length used when `reset` has no argument.
const DEFAULT_RESET_TICKS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Reset(u32),
    Actuate(Actuation),
    Idle(u32),
    Play(Vec<usize>),
    Read(QueryCommand),
    Expect { query: QueryCommand, value: u8 },
    Board,
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        lines.push(ScriptLine {
            line,
            command: parse_command(content, line)?,
        });
    }
    Ok(lines)
}

/// Parse a single non-empty command line.
pub fn parse_command(input: &str, line: usize) -> Result<ScriptCommand, ScriptError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let bad = |message: String| ScriptError::BadArgument { line, message };

    match parts.as_slice() {
        ["reset"] => Ok(ScriptCommand::Reset(DEFAULT_RESET_TICKS)),
        ["reset", n] => Ok(ScriptCommand::Reset(parse_number(n, "tick count", line)?)),
        ["left"] => Ok(ScriptCommand::Actuate(Actuation::MoveLeft)),
        ["right"] => Ok(ScriptCommand::Actuate(Actuation::MoveRight)),
        ["drop"] => Ok(ScriptCommand::Actuate(Actuation::Drop)),
        ["idle"] => Ok(ScriptCommand::Idle(1)),
        ["idle", n] => Ok(ScriptCommand::Idle(parse_number(n, "tick count", line)?)),
        ["play", cols @ ..] if !cols.is_empty() => {
            parse_columns(&cols.concat(), line).map(ScriptCommand::Play)
        }
        ["read", rest @ ..] => parse_query(rest, line).map(ScriptCommand::Read),
        ["expect", "read", rest @ ..] => {
            let Some(eq) = rest.iter().position(|p| *p == "=") else {
                return Err(bad("expect needs '= <value>'".into()));
            };
            let query = parse_query(&rest[..eq], line)?;
            let value = match &rest[eq + 1..] {
                [value] => parse_number(value, "expected value", line)?,
                _ => return Err(bad("expect needs exactly one value".into())),
            };
            Ok(ScriptCommand::Expect { query, value })
        }
        ["board"] => Ok(ScriptCommand::Board),
        [command, ..] => Err(ScriptError::UnknownCommand {
            line,
            command: command.to_string(),
        }),
        [] => Err(bad("empty command".into())),
    }
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str, line: usize) -> Result<T, ScriptError> {
    s.parse().map_err(|_| ScriptError::BadArgument {
        line,
        message: format!("invalid {what} '{s}'"),
    })
}

fn parse_index(s: &str, what: &str, limit: usize, line: usize) -> Result<usize, ScriptError> {
    let value: usize = parse_number(s, what, line)?;
    if value >= limit {
        return Err(ScriptError::BadArgument {
            line,
            message: format!("{what} {value} out of range 0..{limit}"),
        });
    }
    Ok(value)
}

fn parse_columns(list: &str, line: usize) -> Result<Vec<usize>, ScriptError> {
    list.split(',')
        .map(|c| parse_index(c.trim(), "column", COLS, line))
        .collect()
}

fn parse_query(parts: &[&str], line: usize) -> Result<QueryCommand, ScriptError> {
    match parts {
        ["cell", row, col] => Ok(QueryCommand::ReadBoardCell {
            row: parse_index(row, "row", ROWS, line)?,
            col: parse_index(col, "column", COLS, line)?,
        }),
        ["column"] => Ok(QueryCommand::ReadCurrentColumn),
        ["winner"] => Ok(QueryCommand::ReadWinner),
        _ => Err(ScriptError::BadArgument {
            line,
            message: format!("unknown query '{}'", parts.join(" ")),
        }),
    }
}

fn describe_query(query: QueryCommand) -> String {
    match query {
        QueryCommand::ReadBoardCell { row, col } => format!("cell {row} {col}"),
        QueryCommand::ReadCurrentColumn => "column".to_string(),
        QueryCommand::ReadWinner => "winner".to_string(),
    }
}

/// Human-readable line for an event.
pub fn describe_event(event: &Event) -> String {
    match event {
        Event::Ready => "ready".to_string(),
        Event::CursorMoved { column } => format!("cursor at column {column}"),
        Event::PiecePlaced {
            column,
            row,
            player,
        } => format!("{} placed at column {column} row {row}", player.name()),
        Event::GameWon {
            column,
            row,
            player,
        } => format!(
            "{} placed at column {column} row {row} and wins",
            player.name()
        ),
        Event::DropRejected(err) => format!("drop ignored: {err}"),
    }
}

/// Run a parsed script, returning the output lines. Stops at the first
/// failed expectation.
pub fn run_script(driver: &mut HostDriver, script: &[ScriptLine]) -> Result<Vec<String>, ScriptError> {
    let mut output = Vec::new();
    for ScriptLine { line, command } in script {
        match command {
            ScriptCommand::Reset(ticks) => {
                driver.reset(*ticks);
                output.push("reset".to_string());
            }
            ScriptCommand::Actuate(actuation) => {
                if let Some(event) = driver.actuate(*actuation) {
                    output.push(describe_event(&event));
                }
            }
            ScriptCommand::Idle(ticks) => driver.idle(*ticks),
            ScriptCommand::Play(columns) => {
                for &column in columns {
                    if let Some(event) = driver.drop_in(column) {
                        output.push(describe_event(&event));
                    }
                }
            }
            ScriptCommand::Read(query) => {
                let value = driver.query(*query);
                output.push(format!("{} = {value}", describe_query(*query)));
            }
            ScriptCommand::Expect { query, value } => {
                let actual = driver.query(*query);
                if actual != *value {
                    return Err(ScriptError::ExpectationFailed {
                        line: *line,
                        expected: *value,
                        actual,
                    });
                }
            }
            ScriptCommand::Board => {
                output.push(format!("board = {:#034x}", driver.machine().board().packed()));
            }
        }
    }
    Ok(output)
}
