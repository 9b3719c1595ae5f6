use thiserror::Error;
use tracing::debug;

use crate::row::{Row, RowError};

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized(String),
}

impl MetaCommand {
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized(input.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long.")]
    StringTooLong,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),
}

impl From<RowError> for PrepareError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::StringTooLong { .. } => PrepareError::StringTooLong,
            RowError::NulByte { .. } => PrepareError::SyntaxError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Meta(MetaCommand),
    Statement(Statement),
}

impl Input {
    pub fn parse(input: &str) -> Result<Input, PrepareError> {
        if let Some(meta) = MetaCommand::parse(input) {
            Ok(Input::Meta(meta))
        } else {
            Statement::prepare(input).map(Input::Statement)
        }
    }
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let statement = if input == "select" {
            Statement::Select
        } else if let Some(args) = input.strip_prefix("insert") {
            // Anything starting with "insert" is parsed as one, so
            // "insertfoo" is a syntax error rather than an unknown keyword.
            prepare_insert(args.split_whitespace())?
        } else {
            return Err(PrepareError::UnrecognizedStatement(input.to_string()));
        };
        debug!(?statement, "prepared");
        Ok(statement)
    }
}

fn prepare_insert<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Statement, PrepareError> {
    let (Some(id), Some(username), Some(email), None) =
        (args.next(), args.next(), args.next(), args.next())
    else {
        return Err(PrepareError::SyntaxError);
    };

    let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    Ok(Statement::Insert(Row::new(id, username, email)?))
}
