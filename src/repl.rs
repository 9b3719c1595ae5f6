use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::statement::{Input, MetaCommand, Statement};
use crate::table::{Rows, Table, TableResult};

pub const DEFAULT_PROMPT: &str = "db > ";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Error reading input")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub enum ExecuteResult<'a> {
    Inserted,
    Selected(Rows<'a>),
}

pub fn execute(statement: Statement, table: &mut Table) -> TableResult<ExecuteResult<'_>> {
    match statement {
        Statement::Insert(row) => {
            table.append(&row)?;
            Ok(ExecuteResult::Inserted)
        }
        Statement::Select => Ok(ExecuteResult::Selected(table.scan())),
    }
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    prompt: String,
    table: Table,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_prompt(input, output, DEFAULT_PROMPT)
    }

    pub fn with_prompt(input: R, output: W, prompt: impl Into<String>) -> Self {
        Self {
            input,
            output,
            prompt: prompt.into(),
            table: Table::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `.exit`. Running out of input first is an error.
    pub fn run(&mut self) -> Result<(), ReplError> {
        info!("session started");
        let mut buf = Vec::new();
        loop {
            self.print_prompt()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(ReplError::InputClosed);
            }

            // Bytes that are not UTF-8 become U+FFFD and fail to prepare.
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(line.trim())? == Flow::Exit {
                info!(num_rows = self.table.num_rows(), "session ended");
                return Ok(());
            }
        }
    }

    fn print_prompt(&mut self) -> io::Result<()> {
        write!(self.output, "{}", self.prompt)?;
        self.output.flush()
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let statement = match Input::parse(line) {
            Ok(Input::Meta(MetaCommand::Exit)) => return Ok(Flow::Exit),
            Ok(Input::Meta(MetaCommand::Unrecognized(command))) => {
                writeln!(self.output, "Unrecognized command '{command}'")?;
                return Ok(Flow::Continue);
            }
            Ok(Input::Statement(statement)) => statement,
            Err(err) => {
                debug!(%err, line, "prepare failed");
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match execute(statement, &mut self.table) {
            Ok(ExecuteResult::Inserted) => writeln!(self.output, "Executed.")?,
            Ok(ExecuteResult::Selected(rows)) => {
                for row in rows {
                    writeln!(self.output, "{row}")?;
                }
                writeln!(self.output, "Executed.")?;
            }
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }
}
