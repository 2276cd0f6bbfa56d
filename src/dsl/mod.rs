//! DSL (Domain Specific Language) parser for wiring diagram descriptions.
//!
//! Parts lists extracted from drawings are written down in a small,
//! line-oriented and human-editable language. It is the loader boundary of
//! the crate: everything the engine sees comes through here or through the
//! JSON interchange form.
//!
//! # Grammar Overview
//!
//! ```text
//! diagram     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = wire | classes
//! wire        = ".wire" id class from_id to_id
//! classes     = (".control" | ".power") class { class }
//! component   = kind id designation class { flag | param } [description]
//! param       = word '=' (word | string)
//! description = '"' { any_char } '"'
//! ```
//!
//! # Component Kinds
//!
//! | Keyword | Kind | Flags |
//! |---------|------|-------|
//! | SOURCE | Power source | `low` (default) / `high` |
//! | CONTACTOR | Contactor | |
//! | RELAY | Relay | |
//! | SENSOR | Sensor | `proximity`, `photoelectric`, `limit`, `pressure`, `temperature`, `plc_input`; `no` / `nc` |
//! | SWITCH | Push button / selector | `no` / `nc` |
//! | FUSE, BREAKER | Protection | |
//! | MOTOR, LAMP, TERMINAL, TRANSFORMER, PLC, OTHER | Always conducting | |
//!
//! Full type tags such as `SENSOR_LIMIT` or `POWER_SOURCE_HIGH` are accepted
//! in place of a keyword. The only parameter is `state=on|off|unknown`;
//! togglable components default to `off`.
//!
//! # Example
//!
//! ```text
//! # Conveyor start circuit
//! SOURCE    P1 +24V  24VDC
//! SOURCE    P2 L1    400VAC high
//! SENSOR    S1 -B1   24VDC proximity no
//! CONTACTOR K1 -K1   24VDC
//! MOTOR     M1 -M1   400VAC "Conveyor drive"
//!
//! .wire W1 24VDC  P1 S1
//! .wire W2 24VDC  S1 K1
//! .wire W3 400VAC P2 K1
//! .wire W4 400VAC K1 M1
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::{Result, VoltflowError};

/// Parse a diagram DSL string into an AST.
pub fn parse(input: &str) -> Result<DiagramAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a diagram DSL file.
pub fn parse_file(path: &std::path::Path) -> Result<DiagramAst> {
    let content = std::fs::read_to_string(path).map_err(|e| VoltflowError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
