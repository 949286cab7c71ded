//! cli::syntax
//!
//! Parsing of command lines into engine requests.
//!
//! # Grammar
//!
//! ```text
//! line      := command [ " " parameters ]
//! NAME      := [a-zA-Z]+
//! AMOUNT    := "1000" | [0-9]{1,3}
//! ENTRY     := AMOUNT ":" NAME
//!
//! addAssembly     NAME "=" ENTRY ( ";" ENTRY )*
//! removeAssembly  NAME
//! printAssembly   NAME
//! getAssemblies   NAME
//! getComponents   NAME
//! addPart         NAME "+" ENTRY
//! removePart      NAME "-" ENTRY
//! quit
//! ```
//!
//! Grammar is checked before amounts: `addPart A+0:B` is a range error,
//! `addPart A+0:B;` is a grammar error.

use std::fmt;

use thiserror::Error;

use crate::core::types::{PartName, Quantity, MAX_QUANTITY, MIN_QUANTITY};
use crate::engine::Request;

/// Separates the command from its parameters.
pub const COMMAND_SEPARATOR: char = ' ';

const SETTER: char = '=';
const ADDER: char = '+';
const SUBTRACTOR: char = '-';
const NAME_AMOUNT_SEPARATOR: char = ':';
const ENTRY_SEPARATOR: char = ';';

/// Errors from parsing a command line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no input given")]
    NoInput,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("invalid parameters, usage: {0}")]
    InvalidParameters(Keyword),

    #[error("number {0} is not in range {MIN_QUANTITY}..={MAX_QUANTITY}")]
    NumberNotInRange(u64),
}

/// The command words understood by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    AddAssembly,
    RemoveAssembly,
    PrintAssembly,
    GetAssemblies,
    GetComponents,
    AddPart,
    RemovePart,
    Quit,
}

impl Keyword {
    /// All keywords, in help order.
    pub const ALL: [Keyword; 8] = [
        Keyword::AddAssembly,
        Keyword::RemoveAssembly,
        Keyword::PrintAssembly,
        Keyword::GetAssemblies,
        Keyword::GetComponents,
        Keyword::AddPart,
        Keyword::RemovePart,
        Keyword::Quit,
    ];

    /// The word as typed.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::AddAssembly => "addAssembly",
            Keyword::RemoveAssembly => "removeAssembly",
            Keyword::PrintAssembly => "printAssembly",
            Keyword::GetAssemblies => "getAssemblies",
            Keyword::GetComponents => "getComponents",
            Keyword::AddPart => "addPart",
            Keyword::RemovePart => "removePart",
            Keyword::Quit => "quit",
        }
    }

    /// Parameter shape for usage messages.
    pub fn usage(self) -> &'static str {
        match self {
            Keyword::AddAssembly => "addAssembly NAME=AMOUNT:NAME;AMOUNT:NAME...",
            Keyword::RemoveAssembly => "removeAssembly NAME",
            Keyword::PrintAssembly => "printAssembly NAME",
            Keyword::GetAssemblies => "getAssemblies NAME",
            Keyword::GetComponents => "getComponents NAME",
            Keyword::AddPart => "addPart NAME+AMOUNT:NAME",
            Keyword::RemovePart => "removePart NAME-AMOUNT:NAME",
            Keyword::Quit => "quit",
        }
    }

    /// Look up a command word (case-sensitive).
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == word)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.usage())
    }
}

/// Parse one command line.
///
/// A trailing `\r` should be stripped by the caller; nothing else is
/// trimmed.
///
/// # Example
///
/// ```
/// use blueprintz::cli::syntax::{parse_line, ParseError};
/// use blueprintz::engine::Request;
///
/// let request = parse_line("printAssembly Bike").unwrap();
/// assert!(matches!(request, Request::PrintAssembly { .. }));
///
/// assert_eq!(parse_line(""), Err(ParseError::NoInput));
/// assert_eq!(parse_line("addPart Bike+0:Bell"), Err(ParseError::NumberNotInRange(0)));
/// ```
pub fn parse_line(line: &str) -> Result<Request, ParseError> {
    if line.is_empty() {
        return Err(ParseError::NoInput);
    }

    let (word, parameters) = match line.split_once(COMMAND_SEPARATOR) {
        Some((word, parameters)) => (word, Some(parameters)),
        None => (line, None),
    };

    let keyword =
        Keyword::parse(word).ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;

    let invalid = || ParseError::InvalidParameters(keyword);

    if keyword == Keyword::Quit {
        return match parameters {
            None => Ok(Request::Quit),
            Some(_) => Err(invalid()),
        };
    }

    let parameters = parameters.ok_or_else(invalid)?;

    match keyword {
        Keyword::AddAssembly => {
            let (id, entries) = setter(parameters).ok_or_else(invalid)?;
            let children = entries
                .into_iter()
                .map(|(amount, child)| quantity(amount).map(|amount| (amount, child)))
                .collect::<Result<Vec<_>, ParseError>>()?;
            Ok(Request::AddAssembly { id, children })
        }
        Keyword::RemoveAssembly => Ok(Request::RemoveAssembly {
            id: name(parameters).ok_or_else(invalid)?,
        }),
        Keyword::PrintAssembly => Ok(Request::PrintAssembly {
            id: name(parameters).ok_or_else(invalid)?,
        }),
        Keyword::GetAssemblies => Ok(Request::GetAssemblies {
            id: name(parameters).ok_or_else(invalid)?,
        }),
        Keyword::GetComponents => Ok(Request::GetComponents {
            id: name(parameters).ok_or_else(invalid)?,
        }),
        Keyword::AddPart => {
            let (to, amount, id) = edit(parameters, ADDER).ok_or_else(invalid)?;
            Ok(Request::AddPart {
                to,
                id,
                amount: quantity(amount)?,
            })
        }
        Keyword::RemovePart => {
            let (from, amount, id) = edit(parameters, SUBTRACTOR).ok_or_else(invalid)?;
            Ok(Request::RemovePart {
                from,
                id,
                amount: quantity(amount)?,
            })
        }
        Keyword::Quit => Ok(Request::Quit),
    }
}

/// `[a-zA-Z]+`
fn name(text: &str) -> Option<PartName> {
    if !text.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    PartName::new(text).ok()
}

/// Digits of an amount; range is checked later by [`quantity`].
fn amount(text: &str) -> Option<u64> {
    let well_formed = text == "1000"
        || ((1..=3).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit()));
    if well_formed {
        text.parse().ok()
    } else {
        None
    }
}

fn entry(text: &str) -> Option<(u64, PartName)> {
    let (amount_text, name_text) = text.split_once(NAME_AMOUNT_SEPARATOR)?;
    Some((amount(amount_text)?, name(name_text)?))
}

/// `NAME=ENTRY;ENTRY...`
fn setter(text: &str) -> Option<(PartName, Vec<(u64, PartName)>)> {
    let (id, entries) = text.split_once(SETTER)?;
    let entries = entries
        .split(ENTRY_SEPARATOR)
        .map(entry)
        .collect::<Option<Vec<_>>>()?;
    Some((name(id)?, entries))
}

/// `NAME<op>ENTRY`
fn edit(text: &str, op: char) -> Option<(PartName, u64, PartName)> {
    let (target, rest) = text.split_once(op)?;
    let (amount, child) = entry(rest)?;
    Some((name(target)?, amount, child))
}

fn quantity(value: u64) -> Result<Quantity, ParseError> {
    Quantity::new(value).map_err(|_| ParseError::NumberNotInRange(value))
}
