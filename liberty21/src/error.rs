//!
//! # Liberty21 Result and Error Types
//!

// Local Imports
use crate::read::{LibertyParseErrorType, ParserState};
use crate::utils::{self, context_path, ErrorContext};

/// # [LibertyError] Result Type
pub type LibertyResult<T> = Result<T, LibertyError>;

///
/// # Liberty Error Enumeration
///
pub enum LibertyError {
    /// Lexer Errors
    Lex {
        next_char: Option<char>,
        line: usize,
        pos: usize,
    },
    /// Parser Errors
    Parse {
        msg: Option<String>,
        tp: LibertyParseErrorType,
        state: ParserState,
    },
    /// Structurally inconsistent tree, found during projection.
    /// `stack` is the chain of groups (and attribute) leading to the failing node.
    Projection {
        message: String,
        stack: Vec<ErrorContext>,
    },
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl std::fmt::Debug for LibertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LibertyError::Lex {
                next_char,
                line,
                pos,
            } => write!(
                f,
                "Lex Error: \n - invalid character {:?} \n - at line {}, position {}",
                next_char, line, pos
            ),
            LibertyError::Parse { msg, tp, state } => {
                write!(f, "Parse Error: \n - {:?}", tp)?;
                if let Some(msg) = msg {
                    write!(f, " \n - {}", msg)?;
                }
                write!(f, " \n - {:?}", state)
            }
            LibertyError::Projection { message, stack } => {
                write!(
                    f,
                    "Projection Error: \n - {} \n - at {}",
                    message,
                    context_path(stack)
                )
            }
            LibertyError::Boxed(err) => err.fmt(f),
            LibertyError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for LibertyError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for LibertyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}
impl From<String> for LibertyError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for LibertyError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<std::io::Error> for LibertyError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_json::Error> for LibertyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<utils::ser::Error> for LibertyError {
    fn from(e: utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
