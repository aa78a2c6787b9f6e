//!
//! # Error-Context Stack Entries
//!

/// Enumerated tree-walking contexts
/// Generally used for error reporting, as a stack from the root library inward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorContext {
    /// Group, with its type-name (e.g. `cell`) and first argument-name, if any
    Group { kind: String, name: Option<String> },
    /// Simple or complex attribute, by name
    Attr(String),
    /// Define declaration, by keyword
    Define(String),
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Group { kind, name: Some(n) } => write!(f, "{}({})", kind, n),
            Self::Group { kind, name: None } => write!(f, "{}()", kind),
            Self::Attr(name) => write!(f, "{}", name),
            Self::Define(name) => write!(f, "{}", name),
        }
    }
}

/// Format a context-stack as a `>`-separated path, e.g. `library(lib) > cell(AND2) > pin(A)`.
/// Empty stacks format as `<root>`.
pub fn context_path(stack: &[ErrorContext]) -> String {
    if stack.is_empty() {
        return String::from("<root>");
    }
    stack
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(" > ")
}
