//!
//! # Liberty21 Error-Helper Utilities
//!
//! Shared by the tree-walkers (reader, projector) that carry a context-stack
//! and want to report it upon failure.
//!
//! ```rust
//! use liberty21utils::error::ErrorHelper;
//!
//! /// Example walker, which reports the group it was visiting upon failure.
//! struct GroupWalker {
//!     group: String,
//! }
//! impl ErrorHelper for GroupWalker {
//!     type Error = String;
//!
//!     fn err(&self, msg: impl Into<String>) -> Self::Error {
//!         format!("{} (in group `{}`)", msg.into(), self.group)
//!     }
//! }
//! impl GroupWalker {
//!     fn first_name(&self, names: &[&str]) -> Result<String, String> {
//!         self.assert(!self.group.is_empty(), "Empty group type-name")?;
//!         let name = self.unwrap(names.first(), "Group has no names")?;
//!         Ok(name.to_string())
//!     }
//! }
//! let walker = GroupWalker { group: "cell".into() };
//! assert_eq!(walker.first_name(&["AND2"]), Ok("AND2".to_string()));
//! assert_eq!(
//!     walker.first_name(&[]),
//!     Err("Group has no names (in group `cell`)".to_string())
//! );
//! ```
//!

///
/// # ErrorHelper
///
/// Helper trait for re-use among tree-walkers.
/// Each implementer will generally have some internal state to report upon failure,
/// typically a stack of [crate::ErrorContext]s, which it injects in the implementation-required `err` method.
///
pub trait ErrorHelper {
    type Error;

    /// Create and return a [Self::Error] value.
    fn err(&self, msg: impl Into<String>) -> Self::Error;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> Result<T, Self::Error> {
        Err(self.err(msg))
    }
    /// Unwrap the [Option] `opt` if it is [Some], and return our error if not.
    fn unwrap<T>(&self, opt: Option<T>, msg: impl Into<String>) -> Result<T, Self::Error> {
        match opt {
            Some(val) => Ok(val),
            None => self.fail(msg),
        }
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> Result<(), Self::Error> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}
