//!
//! # Node Classification
//!
//! Routes each statement child of a group into one of three buckets,
//! by its node kind. Never by the shape of its projected value:
//! a complex attribute with two or three values is still an attribute.
//!

// Crates.io Imports
use serde::{Deserialize, Serialize};

// Local Imports
use crate::data::LibStatement;
use crate::utils::{enumstr, EnumStr};

/// Complex-attribute name which declares a define, in its alternate surface syntax
pub const DEFINE_GROUP: &str = "define_group";

enumstr!(
    /// # Statement Classes
    NodeClass {
        Define: "define",
        Group: "group",
        Attribute: "attribute",
    }
);

/// Classify statement `stmt`
pub fn classify(stmt: &LibStatement) -> NodeClass {
    match stmt {
        LibStatement::Define(_) => NodeClass::Define,
        LibStatement::ComplexAttr(a) if a.name == DEFINE_GROUP => NodeClass::Define,
        LibStatement::Group(_) => NodeClass::Group,
        LibStatement::Attr(_) | LibStatement::ComplexAttr(_) => NodeClass::Attribute,
    }
}
