//!
//! # Liberty Tree Data Model
//!
//! The syntactic tree consumed by [crate::project].
//! Produced by [crate::read], or by any other backend able to build these types.
//!

// Crates.io Imports
use derive_builder::Builder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::utils::{enumstr, EnumStr, SerdeFile};
use crate::{LibertyError, LibertyResult, ProjectOptions};

/// # Liberty Group
///
/// A named, nestable block, e.g. `cell (AND2) { ... }`.
/// Its `kind` is the group-type name (`library`, `cell`, `pin`, ...),
/// `args` its parenthesized name-list, and `statements` its body.
///
#[derive(Default, Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[builder(pattern = "owned", setter(into))]
pub struct LibGroup {
    /// Group-Type Name
    pub kind: String,
    /// Argument Expressions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub args: Vec<LibExpr>,
    /// Statement Children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub statements: Vec<LibStatement>,
}
impl LibGroup {
    /// Create a new [LibGroup] of type-name `kind`, with no arguments or statements.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }
    /// Text of our first argument, if any. Used for reporting.
    pub fn name(&self) -> Option<String> {
        self.args.first().and_then(LibExpr::text)
    }
    /// Project to a JSON document, with default [ProjectOptions].
    /// This group is treated as the root library.
    pub fn to_json(&self) -> LibertyResult<serde_json::Value> {
        crate::project::to_json(self, &ProjectOptions::default())
    }
    /// Project to a JSON document with [ProjectOptions] `opts`.
    pub fn to_json_with(&self, opts: &ProjectOptions) -> LibertyResult<serde_json::Value> {
        crate::project::to_json(self, opts)
    }
}
impl SerdeFile for LibGroup {}

/// # Statement Children of a [LibGroup]
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub enum LibStatement {
    Group(LibGroup),
    Attr(LibAttr),
    ComplexAttr(LibComplexAttr),
    Define(LibDefine),
}
impl LibStatement {
    /// Get our [LibNodeKind] discriminant
    pub fn kind(&self) -> LibNodeKind {
        match self {
            Self::Group(_) => LibNodeKind::Group,
            Self::Attr(_) => LibNodeKind::Attribute,
            Self::ComplexAttr(_) => LibNodeKind::ComplexAttribute,
            Self::Define(_) => LibNodeKind::Define,
        }
    }
    /// Get our name: the type-name for groups, the attribute/define keyword otherwise.
    pub fn name(&self) -> &str {
        match self {
            Self::Group(g) => &g.kind,
            Self::Attr(a) => &a.name,
            Self::ComplexAttr(a) => &a.name,
            Self::Define(d) => &d.name,
        }
    }
}
impl From<LibGroup> for LibStatement {
    fn from(g: LibGroup) -> Self {
        Self::Group(g)
    }
}
impl From<LibAttr> for LibStatement {
    fn from(a: LibAttr) -> Self {
        Self::Attr(a)
    }
}
impl From<LibComplexAttr> for LibStatement {
    fn from(a: LibComplexAttr) -> Self {
        Self::ComplexAttr(a)
    }
}
impl From<LibDefine> for LibStatement {
    fn from(d: LibDefine) -> Self {
        Self::Define(d)
    }
}

/// # Simple Attribute
/// `name : value ;`
#[derive(Default, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LibAttr {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LibExpr>,
}
impl LibAttr {
    pub fn new(name: impl Into<String>, value: impl Into<Option<LibExpr>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// # Complex Attribute
/// `name ( value, value, ... ) ;`
#[derive(Default, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LibComplexAttr {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<LibExpr>,
}
impl LibComplexAttr {
    pub fn new(name: impl Into<String>, values: Vec<LibExpr>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// # Define Declaration
///
/// `define ( define_name, allowed_group_name [, value_type] ) ;`
///
/// Well-formed defines have two or three values.
/// Other lengths are preserved as-is, and passed through by [crate::defines].
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LibDefine {
    /// Statement keyword, generally `define`
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<LibExpr>,
}
impl LibDefine {
    /// Create a `define` statement from `values`
    pub fn new(values: Vec<LibExpr>) -> Self {
        Self {
            name: String::from("define"),
            values,
        }
    }
}

/// # Leaf Expression
///
/// Every expression carries its literal source `image`, which backends may omit.
/// Expressions without an image contribute nothing to projected output.
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LibExpr {
    /// Literal Source Image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Kind-Specific Typed Value
    pub value: LibExprValue,
}
impl LibExpr {
    /// Integer expression, imaged as its decimal text
    pub fn int(i: i64) -> Self {
        Self {
            image: Some(i.to_string()),
            value: LibExprValue::Int(i),
        }
    }
    /// Real-valued expression, imaged via [f64]'s [std::fmt::Display]
    pub fn real(f: f64) -> Self {
        Self {
            image: Some(f.to_string()),
            value: LibExprValue::Real(f),
        }
    }
    /// String-literal expression. Its image is the double-quoted form.
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        Self {
            image: Some(format!("\"{}\"", s)),
            value: LibExprValue::Str(s),
        }
    }
    /// Generic expression, known only by its image
    pub fn generic(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            value: LibExprValue::Generic,
        }
    }
    /// Expression of a kind outside [LibExprValue]'s known set, tagged by `kind`
    pub fn unknown(kind: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            value: LibExprValue::Unknown(kind.into()),
        }
    }
    /// Get our [LibNodeKind]. Unknown kinds report as [LibNodeKind::GenericExpr].
    pub fn kind(&self) -> LibNodeKind {
        match self.value {
            LibExprValue::Int(_) => LibNodeKind::IntExpr,
            LibExprValue::Real(_) => LibNodeKind::RealExpr,
            LibExprValue::Str(_) => LibNodeKind::StringExpr,
            LibExprValue::Generic | LibExprValue::Unknown(_) => LibNodeKind::GenericExpr,
        }
    }
    /// Human-readable text: the string-value of strings, the image of everything else.
    pub fn text(&self) -> Option<String> {
        match (&self.value, &self.image) {
            (_, None) => None,
            (LibExprValue::Str(s), Some(_)) => Some(s.clone()),
            (_, Some(image)) => Some(image.clone()),
        }
    }
}

/// # Expression Values
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub enum LibExprValue {
    Int(i64),
    Real(f64),
    /// String literal, sans quotes
    Str(String),
    /// Generic expression, e.g. a bare word or arithmetic. Known only by its image.
    Generic,
    /// Expression kind unknown to this crate, named by the producing backend
    Unknown(String),
}

enumstr!(
    /// # Tree-Node Kinds
    /// The closed set of node discriminants exposed by any tree backend.
    #[derive(JsonSchema)]
    LibNodeKind {
        Group: "group",
        Attribute: "attribute",
        ComplexAttribute: "complex_attribute",
        Define: "define",
        IntExpr: "int",
        RealExpr: "real",
        StringExpr: "string",
        GenericExpr: "expr",
    }
);

impl LibGroupBuilder {
    /// Finalize, converting builder-errors into [LibertyError]s
    pub fn finish(self) -> LibertyResult<LibGroup> {
        self.build().map_err(|e| LibertyError::Str(e.to_string()))
    }
}
