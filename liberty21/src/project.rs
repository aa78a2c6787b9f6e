//!
//! # JSON Projection
//!
//! Walks a [LibGroup] tree and builds its JSON document.
//!
//! Each group projects to a single-key object `{<kind>: {...}}`, whose inner object holds:
//! * `names`: its coerced arguments
//! * one key per attribute, flattened from its attribute statements
//! * `defines`: its merged define-declarations
//! * `groups`: its projected sub-groups, in statement order
//!
//! Each is present only if non-empty.
//! The root library is special-cased: its fields are merged directly into the
//! document's top level, rather than nested under a `library` key.
//!

// Crates.io Imports
use log::{debug, trace, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Local Imports
use crate::classify::{classify, NodeClass};
use crate::coerce::coerce;
use crate::data::{LibAttr, LibExpr, LibGroup, LibStatement};
use crate::defines::merge_define;
use crate::utils::{ErrorContext, ErrorHelper, SerdeFile};
use crate::{LibertyError, LibertyResult};

/// Key of each group's coerced argument-list
pub const NAMES: &str = "names";
/// Key of each group's projected sub-groups
pub const GROUPS: &str = "groups";
/// Key of each group's merged defines
pub const DEFINES: &str = "defines";

/// # Projection Options
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectOptions {
    /// Maximum group-nesting depth, counting the root library as one.
    /// Deeper trees fail to project, rather than exhausting the stack.
    pub max_depth: usize,
    /// Wrap the root library under its type-name, i.e. `{"library": {...}}`,
    /// rather than merging its fields into the document's top level.
    pub wrap_root: bool,
    /// Expected type-name of the root group. Mismatches are logged, not rejected.
    pub root_kind: String,
}
impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            wrap_root: false,
            root_kind: String::from("library"),
        }
    }
}
impl SerdeFile for ProjectOptions {}

/// Project root library `lib` to a new JSON document
pub fn to_json(lib: &LibGroup, opts: &ProjectOptions) -> LibertyResult<Value> {
    let mut root = Map::new();
    project_into(lib, &mut root, opts)?;
    Ok(Value::Object(root))
}

/// Project root library `lib`, merging its fields into the top level of document `root`.
/// Fields already in `root` are overwritten by same-named library fields.
/// On failure `root` is left unmodified.
pub fn project_into(
    lib: &LibGroup,
    root: &mut Map<String, Value>,
    opts: &ProjectOptions,
) -> LibertyResult<()> {
    let fields = JsonProjector::new(opts).project_root(lib)?;
    for (key, val) in fields {
        root.insert(key, val);
    }
    Ok(())
}

/// Project non-root group `group` to its single-key object `{<kind>: {...}}`
pub fn project_group(group: &LibGroup, opts: &ProjectOptions) -> LibertyResult<Value> {
    let fields = JsonProjector::new(opts).project_group(group)?;
    Ok(Value::Object(fields))
}

/// # JSON Projector
///
/// Recursive tree-walker. Each method returns its projected value directly.
/// Its only state is the context-stack and depth, for error reporting.
#[derive(Debug)]
struct JsonProjector<'opts> {
    opts: &'opts ProjectOptions,
    ctx: Vec<ErrorContext>,
    depth: usize,
}
impl<'opts> JsonProjector<'opts> {
    fn new(opts: &'opts ProjectOptions) -> Self {
        Self {
            opts,
            ctx: Vec::new(),
            depth: 0,
        }
    }
    /// Project the root library, returning the fields to be merged into the document root
    fn project_root(&mut self, lib: &LibGroup) -> LibertyResult<Map<String, Value>> {
        if lib.kind != self.opts.root_kind {
            warn!(
                "Root group is of type `{}`, expected `{}`",
                lib.kind, self.opts.root_kind
            );
        }
        debug!(
            "Projecting {}({})",
            lib.kind,
            lib.name().unwrap_or_default()
        );
        let fields = self.group_fields(lib)?;
        debug!("Projected {} top-level fields", fields.len());
        if self.opts.wrap_root {
            return Ok(self.wrap(lib, fields));
        }
        Ok(fields)
    }
    /// Project a non-root group to its single-key object
    fn project_group(&mut self, group: &LibGroup) -> LibertyResult<Map<String, Value>> {
        let fields = self.group_fields(group)?;
        Ok(self.wrap(group, fields))
    }
    /// Wrap the projected `fields` of `group` under its type-name
    fn wrap(&self, group: &LibGroup, fields: Map<String, Value>) -> Map<String, Value> {
        let mut wrapped = Map::new();
        wrapped.insert(group.kind.clone(), Value::Object(fields));
        wrapped
    }
    /// Project the fields of `group`, recursively projecting its statements
    fn group_fields(&mut self, group: &LibGroup) -> LibertyResult<Map<String, Value>> {
        self.ctx.push(ErrorContext::Group {
            kind: group.kind.clone(),
            name: group.name(),
        });
        self.depth += 1;
        self.assert(!group.kind.is_empty(), "Group with empty type-name")?;
        if self.depth > self.opts.max_depth {
            let msg = format!("Group nesting exceeds max_depth {}", self.opts.max_depth);
            return self.fail(msg);
        }

        // Arguments, skipping any without images
        let names: Vec<Value> = group.args.iter().filter_map(coerce).collect();

        // Sort each statement into one of our three buckets
        let mut defines = Map::new();
        let mut groups = Vec::new();
        let mut attrs = Vec::new();
        for stmt in group.statements.iter() {
            let projected = self.project_statement(stmt)?;
            let class = classify(stmt);
            trace!("{} `{}` => {}", stmt.kind(), stmt.name(), class);
            match class {
                NodeClass::Define => merge_define(&mut defines, projected),
                NodeClass::Group => groups.push(Value::Object(projected)),
                NodeClass::Attribute => attrs.push(projected),
            }
        }

        // And assemble them
        let mut fields = Map::new();
        if !names.is_empty() {
            fields.insert(NAMES.into(), Value::Array(names));
        }
        for attr in attrs {
            for (key, val) in attr {
                // Every structural field wins over a same-named attribute.
                // Earlier liberty2json output differed for `groups`, letting the attribute overwrite it.
                let claimed = match key.as_str() {
                    NAMES => fields.contains_key(NAMES),
                    DEFINES => !defines.is_empty(),
                    GROUPS => !groups.is_empty(),
                    _ => false,
                };
                if claimed {
                    warn!(
                        "Attribute `{}` in group `{}` collides with its structural field, and is dropped",
                        key, group.kind
                    );
                    continue;
                }
                fields.insert(key, val);
            }
        }
        if !defines.is_empty() {
            fields.insert(DEFINES.into(), Value::Object(defines));
        }
        if !groups.is_empty() {
            fields.insert(GROUPS.into(), Value::Array(groups));
        }

        self.depth -= 1;
        self.ctx.pop();
        Ok(fields)
    }
    /// Project a statement-child to its single-key object.
    /// Attributes without values project to an empty object.
    fn project_statement(&mut self, stmt: &LibStatement) -> LibertyResult<Map<String, Value>> {
        match stmt {
            LibStatement::Group(g) => self.project_group(g),
            LibStatement::Attr(a) => self.project_attr(a),
            LibStatement::ComplexAttr(a) => {
                self.ctx.push(ErrorContext::Attr(a.name.clone()));
                let rv = self.project_values(&a.name, &a.values)?;
                self.ctx.pop();
                Ok(rv)
            }
            LibStatement::Define(d) => {
                self.ctx.push(ErrorContext::Define(d.name.clone()));
                let rv = self.project_values(&d.name, &d.values)?;
                self.ctx.pop();
                Ok(rv)
            }
        }
    }
    /// Project a simple attribute to `{name: value}`
    fn project_attr(&mut self, attr: &LibAttr) -> LibertyResult<Map<String, Value>> {
        self.ctx.push(ErrorContext::Attr(attr.name.clone()));
        self.assert(!attr.name.is_empty(), "Attribute with empty name")?;
        let mut rv = Map::new();
        match attr.value.as_ref().and_then(coerce) {
            Some(val) => {
                rv.insert(attr.name.clone(), val);
            }
            None => debug!("Attribute `{}` has no value", attr.name),
        }
        self.ctx.pop();
        Ok(rv)
    }
    /// Project a list-valued statement (complex attribute or define) to `{name: [values]}`
    fn project_values(
        &mut self,
        name: &str,
        values: &[LibExpr],
    ) -> LibertyResult<Map<String, Value>> {
        self.assert(!name.is_empty(), "Statement with empty name")?;
        let list: Vec<Value> = values.iter().filter_map(coerce).collect();
        let mut rv = Map::new();
        rv.insert(name.to_string(), Value::Array(list));
        Ok(rv)
    }
}
impl ErrorHelper for JsonProjector<'_> {
    type Error = LibertyError;
    fn err(&self, msg: impl Into<String>) -> LibertyError {
        LibertyError::Projection {
            message: msg.into(),
            stack: self.ctx.clone(),
        }
    }
}
