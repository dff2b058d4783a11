use crate::ast::Arguments;
use smallvec::SmallVec;

/// The directives attached to one selection. Almost always zero or one.
pub type Directives = SmallVec<[DirectiveInvocation; 1]>;

/// A `@name(args)` annotation on a selection.
///
/// Whether `name` refers to a directive the schema actually knows about is
/// decided when the operation is bound to a schema, not while parsing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DirectiveInvocation {
    /// The directive name without its leading `@`.
    pub name: String,
    pub arguments: Arguments,
}
