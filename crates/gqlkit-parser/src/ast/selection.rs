use crate::SourcePosition;
use crate::ast::Arguments;
use crate::ast::Directives;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::SelectionTree;
use std::borrow::Cow;

/// One entry of a [`SelectionTree`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    /// The key this selection occupies within its selection set.
    ///
    /// Fields are keyed by alias-or-name and fragment spreads by
    /// `...FragmentName`. Inline fragments merge into the enclosing set and
    /// have no key of their own.
    pub fn response_key(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Field(field) => Some(Cow::Borrowed(field.response_key())),
            Self::FragmentSpread(spread) => {
                Some(Cow::Owned(format!("...{}", spread.name())))
            },
            Self::InlineFragment(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldSelection> {
        if let Self::Field(field) = self {
            Some(field)
        } else {
            None
        }
    }

    pub fn is_fragment(&self) -> bool {
        !matches!(self, Self::Field(_))
    }

    pub fn position(&self) -> &SourcePosition {
        match self {
            Self::Field(field) => &field.position,
            Self::FragmentSpread(spread) => &spread.position,
            Self::InlineFragment(inline) => &inline.position,
        }
    }
}

/// A field selection: `alias: key(args) @directive { children }`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldSelection {
    pub key: String,
    pub alias: Option<String>,
    pub arguments: Option<Arguments>,
    pub directives: Option<Directives>,
    pub children: Option<SelectionTree>,
    pub position: SourcePosition,
}

impl FieldSelection {
    /// The alias if there is one, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.key.as_str())
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|tree| !tree.is_empty())
    }
}
