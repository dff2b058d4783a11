use crate::types::Directive;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeId;
use crate::types::TypeRef;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Every compiled type of a schema, addressable by [`TypeId`] or by name.
///
/// Built once by the schema compiler and never mutated afterwards, so it is
/// shared between concurrent requests behind an `Arc`.
#[derive(Debug)]
pub struct TypeGraph {
    pub(crate) types: Vec<GraphQLType>,
    pub(crate) type_ids: HashMap<String, TypeId>,
    pub(crate) query_type: TypeId,
    pub(crate) mutation_type: Option<TypeId>,
    pub(crate) directives: IndexMap<String, Directive>,
    pub(crate) builtin_type_count: usize,
}

impl TypeGraph {
    /// The compiled type for `id`.
    ///
    /// Ids are only ever handed out by the graph that owns them, so this
    /// lookup cannot miss.
    pub fn get(&self, id: TypeId) -> &GraphQLType {
        &self.types[id.0]
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.type_ids.get(name).copied()
    }

    pub fn type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.type_id(name).map(|id| self.get(id))
    }

    pub fn query_type(&self) -> TypeId {
        self.query_type
    }

    pub fn mutation_type(&self) -> Option<TypeId> {
        self.mutation_type
    }

    /// All compiled types (built-in scalars included) in compilation order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &GraphQLType)> {
        self.types.iter().enumerate().map(|(idx, t)| (TypeId(idx), t))
    }

    /// Types declared by the schema author, i.e. everything except the
    /// built-in scalars.
    pub fn defined_types(&self) -> impl Iterator<Item = (TypeId, &GraphQLType)> {
        self.types().skip(self.builtin_type_count)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn directives(&self) -> &IndexMap<String, Directive> {
        &self.directives
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.get(name)
    }

    /// The output field `name` of the object or interface type `owner`.
    pub fn field(&self, owner: TypeId, name: &str) -> Option<&Field> {
        self.get(owner).fields().and_then(|fields| fields.get(name))
    }

    /// Object types a value of static type `id` can have at runtime.
    pub fn possible_types(&self, id: TypeId) -> Vec<TypeId> {
        match self.get(id) {
            GraphQLType::Object(_) => vec![id],
            GraphQLType::Interface(iface) => iface.possible_types().to_vec(),
            GraphQLType::Union(union_type) => union_type.possible_types().to_vec(),
            _ => vec![],
        }
    }

    /// Whether a value whose concrete type is `runtime` matches a fragment
    /// type condition on `condition`: the same type, an interface `runtime`
    /// implements, or a union containing it.
    pub fn type_satisfies(&self, runtime: TypeId, condition: TypeId) -> bool {
        if runtime == condition {
            return true;
        }
        match (self.get(runtime), self.get(condition)) {
            (GraphQLType::Object(obj), GraphQLType::Interface(_)) => {
                obj.implements(condition)
            },
            (GraphQLType::Interface(iface), GraphQLType::Interface(_)) => {
                iface.interfaces().contains(&condition)
            },
            (GraphQLType::Object(_), GraphQLType::Union(union_type)) => {
                union_type.contains(runtime)
            },
            _ => false,
        }
    }

    /// Whether a fragment with type condition `condition` can ever apply
    /// inside a selection on `enclosing`.
    pub fn types_overlap(&self, enclosing: TypeId, condition: TypeId) -> bool {
        if enclosing == condition {
            return true;
        }
        let enclosing_possible = self.possible_types(enclosing);
        self.possible_types(condition)
            .iter()
            .any(|id| enclosing_possible.contains(id))
    }

    /// Renders `type_ref` the way it would be written in a document, e.g.
    /// `[Hero!]!`.
    pub fn type_ref_string(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Named(id) => self.get(*id).name().to_string(),
            TypeRef::List(inner) => format!("[{}]", self.type_ref_string(inner)),
            TypeRef::NonNull(inner) => format!("{}!", self.type_ref_string(inner)),
        }
    }
}
