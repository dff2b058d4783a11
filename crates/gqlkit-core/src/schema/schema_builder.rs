use crate::descriptors::DirectiveDef;
use crate::descriptors::EnumTypeDef;
use crate::descriptors::InputObjectTypeDef;
use crate::descriptors::ObjectTypeDef;
use crate::descriptors::OperationDef;
use crate::descriptors::ScalarTypeDef;
use crate::descriptors::UnionTypeDef;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaConfiguration;
use crate::schema::type_compiler::DeclaredType;
use crate::schema::type_compiler::MUTATION_TYPE_NAME;
use crate::schema::type_compiler::QUERY_TYPE_NAME;
use crate::schema::type_compiler::TypeCompiler;
use crate::types::builtin_scalars;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Clone, Debug)]
enum TypeDefinition {
    Enum(EnumTypeDef),
    InputObject(InputObjectTypeDef),
    Object(ObjectTypeDef),
    Scalar(ScalarTypeDef),
    Union(UnionTypeDef),
}

impl TypeDefinition {
    fn name(&self) -> &str {
        match self {
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Scalar(def) => &def.name,
            Self::Union(def) => &def.name,
        }
    }

    fn as_declared(&self) -> DeclaredType<'_> {
        match self {
            Self::Enum(def) => DeclaredType::Enum(def),
            Self::InputObject(def) => DeclaredType::InputObject(def),
            Self::Object(def) => DeclaredType::Object(def),
            Self::Scalar(def) => DeclaredType::Scalar(def),
            Self::Union(def) => DeclaredType::Union(def),
        }
    }
}

/// Collects operation, type and directive descriptors and compiles them into
/// a [`Schema`].
///
/// Registration never fails; every check runs in [`SchemaBuilder::build()`].
/// Types may be registered in any order and reference each other by name,
/// cyclically or not.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    config: SchemaConfiguration,
    directives: Vec<DirectiveDef>,
    mutations: Vec<OperationDef>,
    queries: Vec<OperationDef>,
    types: Vec<TypeDefinition>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, operation: OperationDef) -> Self {
        self.queries.push(operation);
        self
    }

    pub fn mutation(mut self, operation: OperationDef) -> Self {
        self.mutations.push(operation);
        self
    }

    /// Registers an object or interface type.
    pub fn object(mut self, def: ObjectTypeDef) -> Self {
        self.types.push(TypeDefinition::Object(def));
        self
    }

    pub fn union(mut self, def: UnionTypeDef) -> Self {
        self.types.push(TypeDefinition::Union(def));
        self
    }

    pub fn enum_type(mut self, def: EnumTypeDef) -> Self {
        self.types.push(TypeDefinition::Enum(def));
        self
    }

    pub fn scalar(mut self, def: ScalarTypeDef) -> Self {
        self.types.push(TypeDefinition::Scalar(def));
        self
    }

    pub fn input_object(mut self, def: InputObjectTypeDef) -> Self {
        self.types.push(TypeDefinition::InputObject(def));
        self
    }

    pub fn directive(mut self, def: DirectiveDef) -> Self {
        self.directives.push(def);
        self
    }

    pub fn configure(mut self, config: SchemaConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Schema> {
        if self.queries.is_empty() {
            return Err(SchemaBuildError::NoQueries);
        }

        let builtin_names: Vec<&str> =
            builtin_scalars().into_iter().map(|(name, _)| name).collect();

        let mut declared = IndexMap::with_capacity(self.types.len());
        for def in &self.types {
            let type_name = def.name();
            if type_name.starts_with("__") {
                return Err(SchemaBuildError::InvalidDunderPrefixedName {
                    name: type_name.to_string(),
                });
            }
            if type_name == QUERY_TYPE_NAME || type_name == MUTATION_TYPE_NAME {
                return Err(SchemaBuildError::ReservedRootTypeName {
                    type_name: type_name.to_string(),
                });
            }
            if builtin_names.contains(&type_name) || declared.contains_key(type_name) {
                return Err(SchemaBuildError::DuplicateTypeDefinition {
                    type_name: type_name.to_string(),
                });
            }
            declared.insert(type_name, def.as_declared());
        }

        let graph = TypeCompiler::new(declared).compile(
            &self.queries,
            &self.mutations,
            &self.directives,
        )?;
        Ok(Schema::new(graph, self.config))
    }
}
