use crate::Value;
use crate::descriptors::DirectiveDef;
use crate::descriptors::EnumTypeDef;
use crate::descriptors::FieldDef;
use crate::descriptors::FieldSource;
use crate::descriptors::InputObjectTypeDef;
use crate::descriptors::InputValueDef;
use crate::descriptors::ObjectKind;
use crate::descriptors::ObjectTypeDef;
use crate::descriptors::OperationDef;
use crate::descriptors::Resolver;
use crate::descriptors::ScalarTypeDef;
use crate::descriptors::TypeAnnotation;
use crate::descriptors::UnionTypeDef;
use crate::schema::SchemaBuildError;
use crate::types::Directive;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::FieldResolver;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::InputObjectType;
use crate::types::InputValue;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarCoercion;
use crate::types::ScalarType;
use crate::types::TypeGraph;
use crate::types::TypeId;
use crate::types::TypeRef;
use crate::types::UnionType;
use crate::types::builtin_scalars;
use gqlkit_parser::ast::OperationKind;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

pub(crate) const QUERY_TYPE_NAME: &str = "Query";
pub(crate) const MUTATION_TYPE_NAME: &str = "Mutation";
pub(crate) const TYPENAME_FIELD_NAME: &str = "__typename";

/// `String` is the first built-in scalar allocated.
const STRING_TYPE: TypeId = TypeId(0);

/// A user declaration, looked up by name while compiling.
#[derive(Clone, Copy, Debug)]
pub(crate) enum DeclaredType<'a> {
    Enum(&'a EnumTypeDef),
    InputObject(&'a InputObjectTypeDef),
    Object(&'a ObjectTypeDef),
    Scalar(&'a ScalarTypeDef),
    Union(&'a UnionTypeDef),
}

/// A type registered in the lookup table before its members are compiled.
///
/// References back to a type whose members are still being compiled
/// resolve to its proxy, which is how self-referencing and mutually
/// referencing types compile without recursing forever. Members are filled
/// in once compiled; derived relationships (transitive interfaces, possible
/// types, inherited fields) are computed by [`TypeCompiler::finalize()`].
struct TypeProxy {
    name: String,
    description: Option<String>,
    shape: ProxyShape,
}

enum ProxyShape {
    Enum(Vec<String>),
    InputObject(IndexMap<String, InputValue>),
    Object {
        is_interface: bool,
        interfaces: Vec<TypeId>,
        fields: IndexMap<String, Field>,
    },
    Scalar(Arc<dyn ScalarCoercion>),
    Union(Vec<TypeId>),
}

impl ProxyShape {
    fn kind(&self) -> GraphQLTypeKind {
        match self {
            Self::Enum(_) => GraphQLTypeKind::Enum,
            Self::InputObject(_) => GraphQLTypeKind::InputObject,
            Self::Object { is_interface: true, .. } => GraphQLTypeKind::Interface,
            Self::Object { is_interface: false, .. } => GraphQLTypeKind::Object,
            Self::Scalar(_) => GraphQLTypeKind::Scalar,
            Self::Union(_) => GraphQLTypeKind::Union,
        }
    }

    fn direct_interfaces(&self) -> &[TypeId] {
        match self {
            Self::Object { interfaces, .. } => interfaces,
            _ => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    Input,
    Output,
}

/// Two-phase compiler from descriptors to a [`TypeGraph`].
pub(crate) struct TypeCompiler<'a> {
    declared: IndexMap<&'a str, DeclaredType<'a>>,
    proxies: Vec<TypeProxy>,
    lookup: HashMap<String, TypeId>,
}

impl<'a> TypeCompiler<'a> {
    pub fn new(declared: IndexMap<&'a str, DeclaredType<'a>>) -> Self {
        Self {
            declared,
            proxies: vec![],
            lookup: HashMap::new(),
        }
    }

    pub fn compile(
        mut self,
        queries: &[OperationDef],
        mutations: &[OperationDef],
        directives: &[DirectiveDef],
    ) -> Result<TypeGraph> {
        for (name, coercion) in builtin_scalars() {
            self.allocate(name, None, ProxyShape::Scalar(coercion));
        }
        debug_assert_eq!(self.proxies[STRING_TYPE.0].name, "String");
        let builtin_type_count = self.proxies.len();

        let query_type =
            self.compile_root(QUERY_TYPE_NAME, OperationKind::Query, queries)?;
        let mutation_type =
            if mutations.is_empty() {
                None
            } else {
                Some(self.compile_root(
                    MUTATION_TYPE_NAME,
                    OperationKind::Mutation,
                    mutations,
                )?)
            };

        // Types no operation reaches are still compiled: they must be valid,
        // and interfaces need to see every implementation.
        let declared_names: Vec<&'a str> = self.declared.keys().copied().collect();
        for name in declared_names {
            self.compile_named(name, name)?;
        }

        let directives = self.compile_directives(directives)?;
        self.finalize(query_type, mutation_type, directives, builtin_type_count)
    }

    fn allocate(
        &mut self,
        name: &str,
        description: Option<String>,
        shape: ProxyShape,
    ) -> TypeId {
        let id = TypeId(self.proxies.len());
        self.proxies.push(TypeProxy {
            name: name.to_string(),
            description,
            shape,
        });
        self.lookup.insert(name.to_string(), id);
        id
    }

    fn compile_root(
        &mut self,
        name: &str,
        operation_kind: OperationKind,
        operations: &[OperationDef],
    ) -> Result<TypeId> {
        let id = self.allocate(name, None, ProxyShape::Object {
            is_interface: false,
            interfaces: vec![],
            fields: IndexMap::new(),
        });

        let mut fields = IndexMap::new();
        for operation in operations {
            if fields.contains_key(&operation.name) {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation_kind,
                    operation_name: operation.name.clone(),
                });
            }
            let field = self.compile_resolver_field(
                name,
                &operation.name,
                operation.description.clone(),
                &operation.resolver,
            )?;
            fields.insert(operation.name.clone(), field);
        }

        self.set_object_members(id, vec![], fields);
        Ok(id)
    }

    /// Returns the id of the type called `name`, compiling it first if this
    /// is the first reference to it.
    fn compile_named(&mut self, name: &str, referenced_by: &str) -> Result<TypeId> {
        if let Some(id) = self.lookup.get(name) {
            return Ok(*id);
        }
        let Some(declared) = self.declared.get(name).copied() else {
            return Err(SchemaBuildError::UndefinedType {
                type_name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            });
        };

        match declared {
            DeclaredType::Scalar(def) => Ok(self.allocate(
                name,
                def.description.clone(),
                ProxyShape::Scalar(def.coercion.clone()),
            )),

            DeclaredType::Enum(def) => {
                check_enum_values(def)?;
                Ok(self.allocate(
                    name,
                    def.description.clone(),
                    ProxyShape::Enum(def.values.clone()),
                ))
            },

            DeclaredType::InputObject(def) => {
                let id = self.allocate(
                    name,
                    def.description.clone(),
                    ProxyShape::InputObject(IndexMap::new()),
                );
                let fields = self.compile_input_values(name, &def.fields)?;
                self.proxies[id.0].shape = ProxyShape::InputObject(fields);
                Ok(id)
            },

            DeclaredType::Union(def) => self.compile_union(def),

            DeclaredType::Object(def) => self.compile_object(def),
        }
    }

    fn compile_union(&mut self, def: &UnionTypeDef) -> Result<TypeId> {
        let id = self.allocate(
            &def.name,
            def.description.clone(),
            ProxyShape::Union(vec![]),
        );
        if def.members.is_empty() {
            return Err(SchemaBuildError::UnionWithNoMembers {
                type_name: def.name.clone(),
            });
        }

        let mut members = Vec::with_capacity(def.members.len());
        for member_name in &def.members {
            let member = self.compile_named(member_name, &def.name)?;
            let member_kind = self.proxies[member.0].shape.kind();
            if member_kind != GraphQLTypeKind::Object {
                return Err(SchemaBuildError::InvalidUnionMember {
                    union_name: def.name.clone(),
                    member_name: member_name.clone(),
                    member_kind,
                });
            }
            if members.contains(&member) {
                return Err(SchemaBuildError::DuplicateUnionMember {
                    union_name: def.name.clone(),
                    member_name: member_name.clone(),
                });
            }
            members.push(member);
        }

        self.proxies[id.0].shape = ProxyShape::Union(members);
        Ok(id)
    }

    fn compile_object(&mut self, def: &ObjectTypeDef) -> Result<TypeId> {
        let id = self.allocate(&def.name, def.description.clone(), ProxyShape::Object {
            is_interface: def.kind == ObjectKind::Interface,
            interfaces: vec![],
            fields: IndexMap::new(),
        });

        let mut interfaces = vec![];
        for interface_name in &def.interfaces {
            let interface = self.compile_named(interface_name, &def.name)?;
            let interface_kind = self.proxies[interface.0].shape.kind();
            if interface_kind != GraphQLTypeKind::Interface {
                return Err(SchemaBuildError::ImplementsNonInterface {
                    type_name: def.name.clone(),
                    interface_name: interface_name.clone(),
                    interface_kind,
                });
            }
            if !interfaces.contains(&interface) {
                interfaces.push(interface);
            }
        }

        let mut fields = IndexMap::new();
        for field_def in &def.fields {
            if fields.contains_key(&field_def.name) {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    type_name: def.name.clone(),
                    field_name: field_def.name.clone(),
                });
            }
            let field = self.compile_field(&def.name, field_def)?;
            fields.insert(field_def.name.clone(), field);
        }

        self.set_object_members(id, interfaces, fields);
        Ok(id)
    }

    fn set_object_members(
        &mut self,
        id: TypeId,
        new_interfaces: Vec<TypeId>,
        new_fields: IndexMap<String, Field>,
    ) {
        if let ProxyShape::Object { interfaces, fields, .. } = &mut self.proxies[id.0].shape {
            *interfaces = new_interfaces;
            *fields = new_fields;
        }
    }

    fn compile_field(&mut self, owner: &str, def: &FieldDef) -> Result<Field> {
        match &def.source {
            FieldSource::Property(annot) => {
                check_name(&def.name)?;
                let referenced_by = format!("{owner}.{}", def.name);
                let return_type =
                    self.compile_annotation(annot, &referenced_by, Position::Output)?;
                Ok(Field {
                    name: def.name.clone(),
                    description: def.description.clone(),
                    return_type,
                    arguments: IndexMap::new(),
                    resolver: FieldResolver::Property(def.name.clone()),
                })
            },

            FieldSource::Resolver(resolver) => self.compile_resolver_field(
                owner,
                &def.name,
                def.description.clone(),
                resolver,
            ),
        }
    }

    fn compile_resolver_field(
        &mut self,
        owner: &str,
        name: &str,
        description: Option<String>,
        resolver: &Resolver,
    ) -> Result<Field> {
        check_name(name)?;
        let referenced_by = format!("{owner}.{name}");
        let return_type = self.compile_annotation(
            &resolver.return_type,
            &referenced_by,
            Position::Output,
        )?;
        let arguments = self.compile_input_values(&referenced_by, &resolver.parameters)?;
        Ok(Field {
            name: name.to_string(),
            description,
            return_type,
            arguments,
            resolver: FieldResolver::Function(resolver.func.clone()),
        })
    }

    fn compile_input_values(
        &mut self,
        owner: &str,
        defs: &[InputValueDef],
    ) -> Result<IndexMap<String, InputValue>> {
        let mut values = IndexMap::with_capacity(defs.len());
        for def in defs {
            check_name(&def.name)?;
            if values.contains_key(&def.name) {
                return Err(SchemaBuildError::DuplicateInputValueDefinition {
                    owner: owner.to_string(),
                    input_name: def.name.clone(),
                });
            }
            let referenced_by = format!("{owner}({}:)", def.name);
            let type_ref = self.compile_annotation(
                &def.type_annotation,
                &referenced_by,
                Position::Input,
            )?;
            values.insert(def.name.clone(), InputValue {
                name: def.name.clone(),
                description: def.description.clone(),
                type_ref,
                default_value: def.default_value.clone(),
            });
        }
        Ok(values)
    }

    fn compile_annotation(
        &mut self,
        annot: &TypeAnnotation,
        referenced_by: &str,
        position: Position,
    ) -> Result<TypeRef> {
        let type_ref = self.compile_annotation_impl(annot, annot, referenced_by, false)?;
        let innermost = type_ref.innermost();
        let type_kind = self.proxies[innermost.0].shape.kind();
        let type_name = &self.proxies[innermost.0].name;

        match position {
            Position::Output if !type_kind.is_output() => {
                Err(SchemaBuildError::InputTypeInOutputPosition {
                    type_name: type_name.clone(),
                    referenced_by: referenced_by.to_string(),
                })
            },
            Position::Input if !type_kind.is_input() => {
                Err(SchemaBuildError::OutputTypeInInputPosition {
                    type_name: type_name.clone(),
                    type_kind,
                    referenced_by: referenced_by.to_string(),
                })
            },
            _ => Ok(type_ref),
        }
    }

    fn compile_annotation_impl(
        &mut self,
        whole: &TypeAnnotation,
        annot: &TypeAnnotation,
        referenced_by: &str,
        in_list: bool,
    ) -> Result<TypeRef> {
        let (type_ref, nullable) = match annot {
            TypeAnnotation::Named { name, nullable } => {
                (TypeRef::Named(self.compile_named(name, referenced_by)?), *nullable)
            },

            TypeAnnotation::List { of, nullable } => {
                if in_list {
                    return Err(SchemaBuildError::NestedListType {
                        referenced_by: referenced_by.to_string(),
                        annotation: whole.to_string(),
                    });
                }
                let inner = self.compile_annotation_impl(whole, of, referenced_by, true)?;
                (TypeRef::list(inner), *nullable)
            },
        };

        Ok(if nullable { type_ref } else { TypeRef::non_null(type_ref) })
    }

    fn compile_directives(
        &mut self,
        defs: &[DirectiveDef],
    ) -> Result<IndexMap<String, Directive>> {
        let mut directives = IndexMap::new();
        for def in builtin_directives().iter().chain(defs) {
            check_name(&def.name)?;
            if directives.contains_key(&def.name) {
                return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                    directive_name: def.name.clone(),
                });
            }
            let owner = format!("@{}", def.name);
            let arguments = self.compile_input_values(&owner, &def.arguments)?;
            directives.insert(def.name.clone(), Directive {
                name: def.name.clone(),
                description: def.description.clone(),
                arguments,
                resolver: def.resolver.clone(),
            });
        }
        Ok(directives)
    }

    /// Second pass: turns every proxy into its final [`GraphQLType`] once the
    /// whole graph is known.
    fn finalize(
        self,
        query_type: TypeId,
        mutation_type: Option<TypeId>,
        directives: IndexMap<String, Directive>,
        builtin_type_count: usize,
    ) -> Result<TypeGraph> {
        let Self { proxies, lookup, .. } = self;

        let transitive: Vec<Vec<TypeId>> =
            (0..proxies.len())
                .map(|idx| transitive_interfaces(&proxies, TypeId(idx)))
                .collect();

        let mut types = Vec::with_capacity(proxies.len());
        for (idx, proxy) in proxies.iter().enumerate() {
            let name = proxy.name.clone();
            let description = proxy.description.clone();
            let compiled = match &proxy.shape {
                ProxyShape::Scalar(coercion) => GraphQLType::Scalar(ScalarType {
                    name,
                    description,
                    coercion: coercion.clone(),
                }),

                ProxyShape::Enum(values) => GraphQLType::Enum(EnumType {
                    name,
                    description,
                    values: values.clone(),
                }),

                ProxyShape::InputObject(fields) => GraphQLType::InputObject(InputObjectType {
                    name,
                    description,
                    fields: fields.clone(),
                }),

                ProxyShape::Union(members) => GraphQLType::Union(UnionType {
                    name,
                    description,
                    possible_types: members.clone(),
                }),

                ProxyShape::Object { is_interface, fields, .. } => {
                    let interfaces = transitive[idx].clone();
                    let mut fields = fields.clone();
                    for interface in &interfaces {
                        if let ProxyShape::Object { fields: inherited, .. } = &proxies[interface.0].shape {
                            for (field_name, field) in inherited {
                                if !fields.contains_key(field_name) {
                                    fields.insert(field_name.clone(), field.clone());
                                }
                            }
                        }
                    }
                    if fields.is_empty() {
                        return Err(SchemaBuildError::TypeWithNoFields {
                            type_name: name,
                            type_kind: proxy.shape.kind(),
                        });
                    }
                    fields.insert(TYPENAME_FIELD_NAME.to_string(), typename_field());

                    if *is_interface {
                        let id = TypeId(idx);
                        let possible_types =
                            proxies.iter()
                                .enumerate()
                                .filter(|(other_idx, other)| {
                                    other.shape.kind() == GraphQLTypeKind::Object
                                        && transitive[*other_idx].contains(&id)
                                })
                                .map(|(other_idx, _)| TypeId(other_idx))
                                .collect();
                        GraphQLType::Interface(InterfaceType {
                            name,
                            description,
                            fields,
                            interfaces,
                            possible_types,
                        })
                    } else {
                        GraphQLType::Object(ObjectType {
                            name,
                            description,
                            fields,
                            interfaces,
                        })
                    }
                },
            };
            types.push(compiled);
        }

        tracing::debug!(
            "Compiled schema with {} types ({} built-in) and {} directives.",
            types.len(),
            builtin_type_count,
            directives.len(),
        );

        Ok(TypeGraph {
            types,
            type_ids: lookup,
            query_type,
            mutation_type,
            directives,
            builtin_type_count,
        })
    }
}

/// Every interface `id` implements, directly or through other interfaces,
/// in breadth-first order.
fn transitive_interfaces(proxies: &[TypeProxy], id: TypeId) -> Vec<TypeId> {
    let mut result: Vec<TypeId> = vec![];
    let mut queue: VecDeque<TypeId> =
        proxies[id.0].shape.direct_interfaces().iter().copied().collect();
    while let Some(interface) = queue.pop_front() {
        if interface == id || result.contains(&interface) {
            continue;
        }
        result.push(interface);
        queue.extend(proxies[interface.0].shape.direct_interfaces());
    }
    result
}

fn typename_field() -> Field {
    Field {
        name: TYPENAME_FIELD_NAME.to_string(),
        description: Some("The name of the object's concrete type.".to_string()),
        return_type: TypeRef::non_null(TypeRef::Named(STRING_TYPE)),
        arguments: IndexMap::new(),
        resolver: FieldResolver::Typename,
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.starts_with("__") {
        return Err(SchemaBuildError::InvalidDunderPrefixedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_enum_values(def: &EnumTypeDef) -> Result<()> {
    if def.values.is_empty() {
        return Err(SchemaBuildError::EnumWithNoValues {
            type_name: def.name.clone(),
        });
    }
    for (idx, value) in def.values.iter().enumerate() {
        check_name(value)?;
        if def.values[..idx].contains(value) {
            return Err(SchemaBuildError::DuplicateEnumValueDefinition {
                enum_name: def.name.clone(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}

fn builtin_directives() -> [DirectiveDef; 2] {
    let condition = || InputValueDef::new("if", TypeAnnotation::named("Boolean").non_null());
    [
        DirectiveDef::new("skip", |_, args| Ok(Value::Boolean(!if_argument(&args)?)))
            .argument(condition())
            .description("Excludes the selection when `if` is true."),
        DirectiveDef::new("include", |_, args| Ok(Value::Boolean(if_argument(&args)?)))
            .argument(condition())
            .description("Includes the selection only when `if` is true."),
    ]
}

fn if_argument(args: &[Value]) -> anyhow::Result<bool> {
    args.first()
        .and_then(Value::as_bool)
        .ok_or_else(|| anyhow::anyhow!("`if` must be a boolean"))
}
