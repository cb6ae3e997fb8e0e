mod error;

use async_graphql_parser::types::OperationType;
use async_graphql_value::Name;
use indexmap::IndexMap;

pub use error::SchemaError;

use crate::{
    FieldDefinition, ScalarDefinition, Schema, TypeDefinition, TypeKind, TypeRef, BUILTIN_SCALARS,
};

type BuildResult<T> = Result<T, SchemaError>;

pub struct SchemaBuilder {
    definitions: Vec<TypeDefinition>,
    query_type: Name,
    mutation_type: Option<Name>,
    subscription_type: Option<Name>,
}

impl SchemaBuilder {
    pub(crate) fn new(query_type: impl AsRef<str>) -> Self {
        SchemaBuilder {
            definitions: Vec::new(),
            query_type: Name::new(query_type),
            mutation_type: None,
            subscription_type: None,
        }
    }

    #[must_use]
    pub fn mutation(mut self, name: impl AsRef<str>) -> Self {
        self.mutation_type = Some(Name::new(name));
        self
    }

    #[must_use]
    pub fn subscription(mut self, name: impl AsRef<str>) -> Self {
        self.subscription_type = Some(Name::new(name));
        self
    }

    #[must_use]
    pub fn register(mut self, definition: impl Into<TypeDefinition>) -> Self {
        self.definitions.push(definition.into());
        self
    }

    /// Checks that every type reference resolves and that root types are objects, then
    /// links interfaces to their implementations.
    pub fn finish(self) -> BuildResult<Schema> {
        let mut types = IndexMap::with_capacity(BUILTIN_SCALARS.len() + self.definitions.len());
        for name in BUILTIN_SCALARS {
            types.insert(Name::new(name), TypeDefinition::Scalar(ScalarDefinition::new(name)));
        }

        for definition in self.definitions {
            let name = definition.name().clone();
            validate_name(&name)?;
            if types.contains_key(&name) {
                return Err(SchemaError::DuplicateType(name.to_string()));
            }
            types.insert(name, definition);
        }

        let roots = [
            (OperationType::Query, Some(&self.query_type)),
            (OperationType::Mutation, self.mutation_type.as_ref()),
            (OperationType::Subscription, self.subscription_type.as_ref()),
        ];
        for (operation, name) in roots {
            let Some(name) = name else { continue };
            match types.get(name) {
                None => {
                    return Err(SchemaError::MissingRootType {
                        operation,
                        name: name.to_string(),
                    })
                }
                Some(TypeDefinition::Object(_)) => {}
                Some(definition) => {
                    return Err(SchemaError::RootTypeNotObject {
                        operation,
                        name: name.to_string(),
                        kind: definition.kind(),
                    })
                }
            }
        }

        let mut implementations = Vec::new();
        for definition in types.values() {
            match definition {
                TypeDefinition::Object(object) => {
                    validate_fields(&types, &object.name, object.fields.values())?;
                    for interface in &object.interfaces {
                        match types.get(interface) {
                            Some(TypeDefinition::Interface(_)) => {
                                implementations.push((interface.clone(), object.name.clone()));
                            }
                            Some(definition) => {
                                return Err(SchemaError::InvalidInterface {
                                    object: object.name.to_string(),
                                    interface: interface.to_string(),
                                    kind: definition.kind(),
                                })
                            }
                            None => {
                                return Err(SchemaError::UnknownType {
                                    name: interface.to_string(),
                                    location: object.name.to_string(),
                                })
                            }
                        }
                    }
                }
                TypeDefinition::Interface(interface) => {
                    validate_fields(&types, &interface.name, interface.fields.values())?;
                }
                TypeDefinition::Union(union) => {
                    for member in &union.members {
                        match types.get(member) {
                            Some(TypeDefinition::Object(_)) => {}
                            Some(definition) => {
                                return Err(SchemaError::InvalidUnionMember {
                                    union: union.name.to_string(),
                                    member: member.to_string(),
                                    kind: definition.kind(),
                                })
                            }
                            None => {
                                return Err(SchemaError::UnknownType {
                                    name: member.to_string(),
                                    location: union.name.to_string(),
                                })
                            }
                        }
                    }
                }
                TypeDefinition::Enum(enum_def) => {
                    for value in &enum_def.values {
                        validate_name(value)?;
                    }
                }
                TypeDefinition::Scalar(_) => {}
            }
        }

        for (interface, object) in implementations {
            if let Some(TypeDefinition::Interface(interface)) = types.get_mut(&interface) {
                interface.possible_types.push(object);
            }
        }

        tracing::debug!("Built schema with {} types", types.len());

        Ok(Schema {
            types,
            query_type: self.query_type,
            mutation_type: self.mutation_type,
            subscription_type: self.subscription_type,
        })
    }
}

fn validate_fields<'a>(
    types: &IndexMap<Name, TypeDefinition>,
    parent: &Name,
    fields: impl Iterator<Item = &'a FieldDefinition>,
) -> BuildResult<()> {
    for field in fields {
        validate_name(&field.name)?;
        let location = format!("{parent}.{}", field.name);
        validate_type_ref(types, &field.ty, &location)?;

        for argument in field.arguments.values() {
            validate_name(&argument.name)?;
            let location = format!("{location}({}:)", argument.name);
            let definition = validate_type_ref(types, &argument.ty, &location)?;
            if !definition.is_leaf() {
                return Err(SchemaError::InvalidInputType {
                    location,
                    name: definition.name().to_string(),
                    kind: definition.kind(),
                });
            }
        }
    }
    Ok(())
}

fn validate_type_ref<'t>(
    types: &'t IndexMap<Name, TypeDefinition>,
    ty: &TypeRef,
    location: &str,
) -> BuildResult<&'t TypeDefinition> {
    let name = ty.named_type();
    validate_name(name)?;
    types.get(name).ok_or_else(|| SchemaError::UnknownType {
        name: name.to_string(),
        location: location.to_string(),
    })
}

fn validate_name(name: &str) -> BuildResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidName(name.to_string()))
    }
}
