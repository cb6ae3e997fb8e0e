use async_graphql_value::Name;

/// Reference to a type from a field or an argument, as written in GraphQL: `[Int!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(Name),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl AsRef<str>) -> Self {
        TypeRef::Named(Name::new(name))
    }

    #[must_use]
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            ty => TypeRef::NonNull(Box::new(ty)),
        }
    }

    /// Parses the GraphQL type syntax. Malformed input ends up as a named type with an
    /// invalid name, rejected when the schema is built.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Some(inner) = input.strip_suffix('!') {
            return match Self::parse(inner) {
                TypeRef::NonNull(_) => TypeRef::named(input),
                inner => TypeRef::NonNull(Box::new(inner)),
            };
        }

        if let Some(inner) = input.strip_prefix('[').and_then(|input| input.strip_suffix(']')) {
            return TypeRef::List(Box::new(Self::parse(inner)));
        }

        TypeRef::named(input)
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
            TypeRef::Named(_) => false,
        }
    }

    /// The innermost named type, with every wrapper removed.
    pub fn named_type(&self) -> &Name {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(input: &str) -> Self {
        TypeRef::parse(input)
    }
}

impl From<String> for TypeRef {
    fn from(input: String) -> Self {
        TypeRef::parse(&input)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
