use serde::{Deserialize, Serialize};

use crate::{Field, Guard, Primitive, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Struct,
    Union,
    /// A fieldless enum. `repr` is the integer representation, `None` for `repr(C)`.
    Enum {
        repr: Option<Primitive>,
        enumerators: Vec<String>,
    },
    /// `type Name = Target;`
    Alias(TypeRef),
    /// Declared without a layout; only usable behind a pointer on the target side.
    Opaque,
}

impl TypeKind {
    /// The aliased type, for `Alias`.
    pub fn aliased(&self) -> Option<&TypeRef> {
        match self {
            TypeKind::Alias(target) => Some(target),
            _ => None,
        }
    }
}

/// One possible definition body for a type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVariant {
    pub name: String,
    pub kind: TypeKind,
    pub guard: Option<Guard>,
    pub fields: Vec<Field>,
}

impl TypeVariant {
    pub fn new(
        name: impl Into<String>,
        kind: TypeKind,
        guard: Option<Guard>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            guard,
            fields,
        }
    }

    pub fn structure(name: impl Into<String>, guard: Option<Guard>, fields: Vec<Field>) -> Self {
        Self::new(name, TypeKind::Struct, guard, fields)
    }

    pub fn opaque(name: impl Into<String>, guard: Option<Guard>) -> Self {
        Self::new(name, TypeKind::Opaque, guard, Vec::new())
    }

    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        guard: Option<Guard>,
        repr: Option<Primitive>,
        enumerators: impl IntoIterator<Item = S>,
    ) -> Self {
        let kind = TypeKind::Enum {
            repr,
            enumerators: enumerators.into_iter().map(Into::into).collect(),
        };
        Self::new(name, kind, guard, Vec::new())
    }

    pub fn alias(name: impl Into<String>, guard: Option<Guard>, target: TypeRef) -> Self {
        Self::new(name, TypeKind::Alias(target), guard, Vec::new())
    }

    /// Every type position of this variant: the aliased type, then the fields.
    fn type_refs(&self) -> impl Iterator<Item = &TypeRef> {
        self.kind
            .aliased()
            .into_iter()
            .chain(self.fields.iter().map(|f| &f.ty))
    }

    /// Names this variant embeds by value, in field order, duplicates removed.
    ///
    /// An alias depends on its target the way a field would.
    pub fn value_dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for dep in self.type_refs().filter_map(TypeRef::value_dependency) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        deps
    }

    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        self.type_refs().filter_map(TypeRef::referenced_name)
    }
}

/// One possible signature for a function name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionVariant {
    pub name: String,
    pub guard: Option<Guard>,
    pub args: Vec<Field>,
    pub ret: Option<TypeRef>,
}

impl FunctionVariant {
    pub fn new(
        name: impl Into<String>,
        guard: Option<Guard>,
        args: Vec<Field>,
        ret: Option<TypeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            guard,
            args,
            ret,
        }
    }

    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .map(|a| &a.ty)
            .chain(self.ret.iter())
            .filter_map(|ty| ty.referenced_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    #[test]
    fn value_dependencies_skip_pointers_and_duplicates() {
        let node = TypeVariant::structure(
            "Node",
            None,
            vec![
                Field::new("payload", TypeRef::named("Payload")),
                Field::new("next", TypeRef::ptr(TypeRef::named("Node"))),
                Field::new("spare", TypeRef::array(TypeRef::named("Payload"), 2)),
                Field::new("len", Primitive::Usize),
            ],
        );
        assert_eq!(node.value_dependencies(), vec!["Payload"]);
        assert_eq!(
            node.referenced_names().collect::<Vec<_>>(),
            vec!["Payload", "Node", "Payload"]
        );
    }

    #[test]
    fn alias_targets_count_as_dependencies() {
        let by_value = TypeVariant::alias("Handle", None, TypeRef::named("FooHandle"));
        assert_eq!(by_value.value_dependencies(), vec!["FooHandle"]);

        let by_ptr = TypeVariant::alias("HandlePtr", None, TypeRef::ptr(TypeRef::named("FooHandle")));
        assert!(by_ptr.value_dependencies().is_empty());
        assert_eq!(by_ptr.referenced_names().collect::<Vec<_>>(), vec!["FooHandle"]);
    }

    #[test]
    fn enums_have_no_dependencies() {
        let ty = TypeVariant::enumeration("FooType", None, Some(Primitive::U32), ["A", "B", "C"]);
        assert!(ty.value_dependencies().is_empty());
        assert_eq!(
            ty.kind,
            TypeKind::Enum {
                repr: Some(Primitive::U32),
                enumerators: vec!["A".into(), "B".into(), "C".into()],
            }
        );
    }

    #[test]
    fn function_references_include_return_type() {
        let f = FunctionVariant::new(
            "make",
            None,
            vec![Field::new("seed", Primitive::U32)],
            Some(TypeRef::named("Root")),
        );
        assert_eq!(f.referenced_names().collect::<Vec<_>>(), vec!["Root"]);
    }
}
