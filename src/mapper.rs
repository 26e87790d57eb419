use std::fmt;

use crate::naming::{property_key, reference_type_name};
use crate::schema::{Parameter, TypeDescriptor};

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    Number,
    String,
    /// An interface generated from `definitions`
    Named(String),
    Array(Box<TsType>),
    /// Inline structural type, members in source order
    Object(Vec<(String, TsType)>),
    /// The descriptor could not be mapped; renders as `undefined`
    Unresolved,
}

impl TsType {
    pub fn is_resolved(&self) -> bool {
        match self {
            TsType::Unresolved => false,
            TsType::Array(inner) => inner.is_resolved(),
            TsType::Object(members) => members.iter().all(|(_, t)| t.is_resolved()),
            TsType::Number | TsType::String | TsType::Named(_) => true,
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsType::Number => f.write_str("number"),
            TsType::String => f.write_str("string"),
            TsType::Named(name) => f.write_str(name),
            TsType::Array(inner) => write!(f, "{}[]", inner),
            TsType::Object(members) if members.is_empty() => f.write_str("{}"),
            TsType::Object(members) => {
                f.write_str("{ ")?;
                for (i, (name, member)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}: {}", property_key(name), member)?;
                }
                f.write_str(" }")
            }
            TsType::Unresolved => f.write_str("undefined"),
        }
    }
}

/// How integer fields that look like identifiers are typed.
///
/// With `AsString`, an integer whose field name contains `id` (any case) maps
/// to `string` so 64-bit ids survive JSON number precision. The match is a
/// plain substring test: `width` and `valid` count too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    #[default]
    AsString,
    AsNumber,
}

impl IdPolicy {
    fn integer_type(self, name: Option<&str>) -> TsType {
        let looks_like_id = name.is_some_and(|n| n.to_ascii_lowercase().contains("id"));
        match self {
            IdPolicy::AsString if looks_like_id => TsType::String,
            _ => TsType::Number,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper {
    id_policy: IdPolicy,
}

impl TypeMapper {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self { id_policy }
    }

    /// Maps a descriptor to a TypeScript type.
    ///
    /// `name` is the field or parameter the descriptor belongs to; array
    /// items inherit it.
    pub fn map(&self, descriptor: &TypeDescriptor, name: Option<&str>) -> TsType {
        match descriptor {
            TypeDescriptor::Integer => self.id_policy.integer_type(name),
            TypeDescriptor::Number => TsType::Number,
            TypeDescriptor::String => TsType::String,
            TypeDescriptor::Array(items) => match self.map(items, name) {
                TsType::Unresolved => TsType::Unresolved,
                inner => TsType::Array(Box::new(inner)),
            },
            TypeDescriptor::Object(properties) => TsType::Object(
                properties
                    .iter()
                    .map(|(key, property)| (key.clone(), self.map(&property.descriptor, Some(key))))
                    .collect(),
            ),
            TypeDescriptor::Reference(reference) => TsType::Named(reference_type_name(reference)),
            TypeDescriptor::Unknown => TsType::Unresolved,
        }
    }

    /// Maps a query parameter's inline type, using its name for the id policy.
    pub fn map_parameter(&self, parameter: &Parameter) -> TsType {
        self.map(&parameter.descriptor, Some(&parameter.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str) -> TypeDescriptor {
        serde_json::from_str(json).unwrap()
    }

    fn parameter(json: &str) -> Parameter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn string_maps_to_string() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(&descriptor(r#"{"type": "string"}"#), Some("userId"));
        assert_eq!(ty.to_string(), "string");
    }

    #[test]
    fn number_maps_to_number() {
        let mapper = TypeMapper::default();
        assert_eq!(
            mapper.map(&descriptor(r#"{"type": "number"}"#), Some("id")),
            TsType::Number
        );
    }

    #[test]
    fn integer_ids_map_to_string() {
        let mapper = TypeMapper::default();
        let user_id = parameter(r#"{"type": "integer", "name": "userId"}"#);
        let count = parameter(r#"{"type": "integer", "name": "count"}"#);
        assert_eq!(mapper.map_parameter(&user_id).to_string(), "string");
        assert_eq!(mapper.map_parameter(&count).to_string(), "number");
    }

    #[test]
    fn id_heuristic_is_a_plain_substring_match() {
        let mapper = TypeMapper::default();
        let width = descriptor(r#"{"type": "integer"}"#);
        assert_eq!(mapper.map(&width, Some("width")), TsType::String);
        assert_eq!(mapper.map(&width, Some("ID")), TsType::String);
        assert_eq!(mapper.map(&width, None), TsType::Number);
    }

    #[test]
    fn numeric_id_policy_keeps_numbers() {
        let mapper = TypeMapper::new(IdPolicy::AsNumber);
        let user_id = parameter(r#"{"type": "integer", "name": "userId"}"#);
        assert_eq!(mapper.map_parameter(&user_id), TsType::Number);
    }

    #[test]
    fn array_of_dotted_ref() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(
            &descriptor(r##"{"type": "array", "items": {"$ref": "#/definitions/Foo.Bar"}}"##),
            None,
        );
        assert_eq!(ty.to_string(), "FooBar[]");
    }

    #[test]
    fn array_items_inherit_field_name() {
        let mapper = TypeMapper::default();
        let ids = descriptor(r#"{"type": "array", "items": {"type": "integer"}}"#);
        assert_eq!(mapper.map(&ids, Some("userIds")).to_string(), "string[]");
        assert_eq!(mapper.map(&ids, Some("scores")).to_string(), "number[]");
    }

    #[test]
    fn array_of_unknown_is_unresolved() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(&descriptor(r#"{"type": "array"}"#), None);
        assert_eq!(ty, TsType::Unresolved);
        assert_eq!(ty.to_string(), "undefined");
    }

    #[test]
    fn object_maps_properties_inline() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(
            &descriptor(
                r##"{"type": "object", "properties": {
                    "name": {"type": "string"},
                    "ownerId": {"type": "integer"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "page.size": {"type": "integer"},
                    "owner": {"$ref": "#/definitions/user.User"}
                }}"##,
            ),
            None,
        );
        assert_eq!(
            ty.to_string(),
            "{ name: string; ownerId: string; tags: string[]; 'page.size': number; owner: userUser }"
        );
    }

    #[test]
    fn empty_object() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(&descriptor(r#"{"type": "object"}"#), None);
        assert_eq!(ty.to_string(), "{}");
    }

    #[test]
    fn bare_reference() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(&descriptor(r##"{"$ref": "#/definitions/order_detail"}"##), None);
        assert_eq!(ty, TsType::Named("orderDetail".to_string()));
    }

    #[test]
    fn unknown_type_is_unresolved() {
        let mapper = TypeMapper::default();
        let ty = mapper.map(&descriptor(r#"{"type": "boolean"}"#), None);
        assert!(!ty.is_resolved());
    }

    #[test]
    fn nested_unresolved_is_detected() {
        let ty = TsType::Object(vec![("flag".to_string(), TsType::Unresolved)]);
        assert!(!ty.is_resolved());
        assert_eq!(ty.to_string(), "{ flag: undefined }");
    }
}
