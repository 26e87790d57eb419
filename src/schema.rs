//! Typed model of a swagger 2.0 schema document.
//!
//! Only the parts consulted by the generator are modelled. Unknown keys are
//! ignored. Maps keep the source key order so the generated output follows
//! the order of the input file.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub definitions: IndexMap<String, Definition>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub properties: IndexMap<String, Property>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// A named field of a definition or of an inline object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
}

impl Property {
    /// `title`, falling back to `description`. Empty strings count as absent.
    pub fn doc(&self) -> Option<&str> {
        non_empty(self.title.as_deref()).or_else(|| non_empty(self.description.as_deref()))
    }
}

/// A node of the schema type tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDescriptor")]
pub enum TypeDescriptor {
    Integer,
    Number,
    String,
    Array(Box<TypeDescriptor>),
    Object(IndexMap<String, Property>),
    /// `$ref`, as written in the document
    Reference(String),
    Unknown,
}

impl TypeDescriptor {
    /// Collects every `$ref` reachable from this descriptor.
    pub fn references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Array(items) => items.references(out),
            TypeDescriptor::Object(properties) => {
                for property in properties.values() {
                    property.descriptor.references(out);
                }
            }
            TypeDescriptor::Reference(reference) => out.push(reference),
            TypeDescriptor::Integer
            | TypeDescriptor::Number
            | TypeDescriptor::String
            | TypeDescriptor::Unknown => {}
        }
    }
}

#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(rename = "type")]
    kind: Option<String>,
    items: Option<Box<TypeDescriptor>>,
    properties: Option<IndexMap<String, Property>>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
}

impl From<RawDescriptor> for TypeDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        match raw.kind.as_deref() {
            Some("integer") => TypeDescriptor::Integer,
            Some("number") => TypeDescriptor::Number,
            Some("string") => TypeDescriptor::String,
            Some("array") => TypeDescriptor::Array(
                raw.items
                    .unwrap_or_else(|| Box::new(TypeDescriptor::Unknown)),
            ),
            Some("object") => TypeDescriptor::Object(raw.properties.unwrap_or_default()),
            _ => match raw.reference {
                Some(reference) => TypeDescriptor::Reference(reference),
                None => TypeDescriptor::Unknown,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
            Method::Head => "head",
            Method::Options => "options",
        }
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "delete" => Ok(Method::Delete),
            "patch" => Ok(Method::Patch),
            "head" => Ok(Method::Head),
            "options" => Ok(Method::Options),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operations of one path, in source order.
///
/// Keys that are not HTTP methods (path-level `parameters`, `$ref`,
/// `x-` extensions) are skipped.
#[derive(Debug, Default)]
pub struct PathItem {
    pub operations: Vec<(Method, Operation)>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of HTTP methods to operations")
            }

            fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut operations = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    match key.parse::<Method>() {
                        Ok(method) => operations.push((method, map.next_value::<Operation>()?)),
                        Err(()) => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(PathItem { operations })
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// `summary`, falling back to `description`.
    pub fn doc(&self) -> Option<&str> {
        non_empty(self.summary.as_deref()).or_else(|| non_empty(self.description.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in")]
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Body parameters carry their type here
    pub schema: Option<TypeDescriptor>,
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
}

impl Parameter {
    pub fn is_body(&self) -> bool {
        self.location.as_deref() == Some("body")
    }
}

#[derive(Debug, Deserialize)]
pub struct Response {
    pub schema: Option<TypeDescriptor>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
