use tracing::warn;

use crate::comment::{doc_block, NO_DESCRIPTION, REQUIRED_MARKER};
use crate::mapper::TypeMapper;
use crate::naming::{definition_type_name, property_key};
use crate::schema::{Definition, SchemaDocument};

/// Emits one interface per definition, separated by blank lines.
pub fn emit_definitions(doc: &SchemaDocument, mapper: &TypeMapper) -> String {
    doc.definitions
        .iter()
        .map(|(name, definition)| emit_interface(name, definition, mapper))
        .collect::<Vec<String>>()
        .join("\n\n")
}

pub fn emit_interface(name: &str, definition: &Definition, mapper: &TypeMapper) -> String {
    let interface_name = definition_type_name(name);
    if definition.properties.is_empty() {
        return format!("export interface {} {{}}", interface_name);
    }

    let mut ts = format!("export interface {} {{\n", interface_name);
    for (prop_name, property) in &definition.properties {
        let doc = property.doc();
        let is_required = doc.is_some_and(|d| d.contains(REQUIRED_MARKER))
            || definition.required.iter().any(|r| r == prop_name);

        let prop_type = mapper.map(&property.descriptor, Some(prop_name));
        if !prop_type.is_resolved() {
            warn!(definition = name, property = %prop_name, "unresolved property type");
        }

        ts.push_str(&doc_block(doc.unwrap_or(NO_DESCRIPTION), "  "));
        ts.push_str(&format!(
            "  {}{}: {}\n",
            property_key(prop_name),
            if is_required { "" } else { "?" },
            prop_type
        ));
    }
    ts.push('}');
    ts
}
