use std::fs;
use std::path::Path;

use tracing::debug;

use crate::definitions::emit_definitions;
use crate::error::GenError;
use crate::mapper::TypeMapper;
use crate::naming::reference_target;
use crate::routes::{emit_routes, REQUEST_FN};
use crate::schema::{SchemaDocument, TypeDescriptor};

pub fn parse_swagger_file(file_path: &Path) -> Result<SchemaDocument, GenError> {
    let contents = fs::read_to_string(file_path).map_err(|e| GenError::ReadError {
        path: file_path.display().to_string(),
        source: e,
    })?;
    parse_swagger_str(&contents).map_err(|e| GenError::ParseError {
        path: file_path.display().to_string(),
        source: e,
    })
}

pub fn parse_swagger_str(contents: &str) -> Result<SchemaDocument, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Checks that every `$ref` in the document names an existing definition.
pub fn validate_references(doc: &SchemaDocument) -> Result<(), GenError> {
    for (name, definition) in &doc.definitions {
        for (prop_name, property) in &definition.properties {
            check_references(doc, &property.descriptor, || {
                format!("definitions.{}.properties.{}", name, prop_name)
            })?;
        }
    }

    for (path, item) in &doc.paths {
        for (method, operation) in &item.operations {
            for parameter in &operation.parameters {
                let location = || format!("paths.{}.{}.parameters.{}", path, method, parameter.name);
                check_references(doc, &parameter.descriptor, location)?;
                if let Some(schema) = &parameter.schema {
                    check_references(doc, schema, location)?;
                }
            }
            for (status, response) in &operation.responses {
                if let Some(schema) = &response.schema {
                    check_references(doc, schema, || {
                        format!("paths.{}.{}.responses.{}", path, method, status)
                    })?;
                }
            }
        }
    }

    Ok(())
}

fn check_references(
    doc: &SchemaDocument,
    descriptor: &TypeDescriptor,
    location: impl Fn() -> String,
) -> Result<(), GenError> {
    let mut refs = Vec::new();
    descriptor.references(&mut refs);
    for reference in refs {
        let resolved =
            reference_target(reference).is_some_and(|name| doc.definitions.contains_key(name));
        if !resolved {
            return Err(GenError::UnresolvedReference {
                reference: reference.to_string(),
                location: location(),
            });
        }
    }
    Ok(())
}

/// Translates a document into the text of a TypeScript module.
///
/// The output is the collaborator import, the interface block and the
/// request function block, separated by blank lines. Empty blocks are left
/// out.
pub fn generate_ts_from_swagger(
    doc: &SchemaDocument,
    request_path: &str,
    mapper: &TypeMapper,
) -> Result<String, GenError> {
    validate_references(doc)?;

    let definitions = emit_definitions(doc, mapper);
    let routes = emit_routes(doc, mapper)?;
    debug!(
        definitions = doc.definitions.len(),
        paths = doc.paths.len(),
        "translated schema document"
    );

    let import = format!("import {} from '{}'", REQUEST_FN, request_path);
    let mut ts = [import, definitions, routes]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect::<Vec<String>>()
        .join("\n\n");
    ts.push('\n');
    Ok(ts)
}
