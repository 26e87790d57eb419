use tracing::warn;

use crate::comment::{doc_block, NO_DESCRIPTION, REQUIRED_MARKER};
use crate::error::GenError;
use crate::mapper::{TsType, TypeMapper};
use crate::naming::{property_key, request_function_name};
use crate::schema::{Method, Operation, SchemaDocument};

/// Name of the request collaborator every generated function delegates to.
pub const REQUEST_FN: &str = "customFetch";

/// Author tags in summaries start here and are cut off.
const AUTHOR_DELIMITER: &str = "\n@author";

/// Emits one request function per path and method, separated by blank lines.
pub fn emit_routes(doc: &SchemaDocument, mapper: &TypeMapper) -> Result<String, GenError> {
    let mut functions = Vec::new();
    for (path, item) in &doc.paths {
        for (method, operation) in &item.operations {
            functions.push(emit_route(path, *method, operation, mapper)?);
        }
    }
    Ok(functions.join("\n\n"))
}

pub fn emit_route(
    path: &str,
    method: Method,
    operation: &Operation,
    mapper: &TypeMapper,
) -> Result<String, GenError> {
    let params = match method {
        Method::Post => body_type(path, operation, mapper)?,
        _ => query_type(operation, mapper),
    };
    let response = response_type(path, method, operation, mapper)?;
    let summary = operation
        .doc()
        .map(|doc| doc.split(AUTHOR_DELIMITER).next().unwrap_or(doc))
        .unwrap_or(NO_DESCRIPTION);
    let payload = match method {
        Method::Post => "body",
        _ => "query",
    };

    let mut ts = doc_block(summary, "");
    ts.push_str(&format!(
        "export const {} = (params: {}): Promise<{{ body: {} }}> => {{\n",
        request_function_name(method.as_str(), path),
        params,
        response
    ));
    ts.push_str(&format!("  return {}({{\n", REQUEST_FN));
    ts.push_str(&format!("    url: '{}',\n", path));
    ts.push_str(&format!("    method: '{}',\n", method));
    ts.push_str(&format!("    {}: params,\n", payload));
    ts.push_str("  })\n}");
    Ok(ts)
}

// post sends its `in: body` parameter as the request body, or failing that
// the first parameter carrying a schema
fn body_type(path: &str, operation: &Operation, mapper: &TypeMapper) -> Result<String, GenError> {
    let parameters = &operation.parameters;
    let schema = parameters
        .iter()
        .filter(|p| p.is_body())
        .chain(parameters.iter())
        .find_map(|p| p.schema.as_ref())
        .ok_or_else(|| GenError::MissingBodySchema {
            path: path.to_string(),
        })?;
    let ty = mapper.map(schema, None);
    if !ty.is_resolved() {
        warn!(path, "unresolved body type");
    }
    Ok(ty.to_string())
}

fn query_type(operation: &Operation, mapper: &TypeMapper) -> String {
    if operation.parameters.is_empty() {
        return "{}".to_string();
    }

    let mut ts = String::from("{\n");
    for parameter in &operation.parameters {
        let description = parameter.description.as_deref().filter(|d| !d.is_empty());
        let is_required =
            parameter.required || description.is_some_and(|d| d.contains(REQUIRED_MARKER));

        let param_type = mapper.map_parameter(parameter);
        if !param_type.is_resolved() {
            warn!(parameter = %parameter.name, "unresolved parameter type");
        }

        ts.push_str(&doc_block(description.unwrap_or(NO_DESCRIPTION), "  "));
        ts.push_str(&format!(
            "  {}{}: {}\n",
            property_key(&parameter.name),
            if is_required { "" } else { "?" },
            param_type
        ));
    }
    ts.push('}');
    ts
}

fn response_type(
    path: &str,
    method: Method,
    operation: &Operation,
    mapper: &TypeMapper,
) -> Result<TsType, GenError> {
    operation
        .responses
        .get("200")
        .and_then(|response| response.schema.as_ref())
        .map(|schema| mapper.map(schema, None))
        .ok_or_else(|| GenError::MissingSuccessResponse {
            method: method.to_string(),
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(json: &str) -> Operation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn post_takes_the_body_type() {
        let op = operation(
            r##"{
                "summary": "save user\n@author someone",
                "parameters": [{"in": "body", "name": "req", "schema": {"$ref": "#/definitions/user.SaveReq"}}],
                "responses": {"200": {"schema": {"$ref": "#/definitions/user.SaveResp"}}}
            }"##,
        );
        let ts = emit_route("/api/v1/user/save", Method::Post, &op, &TypeMapper::default()).unwrap();
        assert_eq!(
            ts,
            "/**\n\
             \x20* save user\n\
             \x20*/\n\
             export const postUserSave = (params: userSaveReq): Promise<{ body: userSaveResp }> => {\n\
             \x20 return customFetch({\n\
             \x20   url: '/api/v1/user/save',\n\
             \x20   method: 'post',\n\
             \x20   body: params,\n\
             \x20 })\n\
             }"
        );
    }

    #[test]
    fn post_prefers_the_body_parameter() {
        let op = operation(
            r##"{
                "parameters": [
                    {"in": "formData", "name": "meta", "schema": {"$ref": "#/definitions/Meta"}},
                    {"in": "body", "name": "req", "schema": {"$ref": "#/definitions/Upload"}}
                ],
                "responses": {"200": {"schema": {"$ref": "#/definitions/Ok"}}}
            }"##,
        );
        let ts = emit_route("/v1/file/upload", Method::Post, &op, &TypeMapper::default()).unwrap();
        assert!(ts.contains("export const postFileUpload = (params: Upload): Promise<{ body: Ok }>"));
    }

    #[test]
    fn get_synthesizes_a_query_type() {
        let op = operation(
            r##"{
                "summary": "list users",
                "parameters": [
                    {"in": "query", "name": "page", "type": "integer", "description": "page number"},
                    {"in": "query", "name": "userId", "type": "integer", "required": true},
                    {"in": "query", "name": "filter.name", "type": "string", "description": "name filter\n@required"}
                ],
                "responses": {"200": {"schema": {"$ref": "#/definitions/UserList"}}}
            }"##,
        );
        let ts = emit_route("/api/v1/user-info/list", Method::Get, &op, &TypeMapper::default())
            .unwrap();
        assert_eq!(
            ts,
            "/**\n\
             \x20* list users\n\
             \x20*/\n\
             export const getUserInfoList = (params: {\n\
             \x20 /**\n\
             \x20  * page number\n\
             \x20  */\n\
             \x20 page?: number\n\
             \x20 /**\n\
             \x20  * no description\n\
             \x20  */\n\
             \x20 userId: string\n\
             \x20 /**\n\
             \x20  * name filter\n\
             \x20  * @required\n\
             \x20  */\n\
             \x20 'filter.name': string\n\
             }): Promise<{ body: UserList }> => {\n\
             \x20 return customFetch({\n\
             \x20   url: '/api/v1/user-info/list',\n\
             \x20   method: 'get',\n\
             \x20   query: params,\n\
             \x20 })\n\
             }"
        );
    }

    #[test]
    fn get_without_parameters_takes_empty_object() {
        let op = operation(
            r##"{"responses": {"200": {"schema": {"$ref": "#/definitions/Ping"}}}}"##,
        );
        let ts = emit_route("/v1/ping", Method::Get, &op, &TypeMapper::default()).unwrap();
        assert!(ts.contains("export const getPing = (params: {}): Promise<{ body: Ping }>"));
        assert!(ts.starts_with("/**\n * no description\n */\n"));
    }

    #[test]
    fn post_without_body_schema_fails() {
        let op = operation(
            r##"{
                "parameters": [{"in": "query", "name": "id", "type": "string"}],
                "responses": {"200": {"schema": {"$ref": "#/definitions/Ok"}}}
            }"##,
        );
        let err = emit_route("/v1/thing", Method::Post, &op, &TypeMapper::default()).unwrap_err();
        assert!(matches!(err, GenError::MissingBodySchema { ref path } if path == "/v1/thing"));
    }

    #[test]
    fn missing_success_response_fails() {
        let op = operation(r#"{"responses": {"404": {"description": "nope"}}}"#);
        let err = emit_route("/v1/thing", Method::Get, &op, &TypeMapper::default()).unwrap_err();
        assert!(matches!(err, GenError::MissingSuccessResponse { ref method, .. } if method == "get"));
    }

    #[test]
    fn every_method_of_a_path_is_emitted() {
        let doc: SchemaDocument = serde_json::from_str(
            r##"{"paths": {"/v1/item": {
                "get": {"responses": {"200": {"schema": {"$ref": "#/definitions/Item"}}}},
                "delete": {"responses": {"200": {"schema": {"$ref": "#/definitions/Item"}}}}
            }}}"##,
        )
        .unwrap();
        let ts = emit_routes(&doc, &TypeMapper::default()).unwrap();
        let get = ts.find("export const getItem").unwrap();
        let delete = ts.find("export const deleteItem").unwrap();
        assert!(get < delete);
    }
}
