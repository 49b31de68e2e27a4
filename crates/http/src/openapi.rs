//! OpenAPI document assembled from module fragments

use bookstore_kernel::ModuleRegistry;
use serde_json::{json, Value};

/// Merge every module's OpenAPI fragment into one document.
///
/// Module paths are prefixed with `{api_prefix}/{module_name}`; a module path
/// of `/` maps to the bare mount point.
pub fn merged_document(registry: &ModuleRegistry, api_prefix: &str) -> Value {
    let mut document = json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Bookstore API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Catalog of books and authors with session-based auth"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": error_schema()
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let suffix = if path == "/" { "" } else { path.as_str() };
                let full = format!("{}/{}{}", api_prefix.trim_end_matches('/'), module.name(), suffix);
                document["paths"][full] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                document["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    document
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    })
}
