#![deny(missing_docs)]

//! # Collection Validation
//!
//! Structural checks a Bruno collection document must pass before it is
//! written. The first violation is reported with its JSON path, e.g.
//! `items[0].items[2].request.method`.

use crate::collection::models::{COLLECTION_VERSION, UID_LENGTH};
use crate::error::{AppError, AppResult};
use serde_json::Value;

const ITEM_TYPES: [&str; 2] = ["http-request", "folder"];
const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD"];
const BODY_MODES: [&str; 7] = [
    "none",
    "json",
    "text",
    "xml",
    "formUrlEncoded",
    "multipartForm",
    "graphql",
];
const PARAM_TYPES: [&str; 2] = ["path", "query"];
const AUTH_MODES: [&str; 3] = ["inherit", "none", "basic"];

/// Validates an entire collection document.
pub fn validate_collection(collection: &Value) -> AppResult<()> {
    let root = collection
        .as_object()
        .ok_or_else(|| invalid("$", "collection must be an object"))?;

    match root.get("version").and_then(Value::as_str) {
        Some(COLLECTION_VERSION) => {}
        other => {
            return Err(invalid(
                "version",
                &format!("expected \"{}\", found {:?}", COLLECTION_VERSION, other),
            ))
        }
    }
    validate_uid(collection, "")?;
    validate_name(collection, "")?;

    let items = array_at(collection, "items", "items")?;
    validate_items(items, "items")?;

    let environments = array_at(collection, "environments", "environments")?;
    for (i, env) in environments.iter().enumerate() {
        let path = format!("environments[{}]", i);
        validate_uid(env, &path)?;
        validate_name(env, &path)?;
        let variables = array_at(env, "variables", &format!("{}.variables", path))?;
        for (j, var) in variables.iter().enumerate() {
            let var_path = format!("{}.variables[{}]", path, j);
            validate_uid(var, &var_path)?;
            validate_name(var, &var_path)?;
            if var.get("type").and_then(Value::as_str) != Some("text") {
                return Err(invalid(&format!("{}.type", var_path), "must be \"text\""));
            }
            for flag in ["enabled", "secret"] {
                if !var.get(flag).is_some_and(Value::is_boolean) {
                    return Err(invalid(&format!("{}.{}", var_path, flag), "must be a boolean"));
                }
            }
        }
    }

    Ok(())
}

fn validate_items(items: &[Value], path: &str) -> AppResult<()> {
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, i);
        validate_uid(item, &item_path)?;
        validate_name(item, &item_path)?;

        let item_type = item.get("type").and_then(Value::as_str);
        if !item_type.is_some_and(|t| ITEM_TYPES.contains(&t)) {
            return Err(invalid(
                &format!("{}.type", item_path),
                &format!("unknown item type {:?}", item_type),
            ));
        }

        if let Some(seq) = item.get("seq") {
            if !seq.is_u64() || seq.as_u64() == Some(0) {
                return Err(invalid(&format!("{}.seq", item_path), "must be a positive integer"));
            }
        }

        if item_type == Some("folder") {
            let children = array_at(item, "items", &format!("{}.items", item_path))?;
            validate_items(children, &format!("{}.items", item_path))?;
        } else {
            validate_request(item, &format!("{}.request", item_path))?;
        }
    }
    Ok(())
}

fn validate_request(item: &Value, path: &str) -> AppResult<()> {
    let request = item
        .get("request")
        .filter(|r| r.is_object())
        .ok_or_else(|| invalid(path, "request must be an object"))?;

    if !request.get("url").is_some_and(Value::is_string) {
        return Err(invalid(&format!("{}.url", path), "must be a string"));
    }
    one_of(request, "method", &HTTP_METHODS, path)?;

    let body = request
        .get("body")
        .ok_or_else(|| invalid(&format!("{}.body", path), "is required"))?;
    one_of(body, "mode", &BODY_MODES, &format!("{}.body", path))?;
    if body.get("mode").and_then(Value::as_str) == Some("json")
        && !body.get("json").is_some_and(Value::is_string)
    {
        return Err(invalid(&format!("{}.body.json", path), "must be a string"));
    }

    let auth = request
        .get("auth")
        .ok_or_else(|| invalid(&format!("{}.auth", path), "is required"))?;
    one_of(auth, "mode", &AUTH_MODES, &format!("{}.auth", path))?;

    if let Some(params) = request.get("params") {
        let params = params
            .as_array()
            .ok_or_else(|| invalid(&format!("{}.params", path), "must be an array"))?;
        for (i, param) in params.iter().enumerate() {
            let param_path = format!("{}.params[{}]", path, i);
            validate_uid(param, &param_path)?;
            validate_name(param, &param_path)?;
            one_of(param, "type", &PARAM_TYPES, &param_path)?;
        }
    }

    if let Some(headers) = request.get("headers") {
        let headers = headers
            .as_array()
            .ok_or_else(|| invalid(&format!("{}.headers", path), "must be an array"))?;
        for (i, header) in headers.iter().enumerate() {
            let header_path = format!("{}.headers[{}]", path, i);
            validate_uid(header, &header_path)?;
            validate_name(header, &header_path)?;
        }
    }

    Ok(())
}

fn validate_uid(value: &Value, path: &str) -> AppResult<()> {
    let uid = value.get("uid").and_then(Value::as_str);
    let valid = uid.is_some_and(|uid| {
        uid.len() == UID_LENGTH && uid.chars().all(|c| c.is_ascii_alphanumeric())
    });
    if valid {
        Ok(())
    } else {
        Err(invalid(
            &join(path, "uid"),
            &format!("must be {} alphanumeric characters", UID_LENGTH),
        ))
    }
}

fn validate_name(value: &Value, path: &str) -> AppResult<()> {
    match value.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(invalid(&join(path, "name"), "must be a non-empty string")),
    }
}

fn one_of(value: &Value, key: &str, allowed: &[&str], path: &str) -> AppResult<()> {
    let found = value.get(key).and_then(Value::as_str);
    if found.is_some_and(|f| allowed.contains(&f)) {
        Ok(())
    } else {
        Err(invalid(
            &join(path, key),
            &format!("expected one of {:?}, found {:?}", allowed, found),
        ))
    }
}

fn array_at<'a>(value: &'a Value, key: &str, path: &str) -> AppResult<&'a Vec<Value>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(path, "must be an array"))
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn invalid(path: &str, detail: &str) -> AppError {
    AppError::General(format!("Invalid collection at '{}': {}", path, detail))
}
