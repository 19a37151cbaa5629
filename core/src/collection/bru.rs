#![deny(missing_docs)]

//! # Bru Rendering
//!
//! Renders collection parts into Bruno's on-disk text format:
//!
//! ```text
//! meta {
//!   name: List posts
//!   type: http
//!   seq: 1
//! }
//!
//! get {
//!   url: {{baseUrl}}/wp/v2/posts
//!   body: none
//!   auth: inherit
//! }
//! ```
//!
//! Disabled dictionary entries are prefixed with `~`. Text blocks (`body:json`,
//! `tests`, `docs`) are indented by two spaces.

use crate::collection::models::{
    AuthMode, BrunoConfig, Environment, FolderNode, ParamKind, RequestBody, RequestDescriptor,
};
use crate::error::AppResult;

const INDENT: &str = "  ";

/// Renders a request `.bru` file.
pub fn render_request(descriptor: &RequestDescriptor) -> String {
    let request = &descriptor.request;
    let mut code = String::new();

    let mut meta = vec![
        entry("name", &descriptor.name, true),
        entry("type", "http", true),
    ];
    if let Some(seq) = descriptor.seq {
        meta.push(entry("seq", &seq.to_string(), true));
    }
    code.push_str(&dictionary("meta", &meta));

    let verb = request.method.as_str().to_lowercase();
    code.push_str(&dictionary(
        &verb,
        &[
            entry("url", &request.url, true),
            entry("body", request.body.mode(), true),
            entry("auth", auth_mode(request.auth.mode), true),
        ],
    ));

    for (kind, block) in [(ParamKind::Query, "params:query"), (ParamKind::Path, "params:path")] {
        let params: Vec<String> = request
            .params
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| entry(&p.name, &p.value, p.enabled))
            .collect();
        if !params.is_empty() {
            code.push_str(&dictionary(block, &params));
        }
    }

    if !request.headers.is_empty() {
        let headers: Vec<String> = request
            .headers
            .iter()
            .map(|h| entry(&h.name, &h.value, h.enabled))
            .collect();
        code.push_str(&dictionary("headers", &headers));
    }

    if let RequestBody::Json { json } = &request.body {
        code.push_str(&text_block("body:json", json));
    }
    if !request.tests.trim().is_empty() {
        code.push_str(&text_block("tests", &request.tests));
    }
    if !request.docs.trim().is_empty() {
        code.push_str(&text_block("docs", &request.docs));
    }

    finish(code)
}

/// Renders an `environments/<name>.bru` file. Secret values are never
/// written; only their names are listed under `vars:secret`.
pub fn render_environment(environment: &Environment) -> String {
    let mut code = String::new();

    let vars: Vec<String> = environment
        .variables
        .iter()
        .filter(|v| !v.secret)
        .map(|v| entry(&v.name, &v.value, v.enabled))
        .collect();
    code.push_str(&dictionary("vars", &vars));

    let secrets: Vec<String> = environment
        .variables
        .iter()
        .filter(|v| v.secret)
        .map(|v| format!("{}{}{}", INDENT, disabled_prefix(v.enabled), v.name))
        .collect();
    if !secrets.is_empty() {
        code.push_str(&format!("vars:secret [\n{}\n]\n\n", secrets.join(",\n")));
    }

    finish(code)
}

/// Renders `collection.bru`: basic auth fed by the `username` and `password`
/// environment variables.
pub fn render_collection_root() -> String {
    let mut code = String::new();
    code.push_str(&dictionary(
        "auth",
        &[entry("mode", auth_mode(AuthMode::Basic), true)],
    ));
    code.push_str(&dictionary(
        "auth:basic",
        &[
            entry("username", "{{username}}", true),
            entry("password", "{{password}}", true),
        ],
    ));
    finish(code)
}

/// Renders a `folder.bru` file for a folder at the given sibling position.
pub fn render_folder(folder: &FolderNode, seq: u32) -> String {
    let seq = folder.seq.unwrap_or(seq);
    finish(dictionary(
        "meta",
        &[entry("name", &folder.name, true), entry("seq", &seq.to_string(), true)],
    ))
}

/// Renders `bruno.json`.
pub fn render_bruno_json(config: &BrunoConfig) -> AppResult<String> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    Ok(json)
}

fn auth_mode(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Inherit => "inherit",
        AuthMode::None => "none",
        AuthMode::Basic => "basic",
    }
}

fn disabled_prefix(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        "~"
    }
}

fn entry(key: &str, value: &str, enabled: bool) -> String {
    let line = format!("{}{}{}: {}", INDENT, disabled_prefix(enabled), key, value);
    line.trim_end().to_string()
}

fn dictionary(block: &str, entries: &[String]) -> String {
    let mut code = format!("{} {{\n", block);
    for line in entries {
        code.push_str(line);
        code.push('\n');
    }
    code.push_str("}\n\n");
    code
}

fn text_block(block: &str, text: &str) -> String {
    let mut code = format!("{} {{\n", block);
    for line in text.lines() {
        if line.is_empty() {
            code.push('\n');
        } else {
            code.push_str(&format!("{}{}\n", INDENT, line));
        }
    }
    code.push_str("}\n\n");
    code
}

/// Blocks are separated by one blank line; the file ends with one newline.
fn finish(mut code: String) -> String {
    while code.ends_with("\n\n") {
        code.pop();
    }
    code
}
