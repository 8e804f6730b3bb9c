//! Emits the server file: nested per-tag routers, one handler per
//! operation with sequential parameter decode, and the dispatch into the
//! operation stubs.

use std::collections::BTreeSet;

use oxgen_core::config::GenOptions;
use oxgen_core::error::EmitError;
use oxgen_core::spec::{Operation, Parameter, ParameterLocation, SpecDocument};

use crate::naming::snake;
use crate::printer::{Printer, ln};

use super::operations::{
    BoundOperation, body_model, collect_operations, group_by_tag, param_rust_type,
};

/// Rewrite a spec path into the route registered under its tag group:
/// the tag prefix is stripped (whole segment only), brace-delimited
/// segments become axum captures, and an empty remainder is the group
/// root.
pub fn route_path(tag: &str, path: &str) -> String {
    let prefix = format!("/{tag}");
    let stripped = match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    if stripped.is_empty() {
        return "/".to_string();
    }

    stripped
        .split('/')
        .map(|seg| {
            match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(inner) => format!("{{{inner}}}"),
                None => seg.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Render the server file for the whole document.
pub fn emit_server(doc: &SpecDocument, options: &GenOptions) -> Result<String, EmitError> {
    let ops = collect_operations(doc, &options.include)?;
    let groups = group_by_tag(&ops)?;

    let mut p = Printer::new();
    ln!(p, "// Code generated by oxgen. DO NOT EDIT.");
    p.blank();
    emit_imports(&mut p, &ops, options);

    // Top-level router nesting one sub-router per tag group.
    p.blank();
    ln!(p, "pub fn router() -> Router {");
    if groups.is_empty() {
        ln!(p, "    Router::new()");
    } else {
        ln!(p, "    Router::new()");
        for tag in groups.keys() {
            ln!(p, "        .nest(\"/", tag, "\", ", snake(tag), "_routes())");
        }
    }
    ln!(p, "}");

    for (tag, group) in &groups {
        p.blank();
        ln!(p, "fn ", snake(tag), "_routes() -> Router {");
        ln!(p, "    Router::new()");
        for bound in group {
            ln!(
                p,
                "        .route(\"",
                route_path(tag, bound.path),
                "\", ",
                bound.method.axum_service(),
                "(",
                snake(&bound.op.id),
                "_handler))"
            );
        }
        ln!(p, "}");
    }

    for group in groups.values() {
        for bound in group {
            emit_handler(&mut p, bound, options);
        }
    }

    Ok(p.finish())
}

fn emit_imports(p: &mut Printer, ops: &[BoundOperation<'_>], options: &GenOptions) {
    let mut any_path = false;
    let mut any_query = false;
    let mut any_form = false;
    let mut needs_validation = false;
    let mut methods = BTreeSet::new();
    let mut body_models = BTreeSet::new();

    for bound in ops {
        methods.insert(bound.method.axum_service());
        for param in &bound.op.parameters {
            match param.location {
                ParameterLocation::Path => any_path = true,
                ParameterLocation::Query => any_query = true,
                ParameterLocation::FormData => any_form = true,
                ParameterLocation::Body => {
                    if let Some(model) = body_model(param) {
                        body_models.insert(model.to_string());
                    }
                }
            }
            if param.location != ParameterLocation::Body
                && (param.required || !param.is_string())
            {
                needs_validation = true;
            }
        }
    }

    if any_path || any_query || any_form {
        ln!(p, "use std::collections::HashMap;");
        p.blank();
    }

    ln!(p, "use axum::Json;");
    ln!(p, "use axum::Router;");
    let mut extractors = Vec::new();
    if any_form {
        extractors.push("Form");
    }
    if any_path {
        extractors.push("Path");
    }
    if any_query {
        extractors.push("Query");
    }
    if !extractors.is_empty() {
        ln!(p, "use axum::extract::{", extractors.join(", "), "};");
    }
    ln!(p, "use axum::http::StatusCode;");
    ln!(p, "use axum::response::{IntoResponse, Response};");
    if !methods.is_empty() {
        ln!(
            p,
            "use axum::routing::{",
            methods.into_iter().collect::<Vec<_>>().join(", "),
            "};"
        );
    }
    if needs_validation {
        ln!(p, "use oxgen_support::validate::Validation;");
    }

    p.blank();
    if !body_models.is_empty() {
        ln!(
            p,
            "use crate::",
            &options.model_module,
            "::{",
            body_models.into_iter().collect::<Vec<_>>().join(", "),
            "};"
        );
    }
    ln!(p, "use crate::", &options.operations_module, ";");
}

fn emit_handler(p: &mut Printer, bound: &BoundOperation<'_>, options: &GenOptions) {
    let op = bound.op;
    let has_path = has_location(op, ParameterLocation::Path);
    let has_query = has_location(op, ParameterLocation::Query);
    let has_form = has_location(op, ParameterLocation::FormData);
    let body = op
        .parameters
        .iter()
        .find(|param| param.location == ParameterLocation::Body);

    // Extractor order is fixed: the body consumer must come last.
    let mut args: Vec<String> = Vec::new();
    if has_path {
        args.push("Path(params): Path<HashMap<String, String>>".to_string());
    }
    if has_query {
        args.push("Query(query): Query<HashMap<String, String>>".to_string());
    }
    if has_form {
        args.push("Form(form): Form<HashMap<String, String>>".to_string());
    }
    if let Some(param) = body
        && let Some(model) = body_model(param)
    {
        args.push(format!("Json(body): Json<{model}>"));
    }

    p.blank();
    if args.is_empty() {
        ln!(p, "pub async fn ", snake(&op.id), "_handler() -> Response {");
    } else {
        ln!(p, "pub async fn ", snake(&op.id), "_handler(");
        for arg in &args {
            ln!(p, "    ", arg, ",");
        }
        ln!(p, ") -> Response {");
    }

    // Decode steps run in declared order; the first failure returns.
    for param in &op.parameters {
        match param.location {
            ParameterLocation::Body => {
                ln!(p, "    if let Err(err) = body.validate() {");
                ln!(
                    p,
                    "        return (StatusCode::BAD_REQUEST, Json(err)).into_response();"
                );
                ln!(p, "    }");
                p.blank();
            }
            ParameterLocation::Query => emit_value_decode(p, param, "query", "query"),
            ParameterLocation::FormData => emit_value_decode(p, param, "form", "formData"),
            ParameterLocation::Path => emit_path_decode(p, param),
        }
    }

    let mut call_args: Vec<String> = op
        .parameters
        .iter()
        .filter(|param| param.location != ParameterLocation::Body)
        .map(|param| snake(&param.name))
        .collect();
    if body.is_some() {
        call_args.push("&body".to_string());
    }
    let invocation = format!(
        "{}::{}({})",
        options.operations_module,
        snake(&op.id),
        call_args.join(", ")
    );

    match op.success_model() {
        Some(_) => {
            ln!(p, "    match ", &invocation, ".await {");
            ln!(
                p,
                "        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),"
            );
        }
        None => {
            ln!(p, "    match ", &invocation, ".await {");
            ln!(
                p,
                "        Ok(()) => (StatusCode::OK, \"Success\").into_response(),"
            );
        }
    }
    ln!(
        p,
        "        Err(err) => (StatusCode::BAD_REQUEST, Json(err)).into_response(),"
    );
    ln!(p, "    }");
    ln!(p, "}");
}

/// Query / form decode: read the named value; required and absent is a
/// client error; non-string values parse after the check.
fn emit_value_decode(p: &mut Printer, param: &Parameter, source: &str, location: &str) {
    let name = snake(&param.name);
    if param.is_string() {
        ln!(
            p,
            "    let ",
            &name,
            " = ",
            source,
            ".get(\"",
            &param.name,
            "\").cloned().unwrap_or_default();"
        );
        if param.required {
            emit_required_check(p, &name, &param.name, location);
        }
        p.blank();
    } else {
        let str_name = format!("str_{name}");
        ln!(
            p,
            "    let ",
            &str_name,
            " = ",
            source,
            ".get(\"",
            &param.name,
            "\").cloned().unwrap_or_default();"
        );
        if param.required {
            emit_required_check(p, &str_name, &param.name, location);
        }
        p.blank();
        emit_parse(p, param, &str_name, &name, location);
    }
}

/// Path decode: the route-bound value is always present; non-string
/// values still parse with an error on failure.
fn emit_path_decode(p: &mut Printer, param: &Parameter) {
    let name = snake(&param.name);
    if param.is_string() {
        ln!(
            p,
            "    let ",
            &name,
            " = params.get(\"",
            &param.name,
            "\").cloned().unwrap_or_default();"
        );
        p.blank();
    } else {
        let str_name = format!("str_{name}");
        ln!(
            p,
            "    let ",
            &str_name,
            " = params.get(\"",
            &param.name,
            "\").cloned().unwrap_or_default();"
        );
        emit_parse(p, param, &str_name, &name, "path");
    }
}

fn emit_required_check(p: &mut Printer, value_name: &str, spec_name: &str, location: &str) {
    ln!(p, "    if ", value_name, ".is_empty() {");
    ln!(
        p,
        "        return Validation::required(\"",
        spec_name,
        "\", \"",
        location,
        "\").into_response();"
    );
    ln!(p, "    }");
}

fn emit_parse(p: &mut Printer, param: &Parameter, str_name: &str, name: &str, location: &str) {
    ln!(
        p,
        "    let ",
        name,
        ": ",
        param_rust_type(param),
        " = match ",
        str_name,
        ".parse() {"
    );
    ln!(p, "        Ok(value) => value,");
    ln!(
        p,
        "        Err(_) => return Validation::invalid(\"",
        &param.name,
        "\", \"",
        location,
        "\", &",
        str_name,
        ").into_response(),"
    );
    ln!(p, "    };");
    p.blank();
}

fn has_location(op: &Operation, location: ParameterLocation) -> bool {
    op.parameters.iter().any(|param| param.location == location)
}
