use crate::Result;
use crate::model::{InstrumentType, MetricDefinition};
use ra_ap_syntax::ast::{self, HasArgList, HasName};
use ra_ap_syntax::{AstNode, Edition, SourceFile, SyntaxNode};
use std::collections::HashMap;

/// Extract instruments created with `meter.<u64|i64|f64>_<kind>(name)`.
///
/// The parser recovers from syntax errors, so a damaged file still yields the calls in
/// the parts that could be parsed.
pub fn extract_meter_calls(source: &str) -> Result<Vec<MetricDefinition>> {
    let parse = SourceFile::parse(source, Edition::CURRENT);
    let root = parse.tree().syntax().clone();
    let constants = str_constants(&root);

    let mut definitions = Vec::new();
    for call in root.descendants().filter_map(ast::MethodCallExpr::cast) {
        let Some(method) = call.name_ref().map(|n| n.text().to_string()) else {
            continue;
        };

        let Some(instrument_type) = instrument_for_method(&method) else {
            continue;
        };

        let on_meter = call
            .receiver()
            .is_some_and(|receiver| compact_text(receiver.syntax()).ends_with("meter"));
        if !on_meter {
            continue;
        }

        let Some(name) = first_arg(&call).and_then(|arg| resolve_name(&arg, &constants)) else {
            continue;
        };

        let mut def = MetricDefinition::new(name).with_instrument_type(instrument_type);
        for (method, arg) in chained_calls(&call) {
            match method.as_str() {
                "with_description" => def.description = def.description.or_else(|| resolve_name(&arg, &constants)),
                "with_unit" => def.unit = def.unit.or_else(|| resolve_name(&arg, &constants)),
                _ => {}
            }
        }

        definitions.push(def);
    }

    Ok(definitions)
}

/// Map a meter method such as `f64_observable_up_down_counter` to its instrument type.
fn instrument_for_method(method: &str) -> Option<InstrumentType> {
    let kind = ["u64_", "i64_", "f64_"].iter().find_map(|prefix| method.strip_prefix(prefix))?;
    let kind = kind.strip_prefix("observable_").unwrap_or(kind);

    match kind {
        "counter" => Some(InstrumentType::Counter),
        "up_down_counter" => Some(InstrumentType::UpDownCounter),
        "histogram" => Some(InstrumentType::Histogram),
        "gauge" => Some(InstrumentType::Gauge),
        _ => None,
    }
}

/// `const NAME: &str = "…"` items anywhere in the file.
fn str_constants(root: &SyntaxNode) -> HashMap<String, String> {
    root.descendants()
        .filter_map(ast::Const::cast)
        .filter_map(|item| {
            let name = item.name()?.text().to_string();
            let value = match item.body()? {
                ast::Expr::Literal(literal) => string_literal(&literal)?,
                _ => return None,
            };
            Some((name, value))
        })
        .collect()
}

/// Method calls applied to the result of `call`, innermost first.
fn chained_calls(call: &ast::MethodCallExpr) -> Vec<(String, ast::Expr)> {
    let mut calls = Vec::new();
    let mut current = call.syntax().clone();

    while let Some(parent) = current.parent().and_then(ast::MethodCallExpr::cast) {
        if parent.receiver().map(|r| r.syntax().clone()).as_ref() != Some(&current) {
            break;
        }

        if let (Some(name), Some(arg)) = (parent.name_ref(), first_arg(&parent)) {
            calls.push((name.text().to_string(), arg));
        }

        current = parent.syntax().clone();
    }

    calls
}

fn first_arg(call: &impl HasArgList) -> Option<ast::Expr> {
    call.arg_list()?.args().next()
}

/// Resolve a string literal, a `Cow::from("…")`-style wrapper, a `"…".into()`, or a path to
/// a string constant.
fn resolve_name(expr: &ast::Expr, constants: &HashMap<String, String>) -> Option<String> {
    match expr {
        ast::Expr::Literal(literal) => string_literal(literal),
        ast::Expr::PathExpr(path) => {
            let text = compact_text(path.syntax());
            let last = text.rsplit("::").next().unwrap_or_default();
            constants.get(last).cloned()
        }
        ast::Expr::CallExpr(call) => {
            let callee = compact_text(call.expr()?.syntax());
            let wrapper = ["Cow::from", "Cow::Borrowed", "String::from", "Into::into"]
                .iter()
                .any(|w| callee.ends_with(w));
            if !wrapper {
                return None;
            }
            resolve_name(&first_arg(call)?, constants)
        }
        ast::Expr::MethodCallExpr(call) => {
            let method = call.name_ref()?.text().to_string();
            if !matches!(method.as_str(), "into" | "to_string" | "to_owned") {
                return None;
            }
            resolve_name(&call.receiver()?, constants)
        }
        ast::Expr::ParenExpr(paren) => resolve_name(&paren.expr()?, constants),
        ast::Expr::RefExpr(reference) => resolve_name(&reference.expr()?, constants),
        _ => None,
    }
}

fn string_literal(literal: &ast::Literal) -> Option<String> {
    let token = literal.token();
    let text = token.text();

    if let Some(raw) = text.strip_prefix('r') {
        let raw = raw.trim_matches('#');
        return raw.strip_prefix('"')?.strip_suffix('"').map(str::to_string);
    }

    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

fn compact_text(node: &SyntaxNode) -> String {
    node.text().to_string().split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r##"
use std::borrow::Cow;

const REQUEST_DURATION: &str = "http.server.request.duration";

pub struct Metrics {
    meter: Meter,
}

impl Metrics {
    fn new(meter: Meter) -> Self {
        let duration = meter
            .f64_histogram(REQUEST_DURATION)
            .with_description("Duration of HTTP server requests.")
            .with_unit("s")
            .build();

        let active = self.meter.i64_up_down_counter(Cow::from("http.server.active_requests")).build();
        let size = meter.u64_counter("http.server.request.body.size".into()).with_unit("By").build();
        let gauge = meter.f64_observable_gauge(r#"process.cpu.utilization"#).build();
        let unknown = meter.u64_counter(some_runtime_name()).build();
        let other = registry.u64_counter("not.from.a.meter").build();
        Self {}
    }
}
"##;

    #[test]
    fn test_meter_calls() {
        let defs = extract_meter_calls(SOURCE).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "http.server.request.duration",
                "http.server.active_requests",
                "http.server.request.body.size",
                "process.cpu.utilization"
            ]
        );
    }

    #[test]
    fn test_chain_metadata() {
        let defs = extract_meter_calls(SOURCE).unwrap();
        assert_eq!(defs[0].instrument_type, Some(InstrumentType::Histogram));
        assert_eq!(defs[0].description.as_deref(), Some("Duration of HTTP server requests."));
        assert_eq!(defs[0].unit.as_deref(), Some("s"));

        assert_eq!(defs[1].instrument_type, Some(InstrumentType::UpDownCounter));
        assert_eq!(defs[1].unit, None);

        assert_eq!(defs[2].instrument_type, Some(InstrumentType::Counter));
        assert_eq!(defs[2].unit.as_deref(), Some("By"));

        assert_eq!(defs[3].instrument_type, Some(InstrumentType::Gauge));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(instrument_for_method("u64_observable_counter"), Some(InstrumentType::Counter));
        assert_eq!(
            instrument_for_method("f64_observable_up_down_counter"),
            Some(InstrumentType::UpDownCounter)
        );
        assert_eq!(instrument_for_method("i64_gauge"), Some(InstrumentType::Gauge));
        assert_eq!(instrument_for_method("u32_counter"), None);
        assert_eq!(instrument_for_method("u64_summary"), None);
    }

    #[test]
    fn test_damaged_source_does_not_fail() {
        let defs = extract_meter_calls("fn broken( { meter.u64_counter(\"still.found\")").unwrap();
        assert!(defs.len() <= 1);
        assert!(extract_meter_calls("").unwrap().is_empty());
    }
}
