use super::go_syntax::{
    named_children, parse_go, resolve_string, string_bindings, string_slice, string_slice_bindings, string_value, text, visit,
};
use crate::Result;
use crate::model::{Attribute, MetricDefinition};
use std::collections::HashMap;
use tree_sitter::Node;

/// Extract metrics declared with `prometheus.NewDesc(name, help, labels, …)`.
///
/// Names built with `prometheus.BuildFQName` are joined from their non-empty parts.
/// Identifiers are resolved against string constants and `[]string` variables declared
/// in the same file; anything unresolvable contributes nothing.
pub fn extract_descriptors(source: &str) -> Result<Vec<MetricDefinition>> {
    let tree = parse_go(source)?;
    let root = tree.root_node();
    let constants = string_bindings(root, source);
    let label_sets = string_slice_bindings(root, source);

    let mut definitions = Vec::new();
    visit(root, |node| {
        if node.kind() != "call_expression" || !is_prometheus_call(node, source, "NewDesc") {
            return;
        }

        let Some(arguments) = node.child_by_field_name("arguments").map(named_children) else {
            return;
        };

        let mut arguments = arguments.into_iter();
        let (Some(name), Some(help)) = (arguments.next(), arguments.next()) else {
            return;
        };

        let name = metric_name(name, source, &constants);
        if name.is_empty() {
            return;
        }

        let labels = arguments.next().map(|labels| resolve_labels(labels, source, &label_sets)).unwrap_or_default();

        let mut def = MetricDefinition::new(name).with_attributes(labels.into_iter().map(Attribute::string).collect());
        def.description = string_value(help, source);
        definitions.push(def);
    });

    Ok(definitions)
}

fn is_prometheus_call(call: Node<'_>, source: &str, function: &str) -> bool {
    let Some(callee) = call.child_by_field_name("function") else {
        return false;
    };

    if callee.kind() != "selector_expression" {
        return false;
    }

    let package = callee.child_by_field_name("operand").map(|n| text(n, source));
    let field = callee.child_by_field_name("field").map(|n| text(n, source));
    package == Some("prometheus") && field == Some(function)
}

fn metric_name(node: Node<'_>, source: &str, constants: &HashMap<String, String>) -> String {
    if node.kind() == "call_expression" && is_prometheus_call(node, source, "BuildFQName") {
        let parts = node.child_by_field_name("arguments").map(named_children).unwrap_or_default();
        if parts.len() != 3 {
            return String::new();
        }

        return parts
            .into_iter()
            .filter_map(|part| resolve_string(part, source, constants))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
    }

    resolve_string(node, source, constants).unwrap_or_default()
}

fn resolve_labels(node: Node<'_>, source: &str, label_sets: &HashMap<String, Vec<String>>) -> Vec<String> {
    if node.kind() == "identifier" {
        return label_sets.get(text(node, source)).cloned().unwrap_or_default();
    }

    string_slice(node, source).unwrap_or_default()
}
