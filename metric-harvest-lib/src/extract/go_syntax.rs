//! Shared helpers over the Go syntax tree

use crate::Result;
use ohno::{IntoAppError, bail};
use std::collections::HashMap;
use tree_sitter::{Node, Parser, Tree};

/// Parse Go source, failing when the parser reports any syntax error.
pub fn parse_go(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .into_app_err("loading the Go grammar")?;

    let tree = parser.parse(source, None).into_app_err("the Go parser produced no tree")?;
    if tree.root_node().has_error() {
        bail!("Go source contains syntax errors");
    }

    Ok(tree)
}

/// Visit every named node below `root` in source order.
pub fn visit<'t>(root: Node<'t>, mut f: impl FnMut(Node<'t>)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        f(node);
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).filter(|n| n.kind() != "comment").collect()
}

/// Look through the `literal_element` wrappers of composite literal entries.
pub fn unwrap_element(node: Node<'_>) -> Node<'_> {
    if node.kind() == "literal_element"
        && let Some(inner) = named_children(node).into_iter().next()
    {
        return inner;
    }

    node
}

/// The value of a string literal, or of a `+` concatenation of string literals.
pub fn string_value(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "interpreted_string_literal" => Some(unescape(text(node, source).trim_matches('"'))),
        "raw_string_literal" => Some(text(node, source).trim_matches('`').to_string()),
        "parenthesized_expression" => named_children(node)
            .into_iter()
            .next()
            .and_then(|inner| string_value(inner, source)),
        "binary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            if text(operator, source) != "+" {
                return None;
            }

            let left = string_value(node.child_by_field_name("left")?, source)?;
            let right = string_value(node.child_by_field_name("right")?, source)?;
            Some(left + &right)
        }
        _ => None,
    }
}

/// Resolve a string-valued expression, consulting `bindings` for identifiers.
pub fn resolve_string(node: Node<'_>, source: &str, bindings: &HashMap<String, String>) -> Option<String> {
    if node.kind() == "identifier" {
        return bindings.get(text(node, source)).cloned();
    }

    string_value(node, source)
}

/// The elements of a `[]string{…}` literal.
pub fn string_slice(node: Node<'_>, source: &str) -> Option<Vec<String>> {
    if node.kind() != "composite_literal" {
        return None;
    }

    let body = node.child_by_field_name("body")?;
    Some(
        named_children(body)
            .into_iter()
            .filter_map(|element| string_value(unwrap_element(element), source))
            .collect(),
    )
}

/// The name of the last selector in an expression such as `prometheus.CounterValue`.
pub fn selector_name<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        "selector_expression" => node.child_by_field_name("field").map(|field| text(field, source)),
        "identifier" => Some(text(node, source)),
        _ => None,
    }
}

/// String constants and variables declared at the top level of a file.
pub fn string_bindings(root: Node<'_>, source: &str) -> HashMap<String, String> {
    let mut bindings = HashMap::new();

    visit(root, |node| {
        if matches!(node.kind(), "const_spec" | "var_spec") && is_top_level(node) {
            for (name, value) in spec_pairs(node, source) {
                if let Some(value) = string_value(value, source) {
                    let _ = bindings.insert(name, value);
                }
            }
        }
    });

    bindings
}

/// Identifiers bound to a `[]string{…}` literal anywhere in a file.
pub fn string_slice_bindings(root: Node<'_>, source: &str) -> HashMap<String, Vec<String>> {
    let mut bindings = HashMap::new();

    visit(root, |node| {
        let pairs = match node.kind() {
            "var_spec" => spec_pairs(node, source),
            "short_var_declaration" | "assignment_statement" => assignment_pairs(node, source),
            _ => return,
        };

        for (name, value) in pairs {
            if let Some(values) = string_slice(value, source) {
                let _ = bindings.insert(name, values);
            }
        }
    });

    bindings
}

fn is_top_level(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if matches!(parent.kind(), "function_declaration" | "method_declaration" | "func_literal") {
            return false;
        }

        current = parent.parent();
    }

    true
}

pub fn spec_pairs<'t>(spec: Node<'t>, source: &str) -> Vec<(String, Node<'t>)> {
    let mut cursor = spec.walk();
    let names: Vec<String> = spec
        .children_by_field_name("name", &mut cursor)
        .filter(|name| name.kind() == "identifier")
        .map(|name| text(name, source).to_string())
        .collect();

    let values = spec.child_by_field_name("value").map(named_children).unwrap_or_default();
    names.into_iter().zip(values).collect()
}

fn assignment_pairs<'t>(statement: Node<'t>, source: &str) -> Vec<(String, Node<'t>)> {
    let (Some(left), Some(right)) = (statement.child_by_field_name("left"), statement.child_by_field_name("right")) else {
        return Vec::new();
    };

    named_children(left)
        .into_iter()
        .zip(named_children(right))
        .filter(|(name, _)| name.kind() == "identifier")
        .map(|(name, value)| (text(name, source).to_string(), value))
        .collect()
}

/// Undo the common Go escape sequences.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
package collector

const namespace = "pg"
const (
    subsystem, other = "database", "x"
)

var defaultLabels = []string{"datname", "server"}

func build() {
    const local = "ignored"
    labels := []string{"a", "b"}
    _ = labels
    _ = "plain" + "joined"
}
"#;

    #[test]
    fn test_parse_rejects_syntax_errors() {
        parse_go(SOURCE).unwrap();
        let _ = parse_go("package x\nfunc {").unwrap_err();
    }

    #[test]
    fn test_string_bindings_are_top_level_only() {
        let tree = parse_go(SOURCE).unwrap();
        let bindings = string_bindings(tree.root_node(), SOURCE);
        assert_eq!(bindings.get("namespace").map(String::as_str), Some("pg"));
        assert_eq!(bindings.get("subsystem").map(String::as_str), Some("database"));
        assert_eq!(bindings.get("other").map(String::as_str), Some("x"));
        assert!(!bindings.contains_key(","));
        assert!(!bindings.contains_key("local"));
    }

    #[test]
    fn test_string_slice_bindings() {
        let tree = parse_go(SOURCE).unwrap();
        let bindings = string_slice_bindings(tree.root_node(), SOURCE);
        assert_eq!(bindings["defaultLabels"], vec!["datname".to_string(), "server".to_string()]);
        assert_eq!(bindings["labels"], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_concatenated_string_value() {
        let tree = parse_go(SOURCE).unwrap();
        let mut found = None;
        visit(tree.root_node(), |node| {
            if node.kind() == "binary_expression" {
                found = string_value(node, SOURCE);
            }
        });
        assert_eq!(found.as_deref(), Some("plainjoined"));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a \"quoted\" word"#), r#"a "quoted" word"#);
        assert_eq!(unescape(r"line\nbreak"), "line\nbreak");
    }
}
