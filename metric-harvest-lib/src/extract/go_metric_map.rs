use super::go_syntax::{named_children, parse_go, spec_pairs, string_slice, string_value, text, unwrap_element, visit};
use crate::Result;
use crate::model::{Attribute, InstrumentType, MetricDefinition};
use tree_sitter::Node;

/// Extract metrics named by the entries of Go map literals.
///
/// Two shapes are recognized:
///
/// - `map[string]string` literals bound to `metricMapGauges` or `metricMapCounters`, either
///   as a struct field or as a variable. Each entry maps a source field to the exported name,
///   and the binding decides the instrument.
/// - Map literals whose element type is a struct with `txt` and `lbls` fields. The key is the
///   exported name, `txt` its help text, and `lbls` its labels.
///
/// Every exported name is prefixed with `prefix`.
pub fn extract_metric_maps(source: &str, prefix: &str) -> Result<Vec<MetricDefinition>> {
    let tree = parse_go(source)?;
    let mut definitions = Vec::new();

    visit(tree.root_node(), |node| match node.kind() {
        "keyed_element" => {
            let mut parts = named_children(node).into_iter().map(unwrap_element);
            if let (Some(key), Some(value)) = (parts.next(), parts.next())
                && let Some(instrument) = map_instrument(text(key, source))
            {
                definitions.extend(mapped_names(value, source, prefix, instrument));
            }
        }
        "var_spec" => {
            for (name, value) in spec_pairs(node, source) {
                if let Some(instrument) = map_instrument(&name) {
                    definitions.extend(mapped_names(value, source, prefix, instrument));
                }
            }
        }
        "composite_literal" if is_description_map(node, source) => {
            definitions.extend(described_names(node, source, prefix));
        }
        _ => {}
    });

    Ok(definitions)
}

fn map_instrument(binding: &str) -> Option<InstrumentType> {
    match binding {
        "metricMapGauges" => Some(InstrumentType::Gauge),
        "metricMapCounters" => Some(InstrumentType::Counter),
        _ => None,
    }
}

/// `(key, value)` pairs of a map literal's entries, with string keys.
fn map_entries<'t>(literal: Node<'t>, source: &str) -> Vec<(String, Node<'t>)> {
    if literal.kind() != "composite_literal" {
        return Vec::new();
    }

    let Some(body) = literal.child_by_field_name("body") else {
        return Vec::new();
    };

    named_children(body)
        .into_iter()
        .filter(|element| element.kind() == "keyed_element")
        .filter_map(|element| {
            let mut parts = named_children(element).into_iter().map(unwrap_element);
            let key = string_value(parts.next()?, source)?;
            Some((key, parts.next()?))
        })
        .collect()
}

fn mapped_names(literal: Node<'_>, source: &str, prefix: &str, instrument: InstrumentType) -> Vec<MetricDefinition> {
    map_entries(literal, source)
        .into_iter()
        .filter_map(|(field, exported)| {
            let exported = string_value(exported, source).filter(|name| !name.is_empty())?;
            Some(
                MetricDefinition::new(format!("{prefix}{exported}"))
                    .with_description(format!("Value of the '{field}' field"))
                    .with_instrument_type(instrument),
            )
        })
        .collect()
}

fn is_description_map(literal: Node<'_>, source: &str) -> bool {
    let Some(element_type) = literal
        .child_by_field_name("type")
        .filter(|ty| ty.kind() == "map_type")
        .and_then(|ty| ty.child_by_field_name("value"))
        .filter(|ty| ty.kind() == "struct_type")
    else {
        return false;
    };

    let mut fields = Vec::new();
    visit(element_type, |node| {
        if node.kind() == "field_identifier" {
            fields.push(text(node, source));
        }
    });

    fields.contains(&"txt") && fields.contains(&"lbls")
}

fn described_names(literal: Node<'_>, source: &str, prefix: &str) -> Vec<MetricDefinition> {
    map_entries(literal, source)
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| {
            let mut def = MetricDefinition::new(format!("{prefix}{name}"));
            if value.kind() != "literal_value" {
                return def;
            }

            for field in named_children(value).into_iter().filter(|e| e.kind() == "keyed_element") {
                let mut parts = named_children(field).into_iter().map(unwrap_element);
                let (Some(key), Some(field_value)) = (parts.next(), parts.next()) else {
                    continue;
                };

                match text(key, source) {
                    "txt" => def.description = string_value(field_value, source),
                    "lbls" => {
                        def.attributes = string_slice(field_value, source)
                            .unwrap_or_default()
                            .into_iter()
                            .map(Attribute::string)
                            .collect();
                    }
                    _ => {}
                }
            }

            def
        })
        .collect()
}
