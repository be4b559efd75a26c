//! The declaration file: one `declare namespace` block covering every
//! topic, members in file order.

use crate::model::{DocBlock, Member, TopicRecord};
use crate::types::script_type;
use std::collections::HashSet;

/// Rendered declaration file plus diagnostic notes for members that were
/// deliberately left out.
pub struct DeclOutput {
    pub text: String,
    pub notes: Vec<String>,
}

pub fn render_decls(namespace: &str, topics: &[TopicRecord]) -> DeclOutput {
    let topic_names: HashSet<&str> = topics.iter().map(|t| t.name.as_str()).collect();
    let mut out = format!("declare namespace {namespace} {{\n");
    let mut notes = Vec::new();

    for topic in topics {
        // The topic named after the root namespace contributes free
        // functions to the root block.
        if topic.name == namespace {
            for method in &topic.methods {
                out.push_str(&render_function(method, &method.name, 1, true));
            }
            continue;
        }

        let class_like = !topic.as_namespace;
        if !topic.constructors.is_empty()
            || !topic.methods.is_empty()
            || !topic.properties.is_empty()
        {
            let block = if class_like { "class" } else { "namespace" };
            out.push_str(&format!("\t{block} {} {{\n", topic.name));
            for ctor in &topic.constructors {
                out.push_str(&render_function(ctor, "constructor", 2, !class_like));
            }
            for method in &topic.methods {
                out.push_str(&render_function(method, &method.name, 2, !class_like));
            }
            for property in &topic.properties {
                if is_self_alias(property, &topic_names) {
                    notes.push(format!(
                        "ignoring {} in {} - returntype {}",
                        property.name,
                        topic.name,
                        property.returntype.as_deref().unwrap_or(""),
                    ));
                    continue;
                }
                out.push_str(&render_property(property, 2, !class_like));
            }
            out.push_str("\t}\n");
        }

        // Static members live in a companion namespace block.
        if !topic.static_methods.is_empty() || !topic.enums.is_empty() {
            out.push_str(&format!("\tnamespace {} {{\n", topic.name));
            for method in &topic.static_methods {
                out.push_str(&render_function(method, &method.name, 2, true));
            }
            for member in &topic.enums {
                out.push_str(&render_enum(member, 2));
                out.push('\n');
            }
            out.push_str("\t}\n");
        }
    }

    out.push_str("}\n");
    DeclOutput { text: out, notes }
}

/// A property whose name equals its own declared type and also names
/// another topic; kept out of the declaration file as unresolvable.
fn is_self_alias(property: &Member, topic_names: &HashSet<&str>) -> bool {
    property.returntype.as_deref() == Some(property.name.as_str())
        && topic_names.contains(property.name.as_str())
}

fn render_function(member: &Member, name: &str, depth: usize, as_function: bool) -> String {
    let indent = "\t".repeat(depth);
    let mut out = format!("{indent}/**\n");
    if let Some(summary) = first_line(&member.doc.summary) {
        out.push_str(&format!("{indent} * {summary}\n"));
    }
    let params = member.params.as_deref().unwrap_or(&[]);
    for param in params {
        out.push_str(&format!(
            "{indent} * @param {} {}\n",
            param.name,
            param_text(&member.doc, &param.name)
        ));
    }
    if let Some(returns) = &member.doc.returns {
        if !returns.is_empty() {
            out.push_str(&format!("{indent} * @returns {returns}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n{indent}"));

    if as_function {
        out.push_str("function ");
    }
    let list: Vec<String> = params
        .iter()
        .map(|p| format!("{}: {}", p.name, script_type(&p.ptype)))
        .collect();
    out.push_str(&format!("{name}({}", list.join(", ")));
    match &member.returntype {
        Some(returntype) => out.push_str(&format!("): {};\n", script_type(returntype))),
        None => out.push_str(");\n"),
    }
    out
}

fn render_property(member: &Member, depth: usize, with_let: bool) -> String {
    let indent = "\t".repeat(depth);
    let mut out = format!("{indent}/**\n");
    if let Some(summary) = first_line(&member.doc.summary) {
        out.push_str(&format!("{indent} * {summary}\n"));
    }
    out.push_str(&format!("{indent} */\n{indent}"));
    if with_let {
        out.push_str("let ");
    }
    let returntype = member
        .doc
        .decl_type
        .as_deref()
        .or(member.returntype.as_deref())
        .unwrap_or("");
    out.push_str(&format!("{}: {};\n", member.name, script_type(returntype)));
    out
}

fn render_enum(member: &Member, depth: usize) -> String {
    let indent = "\t".repeat(depth);
    let inner = "\t".repeat(depth + 1);
    let mut out = format!("{indent}/**\n");
    if let Some(summary) = first_line(&member.doc.summary) {
        out.push_str(&format!("{indent} * {summary}\n"));
    }
    out.push_str(&format!("{indent} */\n{indent}enum {} {{\n", member.name));
    for value in &member.doc.enum_values {
        let text = value.text.as_deref().unwrap_or("*missing*");
        out.push_str(&format!(
            "{inner}/**\n{inner} * {text}\n{inner} */\n{inner}{},\n",
            value.name
        ));
    }
    out.push_str(&format!("{indent}}}\n"));
    out
}

fn first_line(summary: &str) -> Option<&str> {
    summary.lines().next().filter(|line| !line.is_empty())
}

fn param_text(doc: &DocBlock, name: &str) -> String {
    doc.params
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.text.clone())
        .unwrap_or_else(|| "*missing*".to_string())
}
