//! Parser for the accumulated text of one documentation block: a flat
//! sequence of XML-like elements, no nesting.

use crate::model::{DocBlock, EnumValueDoc, ParamDoc};
use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*"([^"]*)""#).unwrap());

struct Element<'a> {
    name: &'a str,
    attrs: &'a str,
    content: String,
}

/// Parse one block of documentation text into a [`DocBlock`].
///
/// Unrecognized elements are parsed and dropped; text between elements is
/// skipped. Structural damage is fatal: an unterminated element, a stray
/// `<` that opens no tag, or a `<param>`/`<enum>` without a name.
pub fn parse(text: &str) -> Result<DocBlock> {
    let mut doc = DocBlock::default();
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        let (element, after) = read_element(&rest[start..])?;
        apply(&mut doc, element)?;
        rest = after;
    }
    Ok(doc)
}

fn read_element(input: &str) -> Result<(Element<'_>, &str)> {
    let Some(gt) = input.find('>') else {
        bail!("unterminated tag: {}", snippet(input));
    };
    let tag = &input[1..gt];
    if tag.starts_with('/') {
        bail!("unexpected closing tag: <{tag}>");
    }
    let self_closing = tag.ends_with('/');
    let tag = tag.strip_suffix('/').unwrap_or(tag).trim();
    let (name, attrs) = match tag.split_once(char::is_whitespace) {
        Some((name, attrs)) => (name, attrs.trim()),
        None => (tag, ""),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("stray '<' in documentation text: {}", snippet(input));
    }

    let after_open = &input[gt + 1..];
    if self_closing {
        return Ok((
            Element {
                name,
                attrs,
                content: String::new(),
            },
            after_open,
        ));
    }

    let close = format!("</{name}>");
    let Some(end) = after_open.find(&close) else {
        bail!("unterminated <{name}> element");
    };
    let content = decode_entities(after_open[..end].trim());
    Ok((
        Element {
            name,
            attrs,
            content,
        },
        &after_open[end + close.len()..],
    ))
}

fn apply(doc: &mut DocBlock, element: Element<'_>) -> Result<()> {
    match element.name {
        "summary" => doc.summary = element.content,
        "param" => {
            let name = attr(element.attrs, "name")
                .ok_or_else(|| anyhow!("missing name attribute on <param>"))?;
            doc.params.push(ParamDoc {
                name,
                text: non_empty(element.content),
            });
        }
        "returns" => doc.returns = Some(element.content),
        "version" => doc.version = Some(element.content),
        "enum" => {
            let name = attr(element.attrs, "name")
                .ok_or_else(|| anyhow!("missing name attribute on <enum>"))?;
            doc.enum_values.push(EnumValueDoc {
                name,
                text: non_empty(element.content),
            });
        }
        "fakedtstype" => doc.decl_type = non_empty(element.content),
        _ => {}
    }
    Ok(())
}

fn attr(attrs: &str, key: &str) -> Option<String> {
    RE_ATTR
        .captures_iter(attrs)
        .find(|caps| &caps[1] == key)
        .map(|caps| caps[2].to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn snippet(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
