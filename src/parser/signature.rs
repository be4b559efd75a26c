//! Classifies the code line that terminates a documentation block.
//!
//! Classification works on two views of the line: the original text for
//! keyword checks, and a stripped signature with access keywords and the
//! wrapper-type suffix removed for names, types, and parameters.

use crate::model::{Declaration, Param};

/// Suffix the binding layer appends to its wrapper types. Stripped from
/// signatures so the script-facing name appears in output.
pub const WRAPPER_SUFFIX: &str = "Wrapper";

/// Constructible binding type that does not carry the wrapper suffix.
pub const OPTIONS_TYPE: &str = "QueryOptions";

pub fn classify(line: &str) -> Declaration {
    if line.contains("internal") || line.contains("private") {
        return Declaration::Skip;
    }
    if line.contains("class ") || line.contains("struct ") {
        return Declaration::TypeOpener;
    }

    let signature = line
        .replace("public ", "")
        .replace("static ", "")
        .replace("override", "")
        .replace(WRAPPER_SUFFIX, "");
    let signature = signature.trim();

    if signature.starts_with("enum") {
        let mut tokens = signature.split_whitespace();
        tokens.next();
        return match tokens.next() {
            Some(name) => Declaration::Enum {
                name: name.to_string(),
            },
            None => Declaration::Skip,
        };
    }

    if !line.contains('(') {
        return classify_property(signature);
    }
    classify_callable(line, signature)
}

fn classify_property(signature: &str) -> Declaration {
    let tokens: Vec<&str> = signature.split_whitespace().collect();
    let Some((&returntype, rest)) = tokens.split_first() else {
        return Declaration::Skip;
    };
    let name = rest
        .last()
        .copied()
        .unwrap_or(returntype)
        .trim_end_matches(';');
    if name.is_empty() {
        return Declaration::Skip;
    }
    Declaration::Property {
        name: name.to_string(),
        returntype: returntype.to_string(),
    }
}

fn classify_callable(line: &str, signature: &str) -> Declaration {
    let Some((head, tail)) = signature.split_once('(') else {
        return Declaration::Skip;
    };
    let params_text = tail.rsplit_once(')').map_or(tail, |(inner, _)| inner);
    let params = parse_params(params_text);

    let head_tokens: Vec<&str> = head.split_whitespace().collect();
    let (Some(&returntype), Some(&name)) = (head_tokens.first(), head_tokens.last()) else {
        return Declaration::Skip;
    };

    let words: Vec<&str> = line.split_whitespace().collect();
    let is_constructor = words.first() == Some(&"public")
        && words.get(1).is_some_and(|second| {
            [WRAPPER_SUFFIX, OPTIONS_TYPE]
                .iter()
                .any(|t| second.contains(&format!("{t}(")))
        });
    if is_constructor {
        return Declaration::Constructor {
            name: name.to_string(),
            params,
        };
    }
    if words.get(1) == Some(&"static") {
        return Declaration::StaticMethod {
            name: name.to_string(),
            params,
            returntype: returntype.to_string(),
        };
    }
    Declaration::Method {
        name: name.to_string(),
        params,
        returntype: returntype.to_string(),
    }
}

fn parse_params(text: &str) -> Vec<Param> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(parse_param).collect()
}

/// Split one parameter into type and name at the first space; text after
/// `=` in the name half is the default value.
fn parse_param(piece: &str) -> Param {
    let piece = piece.trim();
    let (ptype, rest) = piece.split_once(' ').unwrap_or((piece, piece));
    let (name, default) = match rest.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim().to_string())),
        None => (rest.trim(), None),
    };
    Param {
        name: name.to_string(),
        ptype: ptype.trim().to_string(),
        default,
    }
}
