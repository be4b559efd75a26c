//! Line state machine over one source file: accumulates `///` comment
//! text, tracks bracket annotations, and hands each completed block to the
//! markup parser and the declaration classifier.

use crate::model::{min_version, Declaration, DocBlock, MemberAttributes};
use crate::parser::{docblock, signature};
use anyhow::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.+?)\((.+?)\)\]").unwrap());

/// Parsed contents of one source file, in source order.
#[derive(Debug, Default)]
pub struct FileRecords {
    /// Summary of the last `class`/`struct` opener block.
    pub overview: Option<String>,
    pub declarations: Vec<ParsedDeclaration>,
}

/// One documented declaration.
#[derive(Debug)]
pub struct ParsedDeclaration {
    pub decl: Declaration,
    pub doc: DocBlock,
    /// Minimum version from a bracket annotation above the declaration.
    pub min_version: Option<String>,
}

#[derive(Default)]
struct AggregatorState {
    text: String,
    attributes: MemberAttributes,
    in_code_block: bool,
}

/// Run the line state machine over a whole file. State does not carry
/// across files.
pub fn parse_source(source: &str) -> Result<FileRecords> {
    let mut state = AggregatorState::default();
    let mut records = FileRecords::default();

    for raw in source.lines() {
        process_line(&mut state, &mut records, raw.trim())?;
    }
    // Trailing comment text with no declaration line documents nothing.
    Ok(records)
}

fn process_line(
    s: &mut AggregatorState,
    records: &mut FileRecords,
    line: &str,
) -> Result<()> {
    // Bracket annotations apply to the upcoming declaration and never
    // terminate a comment block.
    if line.starts_with('[') {
        record_annotation(s, line);
        return Ok(());
    }

    if line.starts_with("///") {
        append_comment_line(s, strip_marker(line));
        return Ok(());
    }

    if s.text.is_empty() {
        return Ok(());
    }
    finish_block(s, records, line)
}

/// Strip the comment marker and a single following whitespace character.
fn strip_marker(line: &str) -> &str {
    let rest = line.trim_start_matches('/');
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn append_comment_line(s: &mut AggregatorState, text: &str) {
    if text.trim_end() == "```" {
        if s.in_code_block {
            s.text.push_str("```\n");
        } else {
            s.text.push_str("\n```js\n");
        }
        s.in_code_block = !s.in_code_block;
        return;
    }
    s.text.push_str(text);
    s.text.push('\n');
}

fn finish_block(
    s: &mut AggregatorState,
    records: &mut FileRecords,
    line: &str,
) -> Result<()> {
    let text = std::mem::take(&mut s.text);
    let attributes = std::mem::take(&mut s.attributes);

    // A blank line ends a comment block that documents nothing.
    if line.is_empty() {
        return Ok(());
    }

    let doc = docblock::parse(&text)?;
    match signature::classify(line) {
        Declaration::Skip => {}
        Declaration::TypeOpener => records.overview = Some(doc.summary),
        decl => records.declarations.push(ParsedDeclaration {
            min_version: min_version(&attributes).map(str::to_string),
            decl,
            doc,
        }),
    }
    Ok(())
}

fn record_annotation(s: &mut AggregatorState, line: &str) {
    let Some(caps) = RE_ANNOTATION.captures(line) else {
        return;
    };
    let mut pairs = HashMap::new();
    for pair in caps[2].split(',') {
        if let Some((key, value)) = pair.split_once('=') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    s.attributes.insert(caps[1].to_string(), pairs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_and_declaration_produce_a_record() {
        let source = "\
/// <summary>Length of the line.</summary>
/// <returns>The length</returns>
public double GetLength()
{
}
";
        let records = parse_source(source).unwrap();
        assert_eq!(records.declarations.len(), 1);
        let rec = &records.declarations[0];
        assert_eq!(rec.doc.summary, "Length of the line.");
        assert_eq!(rec.doc.returns.as_deref(), Some("The length"));
        assert!(matches!(rec.decl, Declaration::Method { .. }));
    }

    #[test]
    fn fences_are_tagged_and_padded() {
        let source = "\
/// <summary>
/// Example:
/// ```
/// UDB.Map.getSelectedSectors();
/// ```
/// </summary>
public void Run()
{
}
";
        let records = parse_source(source).unwrap();
        let summary = &records.declarations[0].doc.summary;
        assert!(summary.contains("\n```js\nUDB.Map.getSelectedSectors();\n```"));
    }

    #[test]
    fn version_annotation_reaches_the_record() {
        let source = "\
/// <summary>Added later.</summary>
[UDBScriptSettings(MinVersion = 4)]
public void Added()
{
}
";
        let records = parse_source(source).unwrap();
        assert_eq!(records.declarations[0].min_version.as_deref(), Some("4"));
    }

    #[test]
    fn type_opener_becomes_the_overview() {
        let source = "\
/// <summary>A line between two vertices.</summary>
public class LinedefWrapper : MapElementWrapper
{
    /// <summary>The index of the linedef.</summary>
    public int index;
}
";
        let records = parse_source(source).unwrap();
        assert_eq!(records.overview.as_deref(), Some("A line between two vertices."));
        assert_eq!(records.declarations.len(), 1);
        assert_eq!(
            records.declarations[0].decl,
            Declaration::Property {
                name: "index".to_string(),
                returntype: "int".to_string(),
            }
        );
    }

    #[test]
    fn blank_line_discards_the_block() {
        let source = "/// <summary>Orphaned.</summary>\n\npublic int x;\n";
        let records = parse_source(source).unwrap();
        assert!(records.overview.is_none());
        assert!(records.declarations.is_empty());
    }

    #[test]
    fn private_members_are_dropped() {
        let source = "\
/// <summary>Not exported.</summary>
private void Helper()
{
}
";
        let records = parse_source(source).unwrap();
        assert!(records.declarations.is_empty());
    }

    #[test]
    fn malformed_annotation_is_ignored() {
        let source = "\
/// <summary>S.</summary>
[Incomplete
public int x;
";
        let records = parse_source(source).unwrap();
        assert_eq!(records.declarations.len(), 1);
        assert!(records.declarations[0].min_version.is_none());
    }

    #[test]
    fn undocumented_code_produces_nothing() {
        let source = "public int x;\npublic void Run()\n{\n}\n";
        let records = parse_source(source).unwrap();
        assert!(records.declarations.is_empty());
    }
}
