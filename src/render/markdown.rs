//! Per-topic Markdown page.
//!
//! Sections appear in a fixed order, members sorted by name within each
//! section. Overloads sharing a name have their blocks concatenated in
//! file order under that name.

use crate::model::{Member, TopicRecord};
use std::collections::BTreeMap;

const VERSION_SPAN: &str = r#"<span style="float:right;font-weight:normal;font-size:66%">"#;

pub fn render_topic(topic: &TopicRecord) -> String {
    let mut out = format!("# {}\n\n", topic.name);
    if !topic.overview.is_empty() {
        out.push_str(&topic.overview);
        out.push('\n');
    }
    render_section(&mut out, "Constructors", &topic.constructors);
    render_section(&mut out, "Static methods", &topic.static_methods);
    render_section(&mut out, "Properties", &topic.properties);
    render_section(&mut out, "Methods", &topic.methods);
    render_section(&mut out, "Enums", &topic.enums);
    out
}

fn render_section(out: &mut String, title: &str, members: &[Member]) {
    if members.is_empty() {
        return;
    }
    let mut by_name: BTreeMap<&str, String> = BTreeMap::new();
    for member in members {
        by_name
            .entry(member.name.as_str())
            .or_default()
            .push_str(&render_member(member));
    }
    out.push_str(&format!("## {title}\n"));
    for block in by_name.values() {
        out.push_str(block);
    }
}

fn render_member(member: &Member) -> String {
    let mut out = String::from("\n---\n");
    if let Some(version) = &member.doc.version {
        out.push_str(&format!("{VERSION_SPAN}Version: {version}</span>\n"));
    }
    if let Some(version) = &member.min_version {
        out.push_str(&format!("{VERSION_SPAN}Version: {version}</span>\n"));
    }

    out.push_str(&format!("### {}", member.name));
    if let Some(params) = &member.params {
        let list: Vec<String> = params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ptype))
            .collect();
        out.push_str(&format!("({})", list.join(", ")));
    }
    out.push('\n');
    out.push_str(&member.doc.summary);
    out.push('\n');

    if !member.doc.params.is_empty() {
        out.push_str("#### Parameters\n");
        for param in &member.doc.params {
            out.push_str(&format!(
                "* {}: {}\n",
                param.name,
                description(param.text.as_deref())
            ));
        }
    }
    if !member.doc.enum_values.is_empty() {
        out.push_str("#### Options\n");
        for value in &member.doc.enum_values {
            out.push_str(&format!(
                "* {}: {}\n",
                value.name,
                description(value.text.as_deref())
            ));
        }
    }
    if let Some(returns) = &member.doc.returns {
        out.push_str("#### Return value\n");
        if returns.is_empty() {
            out.push_str("*missing*\n");
        } else {
            out.push_str(returns);
            out.push('\n');
        }
    }
    out
}

/// Inline fences in a description get their own lines so the fence is
/// picked up by Markdown.
fn description(text: Option<&str>) -> String {
    match text {
        Some(text) => text.replace("```", "\n```\n"),
        None => "*missing*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocBlock, Param, ParamDoc};

    fn method(name: &str, params: Vec<Param>, summary: &str) -> Member {
        Member {
            name: name.to_string(),
            params: Some(params),
            returntype: Some("void".to_string()),
            doc: DocBlock {
                summary: summary.to_string(),
                ..DocBlock::default()
            },
            min_version: None,
        }
    }

    fn topic_with_methods(methods: Vec<Member>) -> TopicRecord {
        TopicRecord {
            name: "Sector".to_string(),
            overview: "A sector.".to_string(),
            methods,
            ..TopicRecord::default()
        }
    }

    #[test]
    fn page_has_title_and_overview() {
        let page = render_topic(&topic_with_methods(Vec::new()));
        assert!(page.starts_with("# Sector\n\nA sector.\n"));
        // No members, no section headings.
        assert!(!page.contains("## Methods"));
    }

    #[test]
    fn members_sort_by_name_within_a_section() {
        let page = render_topic(&topic_with_methods(vec![
            method("setB", Vec::new(), "B."),
            method("getA", Vec::new(), "A."),
        ]));
        let a = page.find("### getA").unwrap();
        let b = page.find("### setB").unwrap();
        assert!(a < b);
        assert!(page.contains("## Methods\n\n---\n### getA()"));
    }

    #[test]
    fn overload_blocks_concatenate_under_one_name() {
        let page = render_topic(&topic_with_methods(vec![
            method("join", vec![], "First form."),
            method(
                "join",
                vec![Param {
                    name: "other".to_string(),
                    ptype: "Sector".to_string(),
                    default: None,
                }],
                "Second form.",
            ),
        ]));
        let first = page.find("First form.").unwrap();
        let second = page.find("Second form.").unwrap();
        assert!(first < second);
        assert!(page.contains("### join(other: Sector)"));
    }

    #[test]
    fn header_keeps_unmapped_parameter_types() {
        let page = render_topic(&topic_with_methods(vec![method(
            "move",
            vec![Param {
                name: "delta".to_string(),
                ptype: "double".to_string(),
                default: None,
            }],
            "Moves.",
        )]));
        // Script-side type names are a declaration-file concern.
        assert!(page.contains("### move(delta: double)"));
    }

    #[test]
    fn version_badges_render_from_both_sources() {
        let mut member = method("rotate", Vec::new(), "Rotates.");
        member.doc.version = Some("3".to_string());
        member.min_version = Some("4".to_string());
        let page = render_topic(&topic_with_methods(vec![member]));
        assert!(page.contains("Version: 3</span>"));
        assert!(page.contains("Version: 4</span>"));
    }

    #[test]
    fn missing_descriptions_get_placeholders() {
        let mut member = method("resize", Vec::new(), "Resizes.");
        member.doc.params.push(ParamDoc {
            name: "scale".to_string(),
            text: None,
        });
        member.doc.returns = Some(String::new());
        let page = render_topic(&topic_with_methods(vec![member]));
        assert!(page.contains("* scale: *missing*\n"));
        assert!(page.contains("#### Return value\n*missing*\n"));
    }

    #[test]
    fn inline_fences_in_descriptions_get_their_own_lines() {
        let mut member = method("query", Vec::new(), "Queries.");
        member.doc.params.push(ParamDoc {
            name: "options".to_string(),
            text: Some("Either of:```js\nfoo\n```done".to_string()),
        });
        let page = render_topic(&topic_with_methods(vec![member]));
        assert!(page.contains("Either of:\n```\njs\nfoo\n\n```\ndone"));
    }

    #[test]
    fn properties_and_enums_have_no_parameter_list() {
        let topic = TopicRecord {
            name: "Thing".to_string(),
            properties: vec![Member {
                name: "angle".to_string(),
                params: None,
                returntype: Some("double".to_string()),
                doc: DocBlock {
                    summary: "The angle.".to_string(),
                    ..DocBlock::default()
                },
                min_version: None,
            }],
            ..TopicRecord::default()
        };
        let page = render_topic(&topic);
        assert!(page.contains("### angle\n"));
        assert!(!page.contains("### angle("));
    }
}
