//! Collects the parsed records of a topic's source files into one
//! [`TopicRecord`].

use crate::model::{Declaration, Member, TopicRecord};
use crate::parser::FileRecords;

/// Merge per-file records into one topic, preserving file order within
/// each member category. A later file's type-opener summary replaces the
/// overview.
pub fn collect(name: &str, as_namespace: bool, files: Vec<FileRecords>) -> TopicRecord {
    let mut topic = TopicRecord {
        name: name.to_string(),
        as_namespace,
        ..TopicRecord::default()
    };

    for records in files {
        if let Some(overview) = records.overview {
            topic.overview = overview;
        }
        for parsed in records.declarations {
            let doc = parsed.doc;
            let min_version = parsed.min_version;
            match parsed.decl {
                Declaration::Constructor { name, params } => topic.constructors.push(Member {
                    name,
                    params: Some(params),
                    returntype: None,
                    doc,
                    min_version,
                }),
                Declaration::StaticMethod {
                    name,
                    params,
                    returntype,
                } => topic.static_methods.push(Member {
                    name,
                    params: Some(params),
                    returntype: Some(returntype),
                    doc,
                    min_version,
                }),
                Declaration::Method {
                    name,
                    params,
                    returntype,
                } => topic.methods.push(Member {
                    name,
                    params: Some(params),
                    returntype: Some(returntype),
                    doc,
                    min_version,
                }),
                Declaration::Property { name, returntype } => topic.properties.push(Member {
                    name,
                    params: None,
                    returntype: Some(returntype),
                    doc,
                    min_version,
                }),
                Declaration::Enum { name } => topic.enums.push(Member {
                    name,
                    params: None,
                    returntype: None,
                    doc,
                    min_version,
                }),
                // The aggregator never emits these as declarations.
                Declaration::Skip | Declaration::TypeOpener => {}
            }
        }
    }
    topic
}
