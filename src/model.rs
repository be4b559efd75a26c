//! Data model for parsed documentation — format-agnostic.

use std::collections::HashMap;

/// Attribute name whose `MinVersion` key overrides a member's version badge.
pub const VERSION_ATTRIBUTE: &str = "UDBScriptSettings";

/// Key inside [`VERSION_ATTRIBUTE`] carrying the minimum version.
pub const VERSION_KEY: &str = "MinVersion";

/// Bracketed annotation state for the upcoming declaration:
/// attribute name → key/value pairs.
pub type MemberAttributes = HashMap<String, HashMap<String, String>>;

/// Look up the minimum-version tag, if the attributes carry one.
pub fn min_version(attributes: &MemberAttributes) -> Option<&str> {
    attributes
        .get(VERSION_ATTRIBUTE)
        .and_then(|kv| kv.get(VERSION_KEY))
        .map(String::as_str)
}

/// Structured documentation content for one declaration.
#[derive(Debug, Default, Clone)]
pub struct DocBlock {
    /// `<summary>` text. The first line is the short form used in the
    /// declaration file.
    pub summary: String,
    /// `<param name="...">` entries in source order. Names are unique
    /// within a block.
    pub params: Vec<ParamDoc>,
    /// `<returns>` entry. Present-but-empty is distinct from absent and
    /// renders as a placeholder.
    pub returns: Option<String>,
    /// `<version>` tag.
    pub version: Option<String>,
    /// `<enum name="...">` entries in source order.
    pub enum_values: Vec<EnumValueDoc>,
    /// `<fakedtstype>` override for the declaration-file property type.
    pub decl_type: Option<String>,
}

/// One documented parameter.
#[derive(Debug, Clone)]
pub struct ParamDoc {
    pub name: String,
    pub text: Option<String>,
}

/// One documented enum value.
#[derive(Debug, Clone)]
pub struct EnumValueDoc {
    pub name: String,
    pub text: Option<String>,
}

/// One parameter of a callable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ptype: String,
    /// Default-value text after `=`, if any. Not emitted in either artifact.
    pub default: Option<String>,
}

/// Classified shape of the code line following a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Private or internal member — excluded from all output.
    Skip,
    /// `class`/`struct` opener; only the block's summary is kept, as the
    /// topic page overview.
    TypeOpener,
    Enum {
        name: String,
    },
    Property {
        name: String,
        returntype: String,
    },
    Constructor {
        name: String,
        params: Vec<Param>,
    },
    StaticMethod {
        name: String,
        params: Vec<Param>,
        returntype: String,
    },
    Method {
        name: String,
        params: Vec<Param>,
        returntype: String,
    },
}

/// One documented member, ready for rendering.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    /// `Some` for callables (empty vec means `()`), `None` for properties
    /// and enums.
    pub params: Option<Vec<Param>>,
    pub returntype: Option<String>,
    pub doc: DocBlock,
    /// Minimum version from a bracket annotation, if present.
    pub min_version: Option<String>,
}

/// Collected members of one documentation topic.
#[derive(Debug, Default)]
pub struct TopicRecord {
    pub name: String,
    /// Render as a namespace-like construct in the declaration file
    /// instead of a class.
    pub as_namespace: bool,
    /// Summary of the type-opener block; the topic page's overview text.
    pub overview: String,
    pub constructors: Vec<Member>,
    pub static_methods: Vec<Member>,
    pub properties: Vec<Member>,
    pub methods: Vec<Member>,
    pub enums: Vec<Member>,
}
