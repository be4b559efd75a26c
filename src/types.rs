//! Script-side type names for the declaration file.

/// Map a binding-layer type name to its script-side equivalent. An array
/// suffix is split off first and re-appended to the mapped base, so array
/// types map like their element type.
pub fn script_type(name: &str) -> String {
    let (base, suffix) = match name.strip_suffix("[]") {
        Some(base) => (base, "[]"),
        None => (name, ""),
    };
    let mapped = if base == "double" || base == "float" || base.contains("int") {
        "number"
    } else if base == "bool" {
        "boolean"
    } else if base == "object" || base == "ExpandoObject" {
        "any"
    } else {
        base
    };
    format!("{mapped}{suffix}")
}
