//! Deterministic names derived from hierarchy, variant and field names.
//!
//! Every name here is a pure function of its inputs; the generated headers
//! stay byte-identical as long as the table does.

/// Extension of every generated header.
pub const HEADER_EXTENSION: &str = "hpp";

/// Name of the per-hierarchy visitor interface.
pub const VISITOR_CLASS: &str = "IVisitor";

/// Name of the value-adapter template.
pub const VALUE_GETTER_CLASS: &str = "ValueGetter";

/// `Expr` → `Expr.hpp`
pub fn header_file_name(hierarchy: &str) -> String {
    format!("{}.{}", hierarchy, HEADER_EXTENSION)
}

/// `("slang", "Expr")` → `__SLANG_EXPR_HPP__`
pub fn include_guard(namespace: &str, hierarchy: &str) -> String {
    format!(
        "__{}_{}_{}__",
        namespace.to_uppercase(),
        hierarchy.to_uppercase(),
        HEADER_EXTENSION.to_uppercase()
    )
}

/// `Expr` → `expr`. Also used as the dispatch method's parameter name.
pub fn inner_namespace(hierarchy: &str) -> String {
    hierarchy.to_lowercase()
}

/// `("Binary", "Expr")` → `visitBinaryExpr`
pub fn dispatch_method(variant: &str, hierarchy: &str) -> String {
    format!("visit{}{}", variant, hierarchy)
}

/// `left` → `m_left`
pub fn member_name(field: &str) -> String {
    format!("m_{}", field)
}

/// ASCII C++ identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
