/// C++ value-adapter generator
///
/// `ValueGetter<Visitor, Visitable, R>` turns the void dispatch protocol into
/// a call that returns a value: `GetValue(node)` dispatches with the
/// concrete visitor and returns whatever the visited method passed to
/// `Return`. The slot is reset to `R{}` before each dispatch, so a method
/// that never calls `Return` yields a value-initialized `R`, not a stale
/// result. `GetValue` returns by value so nested queries (both operands of a
/// binary node) do not alias the slot.

use crate::cpp_nodes::{push_special_members, INDENT};
use crate::naming::VALUE_GETTER_CLASS;

pub fn generate_value_getter() -> String {
    let class_name = VALUE_GETTER_CLASS;
    let mut output = String::new();

    output.push_str("template <class Visitor, class Visitable, class R>\n");
    output.push_str(&format!("class {class_name} {{\n"));
    output.push_str("public:\n");
    output.push_str(&format!("{INDENT}{class_name}() = default;\n"));
    push_special_members(&mut output, class_name);
    output.push_str(&format!("{INDENT}virtual ~{class_name}() = default;\n\n"));

    output.push_str(&format!("{INDENT}R GetValue(Visitable& visitable) {{\n"));
    output.push_str(&format!("{INDENT}{INDENT}m_value = R{{}};\n"));
    output.push_str(&format!(
        "{INDENT}{INDENT}visitable.accept(*(static_cast<Visitor*>(this)));\n"
    ));
    output.push_str(&format!("{INDENT}{INDENT}return m_value;\n"));
    output.push_str(&format!("{INDENT}}}\n\n"));

    output.push_str(&format!("{INDENT}void Return(const R& value) {{\n"));
    output.push_str(&format!("{INDENT}{INDENT}m_value = value;\n"));
    output.push_str(&format!("{INDENT}}}\n\n"));

    output.push_str("private:\n");
    output.push_str(&format!("{INDENT}R m_value{{}};\n\n"));
    output.push_str("};\n\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecorded_value_is_value_initialized() {
        let code = generate_value_getter();
        let get_value = code
            .split("R GetValue(Visitable& visitable) {\n")
            .nth(1)
            .unwrap();
        let reset = get_value.find("m_value = R{};").unwrap();
        let dispatch = get_value.find("visitable.accept(").unwrap();
        assert!(reset < dispatch, "slot must be reset before dispatch");
        assert!(code.contains("  R m_value{};\n"));
    }

    #[test]
    fn returns_by_value() {
        let code = generate_value_getter();
        assert!(code.starts_with("template <class Visitor, class Visitable, class R>\nclass ValueGetter {\n"));
        assert!(code.contains("  R GetValue(Visitable& visitable) {\n"));
        assert!(!code.contains("R& GetValue"));
        assert!(code.contains("  void Return(const R& value) {\n    m_value = value;\n  }\n"));
        assert!(code.contains("    visitable.accept(*(static_cast<Visitor*>(this)));\n"));
    }
}
