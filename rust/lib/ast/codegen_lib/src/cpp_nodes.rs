/// C++ node class generator: the abstract base and one class per variant

use crate::ir::*;
use crate::naming::{dispatch_method, member_name, VISITOR_CLASS};

pub(crate) const INDENT: &str = "  ";

/// Defaulted copy/move constructors and assignments.
pub(crate) fn push_special_members(output: &mut String, class_name: &str) {
    output.push_str(&format!("{INDENT}{class_name}(const {class_name}&) = default;\n"));
    output.push_str(&format!("{INDENT}{class_name}({class_name}&&) = default;\n"));
    output.push_str(&format!(
        "{INDENT}{class_name}& operator=(const {class_name}&) = default;\n"
    ));
    output.push_str(&format!(
        "{INDENT}{class_name}& operator=({class_name}&&) = default;\n"
    ));
}

/// The abstract base class with the double-dispatch entry point.
pub fn generate_base(hierarchy: &Hierarchy) -> String {
    let base = &hierarchy.name;
    let mut output = String::new();

    output.push_str(&format!("class {} {{\npublic:\n", base));
    output.push_str(&format!("{INDENT}{}() = default;\n", base));
    push_special_members(&mut output, base);
    output.push_str(&format!("{INDENT}virtual ~{}() = default;\n\n", base));
    output.push_str(&format!(
        "{INDENT}virtual void accept({}& visitor) = 0;\n\n",
        VISITOR_CLASS
    ));
    output.push_str("};\n\n");

    output
}

/// One concrete class. Constructor parameters, member initializers and data
/// members all follow the variant's field order.
pub fn generate_variant(hierarchy: &Hierarchy, variant: &Variant) -> String {
    let base = &hierarchy.name;
    let class_name = &variant.class_name;
    let mut output = String::new();

    output.push_str(&format!("class {} : public {} {{\n", class_name, base));
    output.push_str("public:\n");

    // ctor
    let params = variant
        .fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect::<Vec<_>>()
        .join(", ");
    output.push_str(&format!("{INDENT}{}({}) :\n", class_name, params));

    let mut initializers = vec![format!("{}()", base)];
    initializers.extend(
        variant
            .fields
            .iter()
            .map(|f| format!("{}({})", member_name(&f.name), f.name)),
    );
    for (i, init) in initializers.iter().enumerate() {
        let end = if i + 1 < initializers.len() { "," } else { "" };
        output.push_str(&format!("{INDENT}{INDENT}{}{}\n", init, end));
    }
    output.push_str(&format!("{INDENT}{{}}\n\n"));

    push_special_members(&mut output, class_name);
    output.push_str(&format!("{INDENT}virtual ~{}() = default;\n\n", class_name));

    output.push_str(&format!(
        "{INDENT}void accept({}& visitor) override {{\n",
        VISITOR_CLASS
    ));
    output.push_str(&format!(
        "{INDENT}{INDENT}visitor.{}(*this);\n",
        dispatch_method(class_name, base)
    ));
    output.push_str(&format!("{INDENT}}}\n\n"));

    // fields
    for field in &variant.fields {
        output.push_str(&format!("{INDENT}{} {};\n", field.ty, member_name(&field.name)));
    }

    output.push_str("\n};\n\n");

    output
}
