/// C++ visitor interface generator

use crate::cpp_nodes::{push_special_members, INDENT};
use crate::ir::*;
use crate::naming::{dispatch_method, inner_namespace, VISITOR_CLASS};

/// `IVisitor` with one pure dispatch method per variant, in variant order.
pub fn generate_visitor(hierarchy: &Hierarchy) -> String {
    let mut output = String::new();

    output.push_str(&format!("class {} {{\n", VISITOR_CLASS));
    output.push_str("public:\n");
    output.push_str(&format!("{INDENT}{}() = default;\n", VISITOR_CLASS));
    push_special_members(&mut output, VISITOR_CLASS);
    output.push_str(&format!("{INDENT}virtual ~{}() = default;\n\n", VISITOR_CLASS));

    let param = inner_namespace(&hierarchy.name);
    for variant in &hierarchy.variants {
        output.push_str(&format!(
            "{INDENT}virtual void {}({}& {}) = 0;\n",
            dispatch_method(&variant.class_name, &hierarchy.name),
            variant.class_name,
            param
        ));
    }

    output.push_str("};\n\n");

    output
}
