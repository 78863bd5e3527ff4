/// C++ header generator: assembles one self-contained header per hierarchy

use crate::cpp_nodes::{generate_base, generate_variant};
use crate::cpp_value_getter::generate_value_getter;
use crate::cpp_visitor::generate_visitor;
use crate::ir::*;
use crate::naming::{header_file_name, include_guard, inner_namespace};
use anyhow::Result;

pub struct CppHeaderGenerator;

impl crate::Codegen for CppHeaderGenerator {
    fn generate(&self, schema: &Schema) -> Result<crate::GeneratedCode> {
        let files = schema
            .hierarchies
            .iter()
            .map(|hierarchy| crate::GeneratedFile {
                path: header_file_name(&hierarchy.name),
                content: generate_header(&schema.namespace, hierarchy),
            })
            .collect();

        Ok(crate::GeneratedCode { files })
    }

    fn language(&self) -> &str {
        "cpp-header"
    }
}

/// Guard, includes, namespaces, forward declarations, then visitor
/// interface, base class, value adapter and variants in table order.
pub fn generate_header(namespace: &str, hierarchy: &Hierarchy) -> String {
    let guard = include_guard(namespace, &hierarchy.name);
    let inner = inner_namespace(&hierarchy.name);
    let mut output = String::new();

    output.push_str(&format!("#ifndef {}\n", guard));
    output.push_str(&format!("#define {}\n\n", guard));

    for include in &hierarchy.std_includes {
        output.push_str(&format!("#include <{}>\n", include));
    }
    output.push('\n');

    for include in &hierarchy.user_includes {
        output.push_str(&format!("#include \"{}\"\n", include));
    }
    output.push('\n');

    output.push_str(&format!("namespace {} {{\n\n", namespace));
    output.push_str(&format!("namespace {} {{\n\n", inner));

    // forward decls
    for variant in &hierarchy.variants {
        output.push_str(&format!("class {};\n", variant.class_name));
    }
    output.push('\n');

    output.push_str(&generate_visitor(hierarchy));
    output.push_str(&generate_base(hierarchy));
    output.push_str(&generate_value_getter());

    for variant in &hierarchy.variants {
        output.push_str(&generate_variant(hierarchy, variant));
    }

    output.push_str(&format!("}} // namespace {}\n\n", inner));
    output.push_str(&format!("}} // namespace {}\n\n", namespace));
    output.push_str(&format!("#endif // {}\n", guard));

    output
}
