/// Integration tests for the C++ header generator

use slang_ast_codegen_lib::naming::{dispatch_method, member_name};
use slang_ast_codegen_lib::*;

fn generate(table: &Table) -> GeneratedCode {
    let schema = table.parse().unwrap();
    CppHeaderGenerator.generate(&schema).unwrap()
}

fn content<'a>(code: &'a GeneratedCode, path: &str) -> &'a str {
    &code
        .files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("{path} not generated"))
        .content
}

/// Text between `start` (inclusive) and the next `end` after it.
fn block<'a>(code: &'a str, start: &str, end: &str) -> &'a str {
    let from = code.find(start).unwrap_or_else(|| panic!("missing `{start}`"));
    let len = code[from..].find(end).unwrap_or_else(|| panic!("missing `{end}`"));
    &code[from..from + len]
}

#[test]
fn stmt_header_matches_golden() {
    let code = generate(&default_table());
    assert_eq!(content(&code, "Stmt.hpp"), include_str!("golden/Stmt.hpp"));
}

#[test]
fn dispatch_methods_match_variants_one_to_one() {
    let table = default_table();
    let schema = table.parse().unwrap();
    let code = CppHeaderGenerator.generate(&schema).unwrap();

    for hierarchy in &schema.hierarchies {
        let header = content(&code, &format!("{}.hpp", hierarchy.name));
        let visitor = block(header, "class IVisitor {", "};");

        let declared: Vec<&str> = visitor
            .lines()
            .filter_map(|l| l.trim().strip_prefix("virtual void "))
            .map(|l| &l[..l.find('(').unwrap()])
            .collect();
        let expected: Vec<String> = hierarchy
            .variants
            .iter()
            .map(|v| dispatch_method(&v.class_name, &hierarchy.name))
            .collect();

        assert_eq!(declared.len(), hierarchy.variants.len());
        assert_eq!(declared, expected);
    }
}

#[test]
fn accept_calls_the_matching_dispatch_method() {
    let schema = default_table().parse().unwrap();
    let code = CppHeaderGenerator.generate(&schema).unwrap();

    for hierarchy in &schema.hierarchies {
        let header = content(&code, &format!("{}.hpp", hierarchy.name));
        for variant in &hierarchy.variants {
            let class = block(
                header,
                &format!("class {} : public {} {{", variant.class_name, hierarchy.name),
                "\n};\n",
            );
            assert!(class.contains(&format!(
                "visitor.{}(*this);",
                dispatch_method(&variant.class_name, &hierarchy.name)
            )));
        }
    }
}

#[test]
fn field_order_agrees_everywhere() {
    let schema = default_table().parse().unwrap();
    let code = CppHeaderGenerator.generate(&schema).unwrap();
    let header = content(&code, "Expr.hpp");
    let binary = schema.hierarchy("Expr").unwrap().variant("Binary").unwrap();
    let names: Vec<&str> = binary.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["left", "oper", "right"]);

    let class = block(header, "class Binary : public Expr {", "\n};\n");

    // constructor parameters
    let ctor = block(class, "  Binary(", ") :");
    let params: Vec<&str> = ctor["  Binary(".len()..]
        .split(", ")
        .map(|p| p.rsplit(' ').next().unwrap())
        .collect();
    assert_eq!(params, names);

    // member initializers
    let inits: Vec<&str> = class
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("m_") && l.contains('('))
        .map(|l| &l[2..l.find('(').unwrap()])
        .collect();
    assert_eq!(inits, names);

    // declared members
    let members: Vec<&str> = class
        .lines()
        .map(str::trim)
        .filter_map(|l| l.strip_suffix(';'))
        .filter_map(|l| l.rsplit(' ').next())
        .filter_map(|m| m.strip_prefix("m_"))
        .collect();
    assert_eq!(members, names);

    assert!(class.contains(&format!("  std::shared_ptr<Expr> {};\n", member_name("left"))));
    assert!(class.contains("  Token m_oper;\n"));
}

#[test]
fn guard_and_namespaces_follow_hierarchy_name() {
    let code = generate(&default_table());
    let expr = content(&code, "Expr.hpp");
    assert!(expr.starts_with("#ifndef __SLANG_EXPR_HPP__\n#define __SLANG_EXPR_HPP__\n"));
    assert!(expr.contains("namespace slang {\n\nnamespace expr {\n"));
    assert!(expr.contains("} // namespace expr\n\n} // namespace slang\n"));

    let stmt = content(&code, "Stmt.hpp");
    assert!(stmt.contains("namespace stmt {\n"));
    assert!(stmt.ends_with("#endif // __SLANG_STMT_HPP__\n"));
}

#[test]
fn stmt_includes_expr_header() {
    let code = generate(&default_table());
    assert!(content(&code, "Stmt.hpp").contains("#include \"Expr.hpp\"\n"));
    assert!(!content(&code, "Expr.hpp").contains("#include \"Stmt.hpp\""));
}

#[test]
fn generation_is_deterministic() {
    let first = generate(&default_table());
    let second = generate(&default_table());
    assert_eq!(first, second);

    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    write_files(a.path(), &first).unwrap();
    write_files(b.path(), &second).unwrap();
    // Running again over existing output changes nothing.
    write_files(b.path(), &generate(&default_table())).unwrap();

    for file in ["Expr.hpp", "Stmt.hpp"] {
        assert_eq!(
            std::fs::read(a.path().join(file)).unwrap(),
            std::fs::read(b.path().join(file)).unwrap()
        );
    }
}

#[test]
fn synthetic_table_with_bracketed_grammar() {
    let table = Table::from_json(
        r#"{
            "namespace": "toy",
            "grammar": "bracketed",
            "hierarchies": [
                {
                    "name": "Type",
                    "stdIncludes": ["map", "string"],
                    "variants": ["Named with std::string name", "Unit with"]
                },
                {
                    "name": "Decl",
                    "stdIncludes": ["map", "memory"],
                    "userIncludes": ["Type.hpp"],
                    "variants": [
                        "Record with std::map<std::string, std::shared_ptr<type::Type>> fields, unsigned int align"
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    let code = generate(&table);

    let ty = content(&code, "Type.hpp");
    assert!(ty.starts_with("#ifndef __TOY_TYPE_HPP__\n"));
    assert!(ty.contains("#include <map>\n#include <string>\n\n\n"));
    assert!(ty.contains("  Unit() :\n    Type()\n  {}\n"));
    assert!(ty.contains("  virtual void visitUnitType(Unit& type) = 0;\n"));

    let decl = content(&code, "Decl.hpp");
    assert!(decl.contains("#include \"Type.hpp\"\n"));
    assert!(decl.contains(
        "  Record(std::map<std::string, std::shared_ptr<type::Type>> fields, unsigned int align) :\n"
    ));
    assert!(decl.contains("  std::map<std::string, std::shared_ptr<type::Type>> m_fields;\n"));
    assert!(decl.contains("  unsigned int m_align;\n"));
}

#[test]
fn baseline_grammar_rejects_what_bracketed_accepts() {
    let json = r#"{
        "hierarchies": [{
            "name": "Decl",
            "variants": ["Ok with int x", "Record with std::map<K, V> fields"]
        }]
    }"#;

    let table = Table::from_json(json).unwrap();
    let err = table.parse().unwrap_err();
    assert!(matches!(
        err,
        TableError::Shape {
            index: 1,
            source: ShapeError::MalformedField(_),
            ..
        }
    ));
    assert!(err.to_string().contains("Record with std::map<K, V> fields"));

    let mut table = Table::from_json(json).unwrap();
    table.grammar = Grammar::Bracketed;
    assert!(table.parse().is_ok());
}
