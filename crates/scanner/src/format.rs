//! Plain-text rendering of extracted headers.

use crate::types::{HeaderElement, HeaderKind, Parameter};
use std::fmt::Write;

/// Render headers one per line (`Line N: Kind: ...`), children indented
#[must_use]
pub fn format_headers(headers: &[HeaderElement]) -> String {
    let mut out = String::new();
    for header in headers {
        format_header(&mut out, header);
    }
    out
}

fn format_header(out: &mut String, header: &HeaderElement) {
    let line = header.line;
    match header.kind {
        kind if kind.is_callable() => {
            let _ = writeln!(out, "Line {line}: {}: {}", label(header), callable_signature(header));
        }
        HeaderKind::Constant | HeaderKind::Variable => {
            let value_info = match (&header.value_type, &header.value) {
                (Some(ty), Some(value)) => format!("{ty} = {value}"),
                (Some(ty), None) => ty.clone(),
                (None, Some(value)) => format!("= {value}"),
                (None, None) => header.name.clone(),
            };
            let _ = writeln!(out, "Line {line}: {}: {} {value_info}", label(header), header.name);
        }
        HeaderKind::Import => {
            let _ = writeln!(out, "Line {line}: {}:", header.kind);
            if header.children.is_empty() {
                let _ = writeln!(out, "    {}", header.name);
            }
            for child in &header.children {
                let _ = writeln!(out, "    {}", import_statement(child));
            }
        }
        HeaderKind::Struct | HeaderKind::Class => {
            let _ = writeln!(out, "Line {line}: {}: {}", label(header), header.name);
            for child in &header.children {
                let _ = writeln!(out, "    {}", child.name);
            }
        }
        _ => {
            let _ = writeln!(out, "Line {line}: {}: {}", label(header), header.name);
        }
    }
}

/// `scope Kind` or just `Kind`
fn label(header: &HeaderElement) -> String {
    match &header.scope {
        Some(scope) => format!("{scope} {}", header.kind),
        None => header.kind.to_string(),
    }
}

fn callable_signature(header: &HeaderElement) -> String {
    let params = header
        .parameters
        .iter()
        .map(render_parameter)
        .collect::<Vec<_>>()
        .join(", ");

    let mut signature = format!("{}({params})", header.qualified_name());
    match header.return_types.as_slice() {
        [] => {}
        [single] => {
            let _ = write!(signature, " {single}");
        }
        many => {
            let _ = write!(signature, " ({})", many.join(", "));
        }
    }
    signature
}

fn render_parameter(param: &Parameter) -> String {
    match (param.name.is_empty(), param.ty.is_empty()) {
        (false, false) => format!("{} {}", param.name, param.ty),
        (true, false) => param.ty.clone(),
        _ => param.name.clone(),
    }
}

fn import_statement(child: &HeaderElement) -> String {
    let mut statement = match &child.parent {
        Some(module) => format!("from {module} import {}", child.name),
        None => format!("import {}", child.name),
    };
    if let Some(alias) = &child.alias {
        let _ = write!(statement, " as {alias}");
    }
    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn method_with_parent_params_and_tuple_return() {
        let mut method = HeaderElement::new(HeaderKind::Method, "Save", 3).with_parent("Repo");
        method.parameters = vec![Parameter::new("id", "int"), Parameter::new("", "string")];
        method.return_types = vec!["bool".into(), "error".into()];

        assert_eq!(
            format_headers(&[method]),
            "Line 3: Method: Repo.Save(id int, string) (bool, error)\n"
        );
    }

    #[test]
    fn scoped_function_with_single_return() {
        let mut function = HeaderElement::new(HeaderKind::Function, "parse", 7).with_scope("pub");
        function.parameters = vec![Parameter::new("input", "")];
        function.return_types = vec!["Ast".into()];

        assert_eq!(
            format_headers(&[function]),
            "Line 7: pub Function: parse(input) Ast\n"
        );
    }

    #[test]
    fn constants_show_type_and_value() {
        let mut both = HeaderElement::new(HeaderKind::Constant, "Max", 1);
        both.value_type = Some("int".into());
        both.value = Some("10".into());
        let mut value_only = HeaderElement::new(HeaderKind::Variable, "name", 2);
        value_only.value = Some("\"x\"".into());
        let bare = HeaderElement::new(HeaderKind::Variable, "flag", 3);

        assert_eq!(
            format_headers(&[both, value_only, bare]),
            "Line 1: Constant: Max int = 10\nLine 2: Variable: name = \"x\"\nLine 3: Variable: flag flag\n"
        );
    }

    #[test]
    fn imports_render_children() {
        let mut from = HeaderElement::new(HeaderKind::Import, "List, Dict as D", 1);
        from.children = vec![
            HeaderElement::new(HeaderKind::Import, "List", 1).with_parent("typing"),
            HeaderElement::new(HeaderKind::Import, "Dict", 1)
                .with_parent("typing")
                .with_alias("D"),
        ];
        let single = HeaderElement::new(HeaderKind::Import, "fmt", 4);

        assert_eq!(
            format_headers(&[from, single]),
            "Line 1: Import:\n    from typing import List\n    from typing import Dict as D\nLine 4: Import:\n    fmt\n"
        );
    }

    #[test]
    fn structs_list_fields() {
        let mut repo = HeaderElement::new(HeaderKind::Struct, "Repo", 5);
        repo.children = vec![
            HeaderElement::new(HeaderKind::Field, "db", 6),
            HeaderElement::new(HeaderKind::Field, "Name", 7),
        ];
        assert_eq!(format_headers(&[repo]), "Line 5: Struct: Repo\n    db\n    Name\n");
    }

}
