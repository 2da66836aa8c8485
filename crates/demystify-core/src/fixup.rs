//! Cosmetic fixups on the final printed text.
//!
//! The printer gives no way to name an anonymous function expression through
//! the tree without changing scoping, so the name is spliced in textually:
//! `x = function (` → `x = function $x(` and `x: function (` → `x : function $x(`.
//!
//! A function expression's own name is bound inside its body, so the spliced
//! name carries a `$` prefix and never hides an outer `x`.

use regex_lite::{Captures, Regex};

const ASSIGNED_FUNCTION: &str = r"([$a-zA-Z_]+[$a-zA-Z0-9_]*)\s*=\s*function\s*\(";
const PROPERTY_FUNCTION: &str = r"([$a-zA-Z_]+[$a-zA-Z0-9_]*)\s*:\s*function\s*\(";

/// Name anonymous functions after the binding or property they are assigned to.
#[must_use]
pub fn name_functions(code: &str) -> String {
    let assigned = splice(code, ASSIGNED_FUNCTION, "=");
    splice(&assigned, PROPERTY_FUNCTION, ":")
}

fn splice(code: &str, pattern: &str, op: &str) -> String {
    let Ok(re) = Regex::new(pattern) else {
        return code.to_string();
    };
    re.replace_all(code, |caps: &Captures| {
        let name = &caps[1];
        format!("{name} {op} function ${name}(")
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{self, SourceKind};

    #[test]
    fn test_assigned_function_named() {
        assert_eq!(
            name_functions("var onLoad$a = function() {};"),
            "var onLoad$a = function $onLoad$a() {};"
        );
    }

    #[test]
    fn test_property_function_named() {
        assert_eq!(
            name_functions("o = {\n    render: function (a) {}\n};"),
            "o = {\n    render : function $render(a) {}\n};"
        );
    }

    #[test]
    fn test_named_functions_untouched() {
        let code = "var x = function y() {};";
        assert_eq!(name_functions(code), code);
    }

    #[test]
    fn test_reserved_property_gets_legal_name() {
        let out = name_functions("o = { default: function() {}, delete: function() {} };");
        assert!(out.contains("default : function $default("));
        assert!(out.contains("delete : function $delete("));
        syntax::parse(&out, SourceKind::Script).unwrap();
    }

    #[test]
    fn test_outer_binding_stays_reachable() {
        let out = name_functions("var render = 5;\nvar o = {\n    render: function() {\n        return render;\n    }\n};");
        assert!(out.contains("render : function $render()"));
        // The body still refers to the outer `render`, not the function itself.
        assert!(out.contains("return render;"));
        assert!(!out.contains("function render("));
        syntax::parse(&out, SourceKind::Script).unwrap();
    }
}
