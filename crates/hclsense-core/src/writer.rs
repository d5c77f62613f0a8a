//! HCL Writer
//!
//! Renders attributes in canonical surface syntax: one space on
//! each side of `=`, strings double-quoted with HCL escapes, integral
//! numbers without a fractional part, and a trailing newline.
//!
//! # Example
//!
//! ```
//! use hclsense_ast::Value;
//! use hclsense_core::render_attribute;
//!
//! assert_eq!(render_attribute("ami", &Value::Null), "ami = null\n");
//! ```

use hclsense_ast::Value;

/// Render a single `name = value` line
pub fn render_attribute(name: &str, value: &Value) -> String {
    format!("{} = {}\n", name, render_value(value))
}

/// Render a literal value
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(*n),
        Value::String(s) => quote(s),
    }
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.get(i + 1) == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
