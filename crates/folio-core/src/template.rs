//! `{placeholder}` substitution for copy templates.

/// Replace each `{name}` in `template` with its value.
///
/// Unknown placeholders are left as they are.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
