//! Utility functions used across the survcore workspace

use crate::Timestamp;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Substitute `{name}`-style placeholders in a message template.
///
/// Placeholders with no matching variable are left untouched so a typo in
/// a template shows up in chat rather than vanishing silently.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in vars {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    rendered
}
