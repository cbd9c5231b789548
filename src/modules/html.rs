//! HTML helpers shared by the script pages

use std::borrow::Cow;

// HTML escape function
pub fn html_escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// How request-derived values are placed into a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Escaped,
    /// Values are inserted as received. Only for controlled test harnesses.
    Raw,
}

impl Interpolation {
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Interpolation::Raw => Cow::Borrowed(value),
            Interpolation::Escaped if !value.contains(['<', '>', '&', '"', '\'']) => Cow::Borrowed(value),
            Interpolation::Escaped => Cow::Owned(html_escape(value)),
        }
    }
}

/// Start a page: doctype, head with title and stylesheet, opening body
pub fn page_start(html: &mut String, title: &str, style: &[&str]) {
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n");
    html.push_str("<head>\n");
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <style>\n");
    for rule in style {
        html.push_str("        ");
        html.push_str(rule);
        html.push('\n');
    }
    html.push_str("    </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("    <div class='container'>\n");
}

/// Close what `page_start` opened
pub fn page_end(html: &mut String) {
    html.push_str("    </div>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");
}
