//! Page fragments shared by the scripts

use crate::cgi_env::CgiEnv;
use crate::modules::body_reader::{BodyPreview, RequestBody, PREVIEW_LIMIT};
use crate::modules::char_frequency::{CharFrequencyReport, CharLabel};
use crate::modules::query::ParsedParams;
use crate::modules::responder::RenderInput;

/// `<code>name</code> = <code>value</code><br>` for each parameter
pub fn param_list(html: &mut String, params: &ParsedParams, input: &RenderInput<'_>) {
    for (name, value) in params.iter_first() {
        html.push_str(&format!(
            "            <code>{}</code> = <code>{}</code><br>\n",
            input.value(name),
            input.value(value)
        ));
    }
}

/// The interpolated `name` parameter, if present
pub fn greeting_name(params: &ParsedParams, input: &RenderInput<'_>) -> Option<String> {
    params.first("name").map(|name| input.value(name).into_owned())
}

/// One line per variable, in the order given, with `Not set` for gaps
pub fn env_panel(html: &mut String, env: &CgiEnv, names: &[&str], input: &RenderInput<'_>) {
    for name in names {
        html.push_str(&format!(
            "            <code>{}</code> = {}<br>\n",
            name,
            input.value(env.var_or(name, "Not set"))
        ));
    }
}

/// Static list of links
pub fn link_list(html: &mut String, links: &[(&str, &str)]) {
    html.push_str("        <ul>\n");
    for (href, label) in links {
        html.push_str(&format!("            <li><a href='{}'>{}</a></li>\n", href, label));
    }
    html.push_str("        </ul>\n");
}

/// Received-size box, preview box and, for long bodies, frequency analysis.
/// Renders the "No POST data received" box for a missing or empty body.
/// Sizes are counted in characters of the decoded text, so the omitted
/// count is always the received size minus the preview length.
pub fn body_report(html: &mut String, body: Option<&RequestBody>, input: &RenderInput<'_>) {
    let body = match body.filter(|b| !b.is_empty()) {
        Some(body) => body,
        None => {
            html.push_str("        <div class='info-box'>\n");
            html.push_str("            <span class='label'>No POST data received</span>\n");
            html.push_str("        </div>\n");
            return;
        }
    };

    let text = body.text();
    html.push_str("        <div class='info-box'>\n");
    html.push_str(&format!(
        "            <span class='label'>Data Received:</span> <span class='value'>{} bytes</span><br>\n",
        text.chars().count()
    ));
    html.push_str("        </div>\n");

    html.push_str("        <div class='data-box'>\n");
    html.push_str("            <strong>Raw POST Data:</strong>\n");
    html.push_str("            <pre>\n");
    let preview = BodyPreview::of(&text, PREVIEW_LIMIT);
    html.push_str(&input.value(preview.shown));
    html.push('\n');
    if preview.is_truncated() {
        html.push_str(&format!("\n... [{} more bytes] ...\n", preview.omitted));
    }
    html.push_str("            </pre>\n");
    html.push_str("        </div>\n");

    if let Some(report) = CharFrequencyReport::analyze(&text) {
        char_frequency(html, &report, input);
    }
}

/// Frequency list, one `'c': n times` line per visible entry
pub fn char_frequency(html: &mut String, report: &CharFrequencyReport, input: &RenderInput<'_>) {
    html.push_str("        <div class='info-box'>\n");
    html.push_str("            <span class='label'>Character Frequency Analysis:</span><br>\n");
    for (label, count) in report.visible() {
        let shown = match label {
            CharLabel::Printable(ch) => input.value(&ch.to_string()).into_owned(),
            CharLabel::Space => "SPACE".to_string(),
            CharLabel::Newline => "NEWLINE".to_string(),
            CharLabel::Hidden => continue,
        };
        html.push_str(&format!("            '{}': {} times<br>\n", shown, count));
    }
    html.push_str("        </div>\n");
}
