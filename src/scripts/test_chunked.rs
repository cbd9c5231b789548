// test_chunked.rs - Chunked transfer encoding test page
// The server de-chunks the request before running the script, so this page
// shows the body exactly as the script received it

use crate::cgi_env::{CgiEnv, RequestMethod};
use crate::modules::cgi_response::{HeaderBlock, LineEnding};
use crate::modules::html::{page_end, page_start};
use crate::modules::responder::{EchoScript, RenderInput};

use super::fragments::body_report;

const STYLE: &[&str] = &[
    "body { font-family: monospace; margin: 40px; background: #1e1e1e; color: #d4d4d4; }",
    ".container { background: #252526; padding: 30px; border-radius: 8px; border: 2px solid #3e3e42; }",
    "h1 { color: #4ec9b0; margin-bottom: 20px; }",
    ".info-box { background: #1e1e1e; padding: 15px; margin: 15px 0; border-left: 4px solid #4ec9b0; }",
    ".label { color: #569cd6; font-weight: bold; }",
    ".value { color: #ce9178; }",
    ".success { color: #4ec9b0; font-size: 1.2em; }",
    ".data-box { background: #1e1e1e; padding: 15px; margin: 15px 0; border: 1px solid #3e3e42; max-height: 300px; overflow-y: auto; }",
    "pre { margin: 0; white-space: pre-wrap; word-wrap: break-word; }",
];

pub struct TestChunked;

impl EchoScript for TestChunked {
    fn name(&self) -> &'static str {
        "test_chunked"
    }

    fn header(&self) -> HeaderBlock {
        HeaderBlock::new("text/html; charset=UTF-8", LineEnding::Crlf)
    }

    fn default_method(&self) -> &'static str {
        "UNKNOWN"
    }

    // Reads for POST whenever the length is a plain number, including zero
    fn wants_body(&self, env: &CgiEnv, method: &RequestMethod) -> bool {
        let digits = env.var_or("CONTENT_LENGTH", "0");
        *method == RequestMethod::Post && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    fn render(&self, input: &RenderInput<'_>) -> String {
        let env = input.env;

        let mut html = String::new();
        page_start(&mut html, "Chunked Transfer Test", STYLE);
        html.push_str("        <h1>✓ Chunked Transfer Encoding Test</h1>\n");
        html.push_str("        <p class='success'>CGI script executed successfully!</p>\n");
        html.push_str(&input.banners());

        html.push_str("        <div class='info-box'>\n");
        let fields = [
            ("REQUEST_METHOD", input.method.as_str()),
            ("CONTENT_LENGTH", env.var_or("CONTENT_LENGTH", "0")),
            ("CONTENT_TYPE", env.var_or("CONTENT_TYPE", "none")),
        ];
        for (label, value) in fields {
            html.push_str(&format!(
                "            <span class='label'>{}:</span> <span class='value'>{}</span><br>\n",
                label,
                input.value(value)
            ));
        }
        if !env.query_string.is_empty() {
            html.push_str(&format!(
                "            <span class='label'>QUERY_STRING:</span> <span class='value'>{}</span><br>\n",
                input.value(&env.query_string)
            ));
        }
        html.push_str("        </div>\n");

        body_report(&mut html, input.body, input);

        html.push_str("        <div class='info-box'>\n");
        html.push_str("            <span class='label'>Test Status:</span> <span class='success'>PASSED ✓</span><br>\n");
        html.push_str("            <small>This confirms your server correctly assembled chunked data and passed it to the CGI script.</small>\n");
        html.push_str("        </div>\n");

        page_end(&mut html);
        html
    }
}
