// test_get.rs - GET-only CGI test page
// Tests query parameter parsing and environment variables

use crate::cgi_env::{CgiEnv, RequestMethod};
use crate::modules::cgi_response::{HeaderBlock, LineEnding};
use crate::modules::html::{page_end, page_start};
use crate::modules::query::ParsedParams;
use crate::modules::responder::{EchoScript, RenderInput};

use super::fragments::{env_panel, greeting_name, link_list};

const STYLE: &[&str] = &[
    "body { font-family: Arial, sans-serif; margin: 40px; background: #f0f0f0; }",
    ".container { background: white; padding: 30px; border-radius: 8px; max-width: 600px; margin: 0 auto; }",
    "h1 { color: #2196F3; }",
    ".success { background: #d4edda; padding: 15px; border-left: 4px solid #28a745; margin: 15px 0; }",
    ".info { background: #e8f4f8; padding: 15px; margin: 15px 0; border-left: 4px solid #2196F3; }",
    "code { background: #f5f5f5; padding: 2px 6px; border-radius: 3px; color: #e83e8c; }",
    ".param { margin: 10px 0; }",
    "a { color: #2196F3; text-decoration: none; }",
    "a:hover { text-decoration: underline; }",
];

const ENV_VARS: &[&str] = &[
    "REQUEST_METHOD",
    "QUERY_STRING",
    "SERVER_PROTOCOL",
    "SCRIPT_NAME",
    "SERVER_NAME",
];

const LINKS: &[(&str, &str)] = &[
    ("/cgi-bin/test_get.py", "No parameters"),
    ("/cgi-bin/test_get.py?name=Alice", "Single parameter"),
    ("/cgi-bin/test_get.py?name=Bob&age=30", "Multiple parameters"),
    ("/cgi-bin/test_get.py?name=Charlie&age=25&city=Paris", "Many parameters"),
    ("/cgi-bin/test_get.py?message=Hello%20World", "URL encoded"),
];

pub struct TestGet;

impl EchoScript for TestGet {
    fn name(&self) -> &'static str {
        "test_get"
    }

    fn header(&self) -> HeaderBlock {
        HeaderBlock::new("text/html", LineEnding::Crlf)
    }

    // Query string only; the body is never read
    fn wants_body(&self, _env: &CgiEnv, _method: &RequestMethod) -> bool {
        false
    }

    fn render(&self, input: &RenderInput<'_>) -> String {
        let query_string = &input.env.query_string;
        let params = ParsedParams::parse(query_string);

        let mut html = String::new();
        page_start(&mut html, "GET Test - CGI", STYLE);
        html.push_str("        <h1>✅ GET Request Test</h1>\n");
        html.push_str(&input.banners());

        html.push_str("        <div class='success'>\n");
        html.push_str("            <strong>CGI Script Executed Successfully!</strong><br>\n");
        html.push_str("            Method: <code>GET</code><br>\n");
        let shown_query = if query_string.is_empty() {
            "(empty)".into()
        } else {
            input.value(query_string)
        };
        html.push_str(&format!("            Query String: <code>{}</code>\n", shown_query));
        html.push_str("        </div>\n");

        if params.is_empty() {
            html.push_str("        <div class='info'>\n");
            html.push_str("            <strong>No parameters provided.</strong> Try adding query parameters to the URL.\n");
            html.push_str("        </div>\n");
        } else {
            html.push_str("        <h2>📋 Parsed Parameters:</h2>\n");
            html.push_str("        <div class='info'>\n");
            for (name, value) in params.iter_first() {
                html.push_str("            <div class='param'>\n");
                html.push_str(&format!(
                    "                <strong>{}:</strong> <code>{}</code>\n",
                    input.value(name),
                    input.value(value)
                ));
                html.push_str("            </div>\n");
            }
            html.push_str("        </div>\n");

            if let Some(name) = greeting_name(&params, input) {
                html.push_str(&format!("        <h2>👋 Hello, {}!</h2>\n", name));
            }
        }

        html.push_str("        <h2>🔧 CGI Environment:</h2>\n");
        html.push_str("        <div class='info'>\n");
        env_panel(&mut html, input.env, ENV_VARS, input);
        html.push_str("        </div>\n");

        html.push_str("        <h2>🧪 Test These URLs:</h2>\n");
        link_list(&mut html, LINKS);

        html.push_str("        <p style='margin-top: 30px; text-align: center; color: #999;'>\n");
        html.push_str("            <a href='/'>Back to Home</a>\n");
        html.push_str("        </p>\n");

        page_end(&mut html);
        html
    }
}
