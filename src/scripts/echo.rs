// echo.rs - General request echo page
// Shows everything the host passed: method, parameters, body, frequency
// analysis and the full set of CGI variables

use crate::cgi_env::{RequestMethod, CGI_VARIABLES};
use crate::modules::cgi_response::{HeaderBlock, LineEnding};
use crate::modules::html::{page_end, page_start};
use crate::modules::query::ParsedParams;
use crate::modules::responder::{EchoScript, RenderInput};

use super::fragments::{body_report, env_panel, greeting_name, link_list};

const STYLE: &[&str] = &[
    "body { font-family: Arial, sans-serif; margin: 40px; background: #f0f0f0; }",
    ".container { background: white; padding: 30px; border-radius: 8px; max-width: 800px; margin: 0 auto; }",
    "h1 { color: #333; }",
    ".info, .info-box { background: #e8f4f8; padding: 15px; margin: 15px 0; border-left: 4px solid #2196F3; }",
    ".data-box { background: #f8f9fa; padding: 15px; margin: 15px 0; border: 1px solid #dee2e6; max-height: 300px; overflow-y: auto; }",
    ".label { font-weight: bold; }",
    "table { border-collapse: collapse; }",
    "th, td { text-align: left; padding: 4px 12px; border-bottom: 1px solid #dee2e6; }",
    "code { background: #f5f5f5; padding: 2px 6px; border-radius: 3px; }",
    "pre { margin: 0; white-space: pre-wrap; word-wrap: break-word; }",
];

const LINKS: &[(&str, &str)] = &[
    ("/cgi-bin/echo", "Basic request"),
    ("/cgi-bin/echo?name=Alice", "With name parameter"),
    ("/cgi-bin/echo?name=Bob&age=25", "Multiple parameters"),
    ("/cgi-bin/echo?message=Hello%20World", "URL encoded"),
];

pub struct Echo;

impl Echo {
    fn param_table(html: &mut String, title: &str, params: &ParsedParams, input: &RenderInput<'_>) {
        html.push_str(&format!("        <h2>{}</h2>\n", title));
        html.push_str("        <div class='info'>\n");
        if params.is_empty() {
            html.push_str("            <strong>No parameters provided.</strong>\n");
        } else {
            html.push_str("            <table>\n");
            html.push_str("                <tr><th>Name</th><th>Value</th></tr>\n");
            for (name, value) in params.iter_first() {
                html.push_str(&format!(
                    "                <tr><td><code>{}</code></td><td><code>{}</code></td></tr>\n",
                    input.value(name),
                    input.value(value)
                ));
            }
            html.push_str("            </table>\n");
        }
        html.push_str("        </div>\n");

        if let Some(name) = greeting_name(params, input) {
            html.push_str(&format!("        <h2>Hello, {}!</h2>\n", name));
        }
    }
}

impl EchoScript for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn header(&self) -> HeaderBlock {
        HeaderBlock::new("text/html; charset=UTF-8", LineEnding::Crlf)
    }

    fn render(&self, input: &RenderInput<'_>) -> String {
        let mut html = String::new();
        page_start(&mut html, "CGI Request Echo", STYLE);
        html.push_str("        <h1>CGI Request Echo</h1>\n");
        html.push_str(&input.banners());

        html.push_str("        <div class='info'>\n");
        html.push_str(&format!(
            "            <strong>Request Method:</strong> <code>{}</code>\n",
            input.value(input.method.as_str())
        ));
        html.push_str("        </div>\n");

        match &input.method {
            RequestMethod::Get => {
                let params = ParsedParams::parse(&input.env.query_string);
                Self::param_table(&mut html, "GET Parameters", &params, input);
            }
            RequestMethod::Post => {
                html.push_str("        <h2>POST Body</h2>\n");
                body_report(&mut html, input.body, input);

                if input.env.is_form_encoded() {
                    if let Some(body) = input.body {
                        let params = ParsedParams::parse(&body.text());
                        Self::param_table(&mut html, "Form Parameters", &params, input);
                    }
                }
            }
            RequestMethod::Other(method) => {
                html.push_str("        <div class='info'>\n");
                html.push_str(&format!(
                    "            <strong>Unrecognized method:</strong> <code>{}</code>. No parameters or body were processed.\n",
                    input.value(method)
                ));
                html.push_str("        </div>\n");
            }
        }

        html.push_str("        <h2>CGI Environment</h2>\n");
        html.push_str("        <div class='info'>\n");
        env_panel(&mut html, input.env, CGI_VARIABLES, input);
        html.push_str("        </div>\n");

        html.push_str("        <h2>Try These URLs</h2>\n");
        link_list(&mut html, LINKS);

        page_end(&mut html);
        html
    }
}
