// hello.rs - Basic CGI test page
// Reports the method, echoes GET parameters or the raw POST body, and lists
// the standard CGI variables

use crate::cgi_env::RequestMethod;
use crate::modules::cgi_response::{HeaderBlock, LineEnding};
use crate::modules::html::{page_end, page_start};
use crate::modules::query::ParsedParams;
use crate::modules::responder::{EchoScript, RenderInput};

use super::fragments::{env_panel, greeting_name, link_list, param_list};

const STYLE: &[&str] = &[
    "body { font-family: Arial, sans-serif; margin: 40px; background: #f0f0f0; }",
    ".container { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }",
    "h1 { color: #333; }",
    ".info { background: #e8f4f8; padding: 10px; margin: 10px 0; border-left: 4px solid #2196F3; }",
    "code { background: #f5f5f5; padding: 2px 6px; border-radius: 3px; }",
];

const ENV_VARS: &[&str] = &[
    "SERVER_SOFTWARE",
    "SERVER_NAME",
    "GATEWAY_INTERFACE",
    "SERVER_PROTOCOL",
    "REQUEST_METHOD",
    "PATH_INFO",
    "SCRIPT_NAME",
    "QUERY_STRING",
];

const LINKS: &[(&str, &str)] = &[
    ("/cgi-bin/hello.py", "Basic request"),
    ("/cgi-bin/hello.py?name=Alice", "With name parameter"),
    ("/cgi-bin/hello.py?name=Bob&age=25", "Multiple parameters"),
];

pub struct Hello;

impl EchoScript for Hello {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn header(&self) -> HeaderBlock {
        HeaderBlock::new("text/html; charset=UTF-8", LineEnding::Crlf)
    }

    fn render(&self, input: &RenderInput<'_>) -> String {
        let mut html = String::new();
        page_start(&mut html, "CGI Test - Hello World", STYLE);
        html.push_str("        <h1> CGI Script Working!</h1>\n");
        html.push_str(&input.banners());

        html.push_str("        <div class='info'>\n");
        html.push_str(&format!(
            "            <strong>Request Method:</strong> <code>{}</code>\n",
            input.value(input.method.as_str())
        ));
        html.push_str("        </div>\n");

        match &input.method {
            RequestMethod::Get => {
                if !input.env.query_string.is_empty() {
                    let params = ParsedParams::parse(&input.env.query_string);
                    html.push_str("        <div class='info'>\n");
                    html.push_str("            <strong>GET Parameters:</strong><br>\n");
                    param_list(&mut html, &params, input);
                    html.push_str("        </div>\n");

                    if let Some(name) = greeting_name(&params, input) {
                        html.push_str(&format!("        <h2>Hello, {}! 👋</h2>\n", name));
                    }
                }
            }
            RequestMethod::Post => {
                if let Some(body) = input.body.filter(|b| !b.is_empty()) {
                    html.push_str("        <div class='info'>\n");
                    html.push_str("            <strong>POST Data Received:</strong><br>\n");
                    html.push_str(&format!("            <code>{}</code>\n", input.value(&body.text())));
                    html.push_str("        </div>\n");
                }
            }
            RequestMethod::Other(method) => {
                html.push_str("        <div class='info'>\n");
                html.push_str(&format!(
                    "            <strong>Unrecognized method:</strong> <code>{}</code> is not handled by this script.\n",
                    input.value(method)
                ));
                html.push_str("        </div>\n");
            }
        }

        html.push_str("        <h3>Environment Variables:</h3>\n");
        html.push_str("        <div class='info'>\n");
        env_panel(&mut html, input.env, ENV_VARS, input);
        html.push_str("        </div>\n");

        html.push_str("        <h3>Try These URLs:</h3>\n");
        link_list(&mut html, LINKS);

        page_end(&mut html);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgi_env::CgiEnv;
    use crate::modules::config::Config;
    use crate::modules::html::Interpolation;
    use crate::modules::responder::respond;

    async fn render(vars: &[(&str, &str)], stdin: &[u8], config: &Config) -> String {
        let env = CgiEnv::from_vars(vars.iter().copied());
        let (output, _) = respond(&Hello, &env, config, stdin, Vec::new()).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_get_with_params() {
        let out = render(
            &[("REQUEST_METHOD", "GET"), ("QUERY_STRING", "name=Bob&age=25")],
            b"",
            &Config::default(),
        )
        .await;

        assert!(out.starts_with("Content-Type: text/html; charset=UTF-8\r\n\r\n<!DOCTYPE html>"));
        let name_row = out.find("<code>name</code> = <code>Bob</code>").unwrap();
        let age_row = out.find("<code>age</code> = <code>25</code>").unwrap();
        assert!(name_row < age_row);
        assert!(out.contains("<h2>Hello, Bob! 👋</h2>"));
    }

    #[tokio::test]
    async fn test_missing_method_defaults_to_get() {
        let out = render(&[("QUERY_STRING", "name=Alice")], b"", &Config::default()).await;
        assert!(out.contains("<strong>Request Method:</strong> <code>GET</code>"));
        assert!(out.contains("Hello, Alice!"));
        assert!(out.contains("<code>REQUEST_METHOD</code> = Not set<br>"));
    }

    #[tokio::test]
    async fn test_post_echoes_body() {
        let out = render(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "11")],
            b"key=value&x",
            &Config::default(),
        )
        .await;
        assert!(out.contains("<strong>POST Data Received:</strong>"));
        assert!(out.contains("<code>key=value&amp;x</code>"));
    }

    #[tokio::test]
    async fn test_raw_mode_keeps_markup() {
        let config = Config { interpolation: Interpolation::Raw, ..Config::default() };
        let out = render(
            &[("REQUEST_METHOD", "GET"), ("QUERY_STRING", "name=%3Cb%3EEve%3C%2Fb%3E")],
            b"",
            &config,
        )
        .await;
        assert!(out.contains("<h2>Hello, <b>Eve</b>! 👋</h2>"));

        let escaped = render(
            &[("REQUEST_METHOD", "GET"), ("QUERY_STRING", "name=%3Cb%3EEve%3C%2Fb%3E")],
            b"",
            &Config::default(),
        )
        .await;
        assert!(escaped.contains("Hello, &lt;b&gt;Eve&lt;/b&gt;!"));
    }

    #[tokio::test]
    async fn test_unknown_method_is_reported() {
        let out = render(&[("REQUEST_METHOD", "PUT")], b"", &Config::default()).await;
        assert!(out.contains("<strong>Unrecognized method:</strong> <code>PUT</code>"));
        assert!(out.contains("</html>\n"));
    }

    #[tokio::test]
    async fn test_env_panel_order() {
        let out = render(
            &[("REQUEST_METHOD", "GET"), ("SERVER_SOFTWARE", "webserv/1.0"), ("SCRIPT_NAME", "/cgi-bin/hello")],
            b"",
            &Config::default(),
        )
        .await;
        let software = out.find("<code>SERVER_SOFTWARE</code> = webserv/1.0<br>").unwrap();
        let script = out.find("<code>SCRIPT_NAME</code> = /cgi-bin/hello<br>").unwrap();
        assert!(software < script);
        assert!(out.contains("<li><a href='/cgi-bin/hello.py?name=Bob&age=25'>Multiple parameters</a></li>"));
    }
}
