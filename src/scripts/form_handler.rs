// form_handler.rs - Form submission result page
// Decodes a urlencoded form body and shows the submitted fields

use crate::cgi_env::{CgiEnv, RequestMethod};
use crate::modules::cgi_response::{HeaderBlock, LineEnding};
use crate::modules::query::FormFields;
use crate::modules::responder::{EchoScript, RenderInput};

const STYLE: &str = r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: Arial, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            padding: 20px;
        }
        .container {
            background: white;
            padding: 40px;
            border-radius: 10px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.3);
            max-width: 700px;
        }
        h1 { color: #667eea; margin-bottom: 20px; }
        h2 { color: #333; margin-top: 25px; margin-bottom: 15px; }
        .success {
            background: #d4edda;
            color: #155724;
            padding: 15px;
            border-radius: 5px;
            margin: 20px 0;
            border-left: 4px solid #28a745;
        }
        .data-box {
            background: #f8f9fa;
            padding: 20px;
            border-radius: 5px;
            margin: 15px 0;
        }
        .data-box p { margin: 10px 0; color: #333; }
        .data-box strong { color: #667eea; }
        a {
            display: inline-block;
            margin-top: 20px;
            color: #667eea;
            text-decoration: none;
            font-weight: bold;
        }
        a:hover { text-decoration: underline; }
"#;

pub struct FormHandler;

impl EchoScript for FormHandler {
    fn name(&self) -> &'static str {
        "form_handler"
    }

    fn header(&self) -> HeaderBlock {
        HeaderBlock::new("text/html", LineEnding::Lf)
    }

    fn default_method(&self) -> &'static str {
        "UNKNOWN"
    }

    // Any method with a positive length carries a form
    fn wants_body(&self, env: &CgiEnv, _method: &RequestMethod) -> bool {
        env.content_length.bytes() > 0
    }

    fn render(&self, input: &RenderInput<'_>) -> String {
        let form = input
            .body
            .map(|body| FormFields::parse(&body.text()))
            .unwrap_or_default();

        let username = input.value(form.get_or("username", "Unknown")).into_owned();
        let email = input.value(form.get_or("email", "Not provided")).into_owned();
        let category = input.value(form.get_or("category", "general")).into_owned();
        let message = input.value(form.get_or("message", "No message")).into_owned();

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str("    <title>Form Submission Result</title>\n");
        html.push_str("    <style>\n");
        html.push_str(STYLE);
        html.push_str("    </style>\n");
        html.push_str("</head>\n");
        html.push_str("<body>\n");
        html.push_str("    <div class=\"container\">\n");
        html.push_str("        <h1>✅ Form Submitted Successfully!</h1>\n");
        html.push_str(&input.banners());

        html.push_str("        <div class=\"success\">\n");
        html.push_str("            <strong>Success!</strong> Your form has been processed by the CGI script.\n");
        html.push_str("        </div>\n");

        html.push_str("        <h2>Submitted Data:</h2>\n");
        html.push_str("        <div class=\"data-box\">\n");
        html.push_str(&format!("            <p><strong>Username:</strong> {}</p>\n", username));
        html.push_str(&format!("            <p><strong>Email:</strong> {}</p>\n", email));
        html.push_str(&format!("            <p><strong>Category:</strong> {}</p>\n", category));
        html.push_str("            <p><strong>Message:</strong></p>\n");
        html.push_str(&format!(
            "            <p style=\"white-space: pre-wrap; padding: 10px; background: white; border-radius: 3px;\">{}</p>\n",
            message
        ));
        html.push_str("        </div>\n");

        html.push_str("        <h2>Request Details:</h2>\n");
        html.push_str("        <div class=\"data-box\">\n");
        html.push_str(&format!(
            "            <p><strong>Method:</strong> {}</p>\n",
            input.value(input.method.as_str())
        ));
        html.push_str(&format!(
            "            <p><strong>Content Length:</strong> {} bytes</p>\n",
            input.env.content_length.bytes()
        ));
        html.push_str(&format!(
            "            <p><strong>Script Name:</strong> {}</p>\n",
            input.value(input.env.var_or("SCRIPT_NAME", "unknown"))
        ));
        html.push_str("        </div>\n");

        html.push_str("        <p>In a real application, this data would be saved to a database, sent via email, or processed according to business logic.</p>\n");
        html.push_str("        <a href=\"/forms/demo.html\">← Submit Another Form</a>\n");
        html.push_str("        <a href=\"/\" style=\"margin-left: 20px;\">Home</a>\n");
        html.push_str("    </div>\n");
        html.push_str("</body>\n");
        html.push_str("</html>\n");
        html
    }
}
