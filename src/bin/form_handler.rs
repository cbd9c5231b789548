use cgi_echo::modules::responder::run_script;
use cgi_echo::scripts::form_handler::FormHandler;

fn main() {
    std::process::exit(run_script(&FormHandler));
}
