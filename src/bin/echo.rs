use cgi_echo::modules::responder::run_script;
use cgi_echo::scripts::echo::Echo;

fn main() {
    std::process::exit(run_script(&Echo));
}
