use cgi_echo::modules::responder::run_script;
use cgi_echo::scripts::hello::Hello;

fn main() {
    std::process::exit(run_script(&Hello));
}
