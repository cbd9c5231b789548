use cgi_echo::modules::responder::run_script;
use cgi_echo::scripts::test_get::TestGet;

fn main() {
    std::process::exit(run_script(&TestGet));
}
