use cgi_echo::modules::responder::run_script;
use cgi_echo::scripts::test_chunked::TestChunked;

fn main() {
    std::process::exit(run_script(&TestChunked));
}
