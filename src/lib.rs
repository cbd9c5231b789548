//! cgi-echo: CGI test scripts that echo their invocation context back as HTML
//!
//! Each binary under `src/bin` is one script; the pages live in [`scripts`]
//! and the shared request handling in [`modules`].

pub mod cgi_env;
pub mod modules;
pub mod scripts;
