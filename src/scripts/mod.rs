//! CGI test pages
//!
//! `echo` is the general responder; the others reproduce individual test
//! pages a server test suite links to.

pub mod echo;
pub mod form_handler;
pub mod fragments;
pub mod hello;
pub mod test_chunked;
pub mod test_get;
