//! Modules for the cgi-echo scripts
//!
//! This module contains the request handling shared by every script:
//! environment and body intake, parsing, response writing, logging and
//! configuration.

pub mod body_reader;
pub mod cgi_response;
pub mod char_frequency;
pub mod config;
pub mod diagnostics;
pub mod enhanced_error;
pub mod file_logger;
pub mod html;
pub mod invocation_journal;
pub mod query;
pub mod responder;
