//! CGI environment utilities
//!
//! Builds the per-invocation request context from the variables the host
//! server exports before running a script.

use std::collections::HashMap;
use std::fmt;

/// Variables every responder knows how to report on
pub const CGI_VARIABLES: &[&str] = &[
    "REQUEST_METHOD",
    "QUERY_STRING",
    "CONTENT_LENGTH",
    "CONTENT_TYPE",
    "SCRIPT_NAME",
    "SERVER_NAME",
    "SERVER_PROTOCOL",
    "SERVER_SOFTWARE",
    "GATEWAY_INTERFACE",
    "PATH_INFO",
];

/// Request method as reported by `REQUEST_METHOD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Other(String),
}

impl RequestMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => RequestMethod::Get,
            "POST" => RequestMethod::Post,
            other => RequestMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Other(method) => method,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared body length
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLength {
    /// Unset or empty
    Absent,
    Declared(usize),
    /// Present but not a non-negative decimal integer
    Malformed(String),
}

impl ContentLength {
    /// Parse a raw `CONTENT_LENGTH` value. Only plain ASCII digits count as a
    /// declared length; signs, whitespace and overflow are malformed.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => ContentLength::Absent,
            Some(raw) if raw.bytes().all(|b| b.is_ascii_digit()) => match raw.parse::<usize>() {
                Ok(length) => ContentLength::Declared(length),
                Err(_) => ContentLength::Malformed(raw.to_string()),
            },
            Some(raw) => ContentLength::Malformed(raw.to_string()),
        }
    }

    /// Number of bytes to read; malformed and absent lengths count as zero
    pub fn bytes(&self) -> usize {
        match self {
            ContentLength::Declared(length) => *length,
            _ => 0,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ContentLength::Malformed(_))
    }
}

/// Request context for one CGI invocation
#[derive(Debug, Clone)]
pub struct CgiEnv {
    pub query_string: String,
    pub request_method: Option<String>,
    pub content_length: ContentLength,
    pub content_type: Option<String>,
    vars: HashMap<String, String>,
}

impl CgiEnv {
    /// Build a context from arbitrary name/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            query_string: vars.get("QUERY_STRING").cloned().unwrap_or_default(),
            request_method: vars.get("REQUEST_METHOD").cloned(),
            content_length: ContentLength::parse(vars.get("CONTENT_LENGTH").map(String::as_str)),
            content_type: vars.get("CONTENT_TYPE").cloned(),
            vars,
        }
    }

    /// Build a context from the process environment. Variables that are not
    /// valid unicode are skipped.
    pub fn from_process_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Request method, falling back to `default` when the host did not set one
    pub fn method_or(&self, default: &str) -> RequestMethod {
        RequestMethod::parse(self.request_method.as_deref().unwrap_or(default))
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn var_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.var(name).unwrap_or(default)
    }

    /// Whether the declared content type is a urlencoded form
    pub fn is_form_encoded(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declared_length() {
        assert_eq!(ContentLength::parse(Some("42")), ContentLength::Declared(42));
        assert_eq!(ContentLength::parse(Some("0")), ContentLength::Declared(0));
    }

    #[test]
    fn test_missing_or_empty_length_is_absent() {
        assert_eq!(ContentLength::parse(None), ContentLength::Absent);
        assert_eq!(ContentLength::parse(Some("")), ContentLength::Absent);
        assert_eq!(ContentLength::Absent.bytes(), 0);
    }

    #[test]
    fn test_malformed_length_reads_nothing() {
        for raw in ["abc", "-5", "+5", " 12", "1.5", "99999999999999999999999999"] {
            let length = ContentLength::parse(Some(raw));
            assert!(length.is_malformed(), "{raw} should be malformed");
            assert_eq!(length.bytes(), 0);
        }
    }

    #[test]
    fn test_from_vars() {
        let env = CgiEnv::from_vars([
            ("REQUEST_METHOD", "POST"),
            ("QUERY_STRING", "a=b"),
            ("CONTENT_LENGTH", "13"),
            ("CONTENT_TYPE", "text/plain"),
            ("SERVER_NAME", "localhost"),
        ]);

        assert_eq!(env.method_or("GET"), RequestMethod::Post);
        assert_eq!(env.query_string, "a=b");
        assert_eq!(env.content_length, ContentLength::Declared(13));
        assert_eq!(env.content_type.as_deref(), Some("text/plain"));
        assert_eq!(env.var("SERVER_NAME"), Some("localhost"));
        assert_eq!(env.var_or("PATH_INFO", "Not set"), "Not set");
    }

    #[test]
    fn test_method_default_and_unknown() {
        let env = CgiEnv::from_vars(Vec::<(String, String)>::new());
        assert_eq!(env.method_or("GET"), RequestMethod::Get);
        assert_eq!(env.method_or("UNKNOWN"), RequestMethod::Other("UNKNOWN".to_string()));

        let env = CgiEnv::from_vars([("REQUEST_METHOD", "DELETE")]);
        assert_eq!(env.method_or("GET").to_string(), "DELETE");
    }

    #[test]
    fn test_form_encoded_detection() {
        let env = CgiEnv::from_vars([("CONTENT_TYPE", "application/x-www-form-urlencoded; charset=UTF-8")]);
        assert!(env.is_form_encoded());

        let env = CgiEnv::from_vars([("CONTENT_TYPE", "multipart/form-data; boundary=x")]);
        assert!(!env.is_form_encoded());
    }
}
