//! Degraded-input bookkeeping
//!
//! Malformed or incomplete input never fails a response. Each case is
//! recorded here, logged, and shown to the reader as a warning banner.

use std::fmt;
use std::time::Duration;

use super::body_reader::BodyOutcome;
use super::html::Interpolation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// `CONTENT_LENGTH` was not a non-negative integer; no body was read
    MalformedLength { raw: String },
    /// The input closed before the declared length
    TruncatedBody { expected: usize, received: usize },
    /// The body read hit its deadline
    BodyTimedOut { expected: usize, received: usize, timeout: Duration },
    /// Informational only; pages describe the method themselves
    UnknownMethod { method: String },
}

impl Degradation {
    /// Degradation implied by how a body read ended, if any
    pub fn from_outcome(outcome: BodyOutcome, timeout: Duration) -> Option<Self> {
        match outcome {
            BodyOutcome::Complete => None,
            BodyOutcome::Truncated { expected, received } => {
                Some(Degradation::TruncatedBody { expected, received })
            }
            BodyOutcome::TimedOut { expected, received } => {
                Some(Degradation::BodyTimedOut { expected, received, timeout })
            }
        }
    }

    /// Whether this case gets a banner on the page
    pub fn has_banner(&self) -> bool {
        !matches!(self, Degradation::UnknownMethod { .. })
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::MalformedLength { raw } => {
                write!(f, "CONTENT_LENGTH '{}' is not a valid length; body ignored", raw)
            }
            Degradation::TruncatedBody { expected, received } => {
                write!(f, "body truncated: received {} of {} declared bytes", received, expected)
            }
            Degradation::BodyTimedOut { expected, received, timeout } => write!(
                f,
                "body read timed out after {}s: received {} of {} declared bytes",
                timeout.as_secs_f64(),
                received,
                expected
            ),
            Degradation::UnknownMethod { method } => {
                write!(f, "request method '{}' is not recognized", method)
            }
        }
    }
}

/// Render the warning banners, or nothing if there are none
pub fn render_banners(degradations: &[Degradation], interp: Interpolation) -> String {
    let mut html = String::new();
    for degradation in degradations.iter().filter(|d| d.has_banner()) {
        html.push_str("        <div class='warning' style='background: #fff3cd; color: #856404; padding: 10px; margin: 10px 0; border-left: 4px solid #ffc107;'>\n");
        html.push_str(&format!(
            "            <strong>Warning:</strong> {}\n",
            interp.apply(&degradation.to_string())
        ));
        html.push_str("        </div>\n");
    }
    html
}
