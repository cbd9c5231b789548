//! CGI Response Writer
//!
//! This module writes a CGI response to the output stream: one header block,
//! a blank line, then the document. The writer tracks where it is in that
//! sequence and rejects anything out of order.

use std::io::Write;

use super::enhanced_error::{operation_error, EnhancedError};

/// Line terminator used for the header block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// CGI header block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Content-Type value (e.g., "text/html; charset=UTF-8")
    pub content_type: String,
    pub line_ending: LineEnding,
}

impl HeaderBlock {
    pub fn new(content_type: &str, line_ending: LineEnding) -> Self {
        Self {
            content_type: content_type.to_string(),
            line_ending,
        }
    }

    /// Encode the header lines and the terminating blank line
    pub fn encode(&self) -> Vec<u8> {
        let eol = self.line_ending.as_str();
        format!("Content-Type: {}{}{}", self.content_type, eol, eol).into_bytes()
    }
}

/// Progress of a response through the output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Start,
    HeaderEmitted,
    BodyRendered,
    Done,
}

/// Writes one CGI response
pub struct ResponseWriter<W: Write> {
    output: W,
    state: ResponseState,
    bytes_written: usize,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            state: ResponseState::Start,
            bytes_written: 0,
        }
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Write the header block. Only valid as the first write.
    pub fn emit_header(&mut self, header: &HeaderBlock) -> Result<(), EnhancedError> {
        if self.state != ResponseState::Start {
            return Err(operation_error(
                "emit_header",
                format!("header already written (state {:?})", self.state).into(),
            ));
        }

        let encoded = header.encode();
        crate::enhanced_stream_result!("emit_header", self.output.write_all(&encoded))?;
        // The header must reach the host even if rendering is slow
        crate::enhanced_stream_result!("emit_header", self.output.flush())?;
        self.bytes_written += encoded.len();
        self.state = ResponseState::HeaderEmitted;
        Ok(())
    }

    /// Write the rendered document. Only valid right after the header.
    pub fn write_document(&mut self, document: &str) -> Result<(), EnhancedError> {
        if self.state != ResponseState::HeaderEmitted {
            return Err(operation_error(
                "write_document",
                format!("document written in state {:?}", self.state).into(),
            ));
        }

        crate::enhanced_stream_result!("write_document", self.output.write_all(document.as_bytes()))?;
        self.bytes_written += document.len();
        self.state = ResponseState::BodyRendered;
        Ok(())
    }

    /// Flush the stream and hand it back
    pub fn finish(mut self) -> Result<W, EnhancedError> {
        if self.state != ResponseState::BodyRendered {
            return Err(operation_error(
                "finish_response",
                format!("response finished in state {:?}", self.state).into(),
            ));
        }

        crate::enhanced_stream_result!("finish_response", self.output.flush())?;
        self.state = ResponseState::Done;
        Ok(self.output)
    }
}
