//! Request echo responder
//!
//! Drives one CGI invocation: emit the header, work out the method, read the
//! body if the script wants it, render the page, write it out. Malformed
//! input degrades the page; only a failing output stream fails the run.

use std::io::{self, Write};

use tokio::io::AsyncRead;

use crate::cgi_env::{CgiEnv, RequestMethod};

use super::body_reader::{read_body, RequestBody};
use super::cgi_response::{HeaderBlock, ResponseWriter};
use super::config::{usage, Command, Config};
use super::diagnostics::{render_banners, Degradation};
use super::enhanced_error::{operation_error, EnhancedError};
use super::file_logger::init_logger;
use super::html::Interpolation;
use super::invocation_journal::{append_record, InvocationRecord};

/// Everything a script needs to render its page
pub struct RenderInput<'a> {
    pub env: &'a CgiEnv,
    pub method: RequestMethod,
    /// `None` when the body was not read
    pub body: Option<&'a RequestBody>,
    pub interp: Interpolation,
    pub degradations: &'a [Degradation],
}

impl RenderInput<'_> {
    /// Insert a request-derived value into the page
    pub fn value<'v>(&self, raw: &'v str) -> std::borrow::Cow<'v, str> {
        self.interp.apply(raw)
    }

    /// Warning banners for degraded input
    pub fn banners(&self) -> String {
        render_banners(self.degradations, self.interp)
    }
}

/// One CGI test page
pub trait EchoScript {
    /// Name used in logs, the journal and `--help`
    fn name(&self) -> &'static str;

    fn header(&self) -> HeaderBlock;

    /// Method assumed when the host does not set `REQUEST_METHOD`
    fn default_method(&self) -> &'static str {
        "GET"
    }

    /// Whether the body should be read for this request
    fn wants_body(&self, env: &CgiEnv, method: &RequestMethod) -> bool {
        *method == RequestMethod::Post && env.content_length.bytes() > 0
    }

    fn render(&self, input: &RenderInput<'_>) -> String;
}

/// Run `script` against one request, writing the response to `output`
pub async fn respond<S, R, W>(
    script: &S,
    env: &CgiEnv,
    config: &Config,
    input: R,
    output: W,
) -> Result<(W, InvocationRecord), EnhancedError>
where
    S: EchoScript + ?Sized,
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut writer = ResponseWriter::new(output);
    writer.emit_header(&script.header())?;

    let method = env.method_or(script.default_method());
    let mut record = InvocationRecord::now(
        script.name(),
        method.as_str(),
        &env.query_string,
        env.var("CONTENT_LENGTH"),
    );
    log::debug!("{} handling {} ?{}", script.name(), method, env.query_string);

    let mut degradations = Vec::new();
    if let RequestMethod::Other(ref other) = method {
        log::info!("unrecognized request method '{}'", other);
        degradations.push(Degradation::UnknownMethod { method: other.clone() });
    }
    if let Some(raw) = env.var("CONTENT_LENGTH").filter(|_| env.content_length.is_malformed()) {
        log::warn!("malformed CONTENT_LENGTH '{}', treating as 0", raw);
        degradations.push(Degradation::MalformedLength { raw: raw.to_string() });
    }

    let body = if script.wants_body(env, &method) {
        let body = read_body(input, env.content_length.bytes(), config.body_timeout).await?;
        record.body_bytes = body.len();
        record.body_outcome = body.outcome().label().to_string();
        degradations.extend(Degradation::from_outcome(body.outcome(), config.body_timeout));
        Some(body)
    } else {
        None
    };

    let document = script.render(&RenderInput {
        env,
        method,
        body: body.as_ref(),
        interp: config.interpolation,
        degradations: &degradations,
    });
    writer.write_document(&document)?;
    let written = writer.bytes_written();
    let output = writer.finish()?;

    record.degradations = degradations.iter().map(ToString::to_string).collect();
    log::debug!("{} wrote {} bytes", script.name(), written);
    Ok((output, record))
}

/// Resolve configuration from the environment and command line. Invalid
/// settings are returned as messages and replaced by defaults.
fn resolve_command(script_name: &str) -> (Command, Vec<String>) {
    let mut problems = Vec::new();
    let base = Config::from_env_lookup(|key| std::env::var(key).ok(), &mut problems);
    match base.clone().apply_args(std::env::args_os().skip(1)) {
        Ok(command) => (command, problems),
        Err(e) => {
            problems.push(format!("{}: {}", script_name, e));
            (Command::Run(base), problems)
        }
    }
}

/// Process entry point for a script binary. Returns the exit status.
pub fn run_script<S: EchoScript>(script: &S) -> i32 {
    let (command, problems) = resolve_command(script.name());
    let config = match command {
        Command::Run(config) => config,
        Command::Help => {
            print!("{}", usage(script.name()));
            return 0;
        }
        Command::Version => {
            println!("{} {}", script.name(), env!("CARGO_PKG_VERSION"));
            return 0;
        }
    };

    if let Err(e) = init_logger(config.verbose, config.log_file.as_deref()) {
        eprintln!("Warning: {}", e);
    }
    for problem in &problems {
        log::warn!("ignoring invalid configuration: {}", problem);
    }

    let env = CgiEnv::from_process_env();
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("{}", operation_error("build_runtime", Box::new(e)));
            return 1;
        }
    };

    let result = runtime.block_on(respond(
        script,
        &env,
        &config,
        tokio::io::stdin(),
        io::stdout().lock(),
    ));
    // A stalled stdin read cannot be cancelled; do not wait for it
    runtime.shutdown_background();

    match result {
        Ok((_, record)) => {
            if let Some(journal) = config.journal_file.as_deref() {
                if let Err(e) = append_record(journal, &record) {
                    log::warn!("{}", e);
                }
            }
            log::info!(
                "{} {} responded ({} body bytes, {})",
                record.script,
                record.method,
                record.body_bytes,
                record.body_outcome
            );
            0
        }
        Err(e) => {
            log::error!("{}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cgi_response::LineEnding;
    use std::time::Duration;

    /// Minimal script that reports what the pipeline handed it
    struct Recorder;

    impl EchoScript for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn header(&self) -> HeaderBlock {
            HeaderBlock::new("text/plain", LineEnding::Lf)
        }

        fn render(&self, input: &RenderInput<'_>) -> String {
            let body = input.body.map(|b| b.text().into_owned()).unwrap_or_else(|| "-".to_string());
            format!("method={} body={} warnings={}\n", input.method, body, input.degradations.len())
        }
    }

    async fn run_recorder(vars: &[(&str, &str)], stdin: &[u8], config: &Config) -> (String, InvocationRecord) {
        let env = CgiEnv::from_vars(vars.iter().copied());
        let (output, record) = respond(&Recorder, &env, config, stdin, Vec::new()).await.unwrap();
        (String::from_utf8(output).unwrap(), record)
    }

    #[tokio::test]
    async fn test_header_comes_first() {
        let (out, record) = run_recorder(&[("REQUEST_METHOD", "GET")], b"", &Config::default()).await;
        assert_eq!(out, "Content-Type: text/plain\n\nmethod=GET body=- warnings=0\n");
        assert_eq!(record.body_outcome, "not_read");
    }

    #[tokio::test]
    async fn test_post_reads_declared_bytes() {
        let (out, record) = run_recorder(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "5")],
            b"hello world",
            &Config::default(),
        )
        .await;
        assert!(out.ends_with("method=POST body=hello warnings=0\n"));
        assert_eq!(record.body_bytes, 5);
        assert_eq!(record.body_outcome, "complete");
    }

    #[tokio::test]
    async fn test_malformed_length_skips_body() {
        let (out, record) = run_recorder(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "ten")],
            b"0123456789",
            &Config::default(),
        )
        .await;
        assert!(out.ends_with("body=- warnings=1\n"));
        assert_eq!(record.degradations.len(), 1);
        assert!(record.degradations[0].contains("'ten'"));
    }

    #[tokio::test]
    async fn test_truncated_body_is_kept() {
        let (out, record) = run_recorder(
            &[("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "50")],
            b"short",
            &Config::default(),
        )
        .await;
        assert!(out.ends_with("body=short warnings=1\n"));
        assert_eq!(record.body_outcome, "truncated");
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let config = Config {
            body_timeout: Duration::from_millis(50),
            ..Config::default()
        };
        let env = CgiEnv::from_vars([("REQUEST_METHOD", "POST"), ("CONTENT_LENGTH", "10")]);
        let (client, server) = tokio::io::duplex(16);

        let (output, record) = respond(&Recorder, &env, &config, server, Vec::new()).await.unwrap();
        drop(client);

        assert!(String::from_utf8(output).unwrap().ends_with("body= warnings=1\n"));
        assert_eq!(record.body_outcome, "timed_out");
    }

    #[tokio::test]
    async fn test_unknown_method_is_informational() {
        let (out, record) = run_recorder(&[("REQUEST_METHOD", "BREW")], b"", &Config::default()).await;
        assert!(out.ends_with("method=BREW body=- warnings=1\n"));
        assert_eq!(record.method, "BREW");
    }

    #[tokio::test]
    async fn test_failing_output_is_an_error() {
        #[derive(Debug)]
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let env = CgiEnv::from_vars([("REQUEST_METHOD", "GET")]);
        let err = respond(&Recorder, &env, &Config::default(), &b""[..], Closed).await.unwrap_err();
        assert_eq!(err.operation, "emit_header");
    }
}
