use anyhow::{bail, Context as _, Result};
use derive_builder::Builder;
use lambda_runtime::Error;
use std::{env, fmt, str::FromStr, sync::Arc};

/// Callback run after a successful invocation with the request, the response
/// and the elapsed handler time in milliseconds.
pub type PostAction<Req, Resp> = Arc<dyn Fn(&Req, &Resp, f64) -> Result<(), Error> + Send + Sync>;

/// How the elapsed time is rendered in the response entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ElapsedFormat {
    /// Integer part of the milliseconds, e.g. `12`.
    #[default]
    WholeMillis,
    /// Four decimal places, e.g. `12.0482`.
    Precise,
}

impl ElapsedFormat {
    pub fn render(self, elapsed_ms: f64) -> String {
        match self {
            Self::WholeMillis => format!("{}", elapsed_ms.trunc() as u64),
            Self::Precise => format!("{:.4}", elapsed_ms),
        }
    }
}

impl FromStr for ElapsedFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole" => Ok(Self::WholeMillis),
            "precise" => Ok(Self::Precise),
            other => bail!("unknown elapsed format: {:?}", other),
        }
    }
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct LoggingOptions<Req, Resp> {
    /// Log the full response after the handler returns.
    ///
    /// IMPORTANT: response bodies can be huge and logging them hurts performance
    /// and stability. Know what you are doing before you enable this.
    #[builder(default)]
    pub log_response: bool,

    /// Log the full request, the invocation context and the claims before the
    /// handler runs.
    #[builder(default)]
    pub log_invocation_context: bool,

    #[builder(default)]
    pub elapsed_format: ElapsedFormat,

    #[builder(setter(custom), default)]
    pub post_action: Option<PostAction<Req, Resp>>,
}

impl<Req, Resp> LoggingOptions<Req, Resp> {
    pub fn builder() -> LoggingOptionsBuilder<Req, Resp> {
        LoggingOptionsBuilder::default()
    }
}

impl<Req, Resp> Default for LoggingOptions<Req, Resp> {
    fn default() -> Self {
        Self::builder().build().expect("all options have defaults")
    }
}

impl<Req, Resp> fmt::Debug for LoggingOptions<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingOptions")
            .field("log_response", &self.log_response)
            .field("log_invocation_context", &self.log_invocation_context)
            .field("elapsed_format", &self.elapsed_format)
            .field("post_action", &self.post_action.is_some())
            .finish()
    }
}

impl<Req, Resp> LoggingOptionsBuilder<Req, Resp> {
    pub fn post_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Req, &Resp, f64) -> Result<(), Error> + Send + Sync + 'static,
    {
        let action: PostAction<Req, Resp> = Arc::new(action);
        self.post_action = Some(Some(action));
        self
    }

    /// Applies `LOG_RESPONSE_BODY`, `LOG_INVOCATION_CONTEXT` and
    /// `LOG_ELAPSED_FORMAT` from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_lookup(|key| env::var(key).ok())
    }

    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LOG_RESPONSE_BODY") {
            let enabled = parse_bool(&v).context("invalid LOG_RESPONSE_BODY")?;
            self = self.log_response(enabled);
        }
        if let Some(v) = lookup("LOG_INVOCATION_CONTEXT") {
            let enabled = parse_bool(&v).context("invalid LOG_INVOCATION_CONTEXT")?;
            self = self.log_invocation_context(enabled);
        }
        if let Some(v) = lookup("LOG_ELAPSED_FORMAT") {
            let format = v.parse().context("invalid LOG_ELAPSED_FORMAT")?;
            self = self.elapsed_format(format);
        }
        Ok(self)
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("not a boolean: {:?}", other),
    }
}
