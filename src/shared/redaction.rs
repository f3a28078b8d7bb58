//! PII Redaction
//!
//! Log lines that carry user data are written as `field=value;` pairs. This
//! module rewrites the values of selected fields to a fixed marker before the
//! line leaves the process.
//!
//! - [`filter_datum`] - redact a single message
//! - [`RedactingFormatter`] - wrap a `tracing-subscriber` event formatter so
//!   every emitted line goes through [`filter_datum`]
//!
//! # Example
//!
//! ```rust
//! use authkeep::shared::redaction::filter_datum;
//!
//! let line = filter_datum(&["password"], "***", "name=a;password=secret;", ';');
//! assert_eq!(line, "name=a;password=***;");
//! ```

use std::fmt::{self, Write as _};

use regex::{Captures, Regex};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Fields treated as personally identifiable in server logs
pub const PII_FIELDS: [&str; 6] = ["name", "email", "phone", "ssn", "password", "ip"];

/// Marker written in place of a redacted value
pub const REDACTION: &str = "***";

/// Separator terminating each `field=value` pair
pub const SEPARATOR: char = ';';

/// Replace the value of every `field=value<separator>` occurrence of the
/// given fields with `redaction`.
///
/// The value is the shortest run up to the next separator and may be empty.
/// Field names match case-sensitively and exactly: a name counts only at the
/// start of the message or right after the separator or whitespace, so
/// `username=`, `user-name=` and `x.name=` are left alone when redacting
/// `name`. A pair without a trailing separator is not touched.
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: char,
) -> String {
    match datum_pattern(fields, separator) {
        Some(pattern) => redact(&pattern, redaction, message),
        None => message.to_string(),
    }
}

/// `(boundary)(field)=value`, the trailing separator left unconsumed so the
/// next pair still sees it as its boundary
fn datum_pattern<S: AsRef<str>>(fields: &[S], separator: char) -> Option<Regex> {
    let names: Vec<String> = fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !field.is_empty())
        .map(regex::escape)
        .collect();

    if names.is_empty() {
        return None;
    }

    let separator = regex::escape(&separator.to_string());
    let source = format!(
        r"(^|{sep}|\s)({names})=[^{sep}]*",
        sep = separator,
        names = names.join("|")
    );
    match Regex::new(&source) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::error!("Failed to build redaction pattern: {:?}", e);
            None
        }
    }
}

fn redact(pattern: &Regex, redaction: &str, message: &str) -> String {
    pattern
        .replace_all(message, |caps: &Captures<'_>| {
            let terminated = caps.get(0).is_some_and(|pair| pair.end() < message.len());
            if terminated {
                format!("{}{}={}", &caps[1], &caps[2], redaction)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Event formatter that redacts PII from the output of an inner formatter.
///
/// ```rust,no_run
/// use authkeep::shared::redaction::{RedactingFormatter, PII_FIELDS};
///
/// tracing_subscriber::fmt()
///     .event_format(RedactingFormatter::new(tracing_subscriber::fmt::format(), &PII_FIELDS))
///     .init();
/// ```
pub struct RedactingFormatter<F> {
    inner: F,
    pattern: Option<Regex>,
    redaction: String,
}

impl<F> RedactingFormatter<F> {
    /// Redact `fields` with the default marker and separator
    pub fn new<S: AsRef<str>>(inner: F, fields: &[S]) -> Self {
        Self {
            inner,
            pattern: datum_pattern(fields, SEPARATOR),
            redaction: REDACTION.to_string(),
        }
    }

    pub fn with_redaction(mut self, redaction: impl Into<String>) -> Self {
        self.redaction = redaction.into();
        self
    }

    /// Apply redaction to an already formatted line
    pub fn redact_line(&self, line: &str) -> String {
        match &self.pattern {
            Some(pattern) => redact(pattern, &self.redaction, line),
            None => line.to_string(),
        }
    }
}

impl<S, N, F> FormatEvent<S, N> for RedactingFormatter<F>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    F: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut line = String::new();
        self.inner.format_event(ctx, Writer::new(&mut line), event)?;
        writer.write_str(&self.redact_line(&line))
    }
}
