//! Pure text construction for log lines.
//!
//! Nothing here touches the sink: the `Logger` hands the current format
//! settings in and writes whatever comes back.

use std::fmt::{Display, Write as _};

use chrono::{
    DateTime, Local, TimeZone,
    format::{Item, StrftimeItems},
};

use crate::log::{context::Context, log_level::LogLevel};

/// Default strftime specifier, `YYYY-MM-DD HH:MM:SS`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default line template: date, level and message separated by single spaces.
pub const DEFAULT_LINE_FORMAT: &str = "{date} {level} {message}";

/// Replaces every `{key}` in `template` whose key is present in `context`.
///
/// The scan is a single left-to-right pass: substituted values are copied to
/// the output and never scanned again, so a value such as `"{level}"` comes
/// out literally. When several keys match at one position the longest wins.
/// Placeholders without a matching key are left untouched.
#[must_use]
pub fn interpolate(template: &str, context: &Context) -> String {
    if context.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match context.placeholder_at(tail) {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Date,
    Level,
    Message,
}

impl Slot {
    const PLACEHOLDERS: [(&'static str, Slot); 3] = [
        ("{date}", Slot::Date),
        ("{level}", Slot::Level),
        ("{message}", Slot::Message),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A parsed line template.
///
/// `{date}`, `{level}` and `{message}` become slots; everything else is kept
/// verbatim. A slot may appear any number of times, including zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    source: String,
    segments: Vec<Segment>,
}

impl LineFormat {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let tail = &rest[open..];
            let slot = Slot::PLACEHOLDERS
                .iter()
                .find(|(placeholder, _)| tail.starts_with(placeholder));

            match slot {
                Some((placeholder, slot)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(*slot));
                    rest = &tail[placeholder.len()..];
                }
                None => {
                    literal.push('{');
                    rest = &tail[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: template.to_owned(),
            segments,
        }
    }

    /// The template this format was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fills the slots. Always returns the date, label and message in their
    /// own slots, whatever order the template lists them in.
    #[must_use]
    pub fn render(&self, date: &str, label: &str, message: &str) -> String {
        let mut line = String::with_capacity(self.source.len() + date.len() + message.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Slot(Slot::Date) => line.push_str(date),
                Segment::Slot(Slot::Level) => line.push_str(label),
                Segment::Slot(Slot::Message) => line.push_str(message),
            }
        }
        line
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::parse(DEFAULT_LINE_FORMAT)
    }
}

/// Renders a strftime `spec` for `now`.
///
/// chrono refuses specs with unknown conversions; those are written out as
/// the raw spec so a bad format can never take a log call down.
#[must_use]
pub fn render_date<Tz>(now: &DateTime<Tz>, spec: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return spec.to_owned();
    }

    let mut date = String::new();
    match write!(date, "{}", now.format_with_items(items.iter())) {
        Ok(()) => date,
        Err(_) => spec.to_owned(),
    }
}

/// Builds one log line (without the trailing newline) stamped with the
/// current local time.
#[must_use]
pub fn format_line(
    date_format: &str,
    level: LogLevel,
    message: &str,
    line_format: &LineFormat,
) -> String {
    format_line_at(&Local::now(), date_format, level, message, line_format)
}

/// Same as [`format_line`] for an explicit timestamp.
#[must_use]
pub fn format_line_at<Tz>(
    now: &DateTime<Tz>,
    date_format: &str,
    level: LogLevel,
    message: &str,
    line_format: &LineFormat,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = render_date(now, date_format);
    line_format.render(&date, level.label(), message)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 4, 25, 13, 37, 42).unwrap()
    }

    #[test]
    fn interpolate_replaces_known_keys() {
        let ctx = Context::from([("name", "World")]);
        assert_eq!(interpolate("Hello {name}", &ctx), "Hello World");
    }

    #[test]
    fn interpolate_with_empty_context_is_identity() {
        let template = "Hello {name} and {other}";
        assert_eq!(interpolate(template, &Context::new()), template);
    }

    #[test]
    fn interpolate_does_not_expand_substituted_values() {
        let ctx = Context::from([("a", "{b}"), ("b", "nope")]);
        assert_eq!(interpolate("{a} {b}", &ctx), "{b} nope");

        let ctx = Context::from([("name", "{level}")]);
        assert_eq!(interpolate("x {name} y", &ctx), "x {level} y");
    }

    #[test]
    fn interpolate_leaves_unknown_and_partial_placeholders() {
        let ctx = Context::from([("id", 7)]);
        assert_eq!(
            interpolate("{id} {missing} {id {{id}} }", &ctx),
            "7 {missing} {id {7} }"
        );
    }

    #[test]
    fn interpolate_replaces_every_occurrence() {
        let ctx = Context::from([("x", "1")]);
        assert_eq!(interpolate("{x}{x}-{x}", &ctx), "11-1");
    }

    #[test]
    fn interpolate_handles_multibyte_text() {
        let ctx = Context::from([("ciudad", "Bogotá")]);
        assert_eq!(interpolate("¡Hola {ciudad}! ñ", &ctx), "¡Hola Bogotá! ñ");
    }

    #[test]
    fn line_format_default_renders_date_level_message() {
        let fmt = LineFormat::default();
        assert_eq!(fmt.as_str(), DEFAULT_LINE_FORMAT);
        assert_eq!(fmt.render("D", "INFO", "msg"), "D INFO msg");
    }

    #[test]
    fn line_format_keeps_slot_meaning_when_reordered() {
        let fmt = LineFormat::parse("[{level}|{date}] {message}");
        assert_eq!(fmt.render("D", "INFO", "msg"), "[INFO|D] msg");
    }

    #[test]
    fn line_format_passes_other_text_through() {
        let fmt = LineFormat::parse("%s {nope} {message} 100% {date");
        assert_eq!(fmt.render("D", "L", "m"), "%s {nope} m 100% {date");
    }

    #[test]
    fn line_format_allows_repeated_and_missing_slots() {
        let fmt = LineFormat::parse("{message}/{message}");
        assert_eq!(fmt.render("D", "L", "m"), "m/m");
    }

    #[test]
    fn render_date_default_spec() {
        assert_eq!(
            render_date(&fixed_time(), DEFAULT_DATE_FORMAT),
            "2013-04-25 13:37:42"
        );
    }

    #[test]
    fn render_date_iso8601_with_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = fixed_time().with_timezone(&offset);
        assert_eq!(render_date(&now, "%+"), "2013-04-25T15:37:42+02:00");
    }

    #[test]
    fn render_date_invalid_spec_is_verbatim() {
        assert_eq!(render_date(&fixed_time(), "%Q bad"), "%Q bad");
    }

    #[test]
    fn format_line_at_builds_full_line() {
        let line = format_line_at(
            &fixed_time(),
            DEFAULT_DATE_FORMAT,
            LogLevel::Debug,
            "A log message",
            &LineFormat::default(),
        );
        assert_eq!(line, "2013-04-25 13:37:42 DEBUG A log message");
    }

    proptest! {
        #[test]
        fn empty_context_never_changes_template(template in ".*") {
            prop_assert_eq!(interpolate(&template, &Context::new()), template);
        }

        #[test]
        fn text_without_braces_is_unchanged(
            template in "[^{}]*",
            key in "[a-z]{1,8}",
            value in ".*",
        ) {
            let ctx = Context::new().with(key, value);
            prop_assert_eq!(interpolate(&template, &ctx), template);
        }

        #[test]
        fn single_placeholder_is_replaced_by_value(
            prefix in "[^{}]*",
            key in "[a-z]{1,8}",
            value in ".*",
        ) {
            let ctx = Context::new().with(key.clone(), value.clone());
            let template = format!("{prefix}{{{key}}}");
            prop_assert_eq!(interpolate(&template, &ctx), format!("{prefix}{value}"));
        }
    }
}
