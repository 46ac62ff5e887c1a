use std::sync::LazyLock;

use bson::{Bson, DateTime};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::options::CasterTable;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid regex"));

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?$").expect("valid regex")
});

static DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<year>[12][0-9]{3})-(?P<month>0[1-9]|1[0-2])(?:-(?P<day>0[1-9]|[12][0-9]|3[01]))?",
        r"(?:T| )?",
        r"(?:(?P<hour>[01][0-9]|2[0-3]):(?P<minute>[0-5][0-9])",
        r"(?::(?P<second>[0-5][0-9])(?:\.(?P<fraction>[0-9]+))?)?",
        r"(?P<zone>Z|[-+][0-9]{2}:[0-9]{2})?)?$",
    ))
    .expect("valid regex")
});

static WORD_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+(?:,\w+)+$").expect("valid regex"));

static REGEX_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(?P<pattern>(?:[^\r\n\[/\\]|\\.|\[(?:[^\r\n\]\\]|\\.)*\])+)/(?P<flags>[gim]*)$")
        .expect("valid regex")
});

/// Built-in cast rules. Order is load-bearing: `5` must be an integer
/// before the float rule sees it, and `2016` an integer before the date
/// rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Integer,
    Float,
    DateTime,
    WordList,
    Pattern,
    Literal,
}

const BUILTIN_RULES: [Rule; 6] = [
    Rule::Integer,
    Rule::Float,
    Rule::DateTime,
    Rule::WordList,
    Rule::Pattern,
    Rule::Literal,
];

impl Rule {
    /// `None` means the rule does not apply and the next one is tried.
    fn apply(self, raw: &str) -> Option<Bson> {
        match self {
            Rule::Integer => {
                if !INTEGER.is_match(raw) {
                    return None;
                }
                raw.parse().ok().map(Bson::Int64)
            }
            Rule::Float => {
                if !FLOAT.is_match(raw) {
                    return None;
                }
                raw.parse().ok().map(Bson::Double)
            }
            Rule::DateTime => DATETIME
                .captures(raw)
                .and_then(|caps| parse_datetime(raw, &caps))
                .map(Bson::DateTime),
            Rule::WordList => WORD_LIST.is_match(raw).then(|| {
                Bson::Array(raw.split(',').map(|s| Bson::String(s.to_owned())).collect())
            }),
            Rule::Pattern => REGEX_LITERAL
                .captures(raw)
                .and_then(|caps| parse_pattern(&caps))
                .map(Bson::RegularExpression),
            Rule::Literal => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(Bson::Boolean(true)),
                "false" => Some(Bson::Boolean(false)),
                "null" | "none" => Some(Bson::Null),
                _ => None,
            },
        }
    }
}

/// Run the built-in rules only. Text that no rule claims comes back as a
/// string.
pub fn cast_builtin(raw: &str) -> Bson {
    BUILTIN_RULES
        .iter()
        .find_map(|rule| rule.apply(raw))
        .unwrap_or_else(|| Bson::String(raw.to_owned()))
}

/// Turns raw argument values into typed BSON values.
///
/// Custom casters run first, so a caller can take over any value written as
/// `name(inner)`. String elements of a cast list are cast again through the
/// whole cascade, once: a list produced by an element is kept as it is.
#[derive(Debug, Clone, Copy)]
pub struct Caster<'a> {
    custom: &'a CasterTable,
}

impl<'a> Caster<'a> {
    pub fn new(custom: &'a CasterTable) -> Self {
        Self { custom }
    }

    pub fn cast(&self, raw: &str) -> CompileResult<Bson> {
        match self.cast_once(raw)? {
            Bson::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Bson::String(s) => self.cast_once(&s),
                    other => Ok(other),
                })
                .collect::<CompileResult<Vec<_>>>()
                .map(Bson::Array),
            other => Ok(other),
        }
    }

    fn cast_once(&self, raw: &str) -> CompileResult<Bson> {
        Ok(match self.cast_custom(raw)? {
            Some(value) => value,
            None => cast_builtin(raw),
        })
    }

    fn cast_custom(&self, raw: &str) -> CompileResult<Option<Bson>> {
        for (name, cast) in self.custom.iter() {
            let Some(inner) = raw
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('('))
                .and_then(|rest| rest.strip_suffix(')'))
            else {
                continue;
            };

            debug!(caster = name, value = raw, "custom caster matched");
            return cast(inner)
                .map(Some)
                .map_err(|source| CompileError::CustomCasterFail {
                    value: raw.to_owned(),
                    caster: name.to_owned(),
                    source,
                });
        }
        Ok(None)
    }
}

fn parse_datetime(raw: &str, caps: &Captures<'_>) -> Option<DateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(DateTime::from_millis(dt.timestamp_millis()));
    }

    // Partial forms: missing parts default to the start of their period.
    let part = |name: &str, default: u32| match caps.name(name) {
        Some(m) => m.as_str().parse::<u32>().ok(),
        None => Some(default),
    };

    let year = caps.name("year")?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, part("month", 1)?, part("day", 1)?)?;
    let nanos = caps.name("fraction").map_or(0, |m| fraction_nanos(m.as_str()));
    let time =
        NaiveTime::from_hms_nano_opt(part("hour", 0)?, part("minute", 0)?, part("second", 0)?, nanos)?;
    let naive = date.and_time(time);

    let millis = match caps.name("zone").map(|m| m.as_str()) {
        None | Some("Z") => naive.and_utc().timestamp_millis(),
        Some(zone) => naive
            .and_local_timezone(parse_offset(zone)?)
            .single()?
            .timestamp_millis(),
    };
    Some(DateTime::from_millis(millis))
}

/// `"092062"` -> 92_062_000 ns. Digits past nanosecond precision are dropped.
fn fraction_nanos(digits: &str) -> u32 {
    let digits = &digits[..digits.len().min(9)];
    let scale = 10u32.pow(9 - digits.len() as u32);
    digits.parse::<u32>().map_or(0, |n| n * scale)
}

/// `"+02:00"` / `"-05:30"`.
fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, rest) = zone.split_at(1);
    let (hours, minutes) = rest.split_once(':')?;
    let seconds = (hours.parse::<i32>().ok()? * 60 + minutes.parse::<i32>().ok()?) * 60;
    match sign {
        "+" => FixedOffset::east_opt(seconds),
        _ => FixedOffset::west_opt(seconds),
    }
}

fn parse_pattern(caps: &Captures<'_>) -> Option<bson::Regex> {
    let pattern = caps.name("pattern")?.as_str();
    if pattern.starts_with(['*', '+', '?']) {
        return None;
    }

    let mut options: Vec<char> = Vec::with_capacity(3);
    for flag in caps.name("flags").map_or("", |m| m.as_str()).chars() {
        if options.contains(&flag) {
            return None;
        }
        options.push(flag);
    }
    // `g` has no meaning to the database.
    options.retain(|flag| *flag != 'g');
    options.sort_unstable();

    Some(bson::Regex {
        pattern: pattern.to_owned(),
        options: options.into_iter().collect(),
    })
}
