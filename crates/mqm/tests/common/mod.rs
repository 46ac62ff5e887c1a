#![allow(dead_code)]

use bson::{Bson, DateTime, Document};
use chrono::NaiveDate;
use mqm::{CompileError, CompileOptions, QueryDocument, compile};

pub fn query(q: &str) -> QueryDocument {
    compile(q, &CompileOptions::default()).unwrap()
}

pub fn query_with(q: &str, options: &CompileOptions) -> QueryDocument {
    compile(q, options).unwrap()
}

pub fn populated(q: &str) -> QueryDocument {
    compile(q, &CompileOptions::new().with_population(true)).unwrap()
}

pub fn query_err(q: &str) -> CompileError {
    compile(q, &CompileOptions::default()).unwrap_err()
}

pub fn populated_err(q: &str) -> CompileError {
    compile(q, &CompileOptions::new().with_population(true)).unwrap_err()
}

/// Query that only carries a filter.
pub fn filtered(filter: Document) -> QueryDocument {
    QueryDocument {
        filter,
        ..Default::default()
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, micros: u32) -> Bson {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_micro_opt(h, min, s, micros)
        .unwrap();
    Bson::DateTime(DateTime::from_millis(naive.and_utc().timestamp_millis()))
}

pub fn regex(pattern: &str, options: &str) -> Bson {
    Bson::RegularExpression(bson::Regex {
        pattern: pattern.to_owned(),
        options: options.to_owned(),
    })
}

/// JSON literal as BSON, with the same integer widths the projection
/// decoder produces.
pub fn json(value: serde_json::Value) -> Bson {
    bson::to_bson(&value).unwrap()
}
