use console_error_panic_hook::set_once as set_panic_hook;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::cidr::CidrBlock;
use crate::datetime::{DateParseResult, TimeUnit};
use crate::json::{Indentation, ReformatConfig};

pub mod cidr;
pub mod cron;
pub mod datetime;
pub mod english;
pub mod json;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    set_panic_hook();
    tracing_wasm::set_as_global_default();
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CidrSummary {
    #[serde(rename = "type")]
    kind: &'static str,
    expression: String,
    reserved_bit_count: u32,
    bits: Vec<u8>,
    segments: Vec<u16>,
    /// Decimal text; IPv6 counts overflow JS numbers.
    address_count: String,
    first_address: String,
    last_address: String,
    netmask: String,
}

#[wasm_bindgen]
pub fn cidr_info(expression: &str) -> Result<JsValue, JsValue> {
    cidr_info_internal(expression)
        .and_then(|res| serde_wasm_bindgen::to_value(&res).map_err(|err| err.to_string()))
        .map_err(|err| JsValue::from_str(&err))
}

fn cidr_info_internal(expression: &str) -> Result<CidrSummary, String> {
    let block = CidrBlock::parse(expression).map_err(|err| err.to_string())?;
    let kind = match block {
        CidrBlock::V4(_) => "v4",
        CidrBlock::V6(_) => "v6",
    };
    Ok(CidrSummary {
        kind,
        expression: block.expression().to_string(),
        reserved_bit_count: block.reserved_bit_count(),
        bits: block.bits(),
        segments: block.segments(),
        address_count: block.address_count().to_string(),
        first_address: block.first_address(),
        last_address: block.last_address(),
        netmask: block.netmask(),
    })
}

#[wasm_bindgen]
pub fn cidr_includes(expression: &str, address: &str) -> Result<bool, JsValue> {
    cidr_includes_internal(expression, address).map_err(|err| JsValue::from_str(&err))
}

fn cidr_includes_internal(expression: &str, address: &str) -> Result<bool, String> {
    let block = CidrBlock::parse(expression).map_err(|err| err.to_string())?;
    Ok(block.includes(address))
}

/// `"superset"`, `"subset"` or `null` when the blocks are unrelated.
#[wasm_bindgen]
pub fn cidr_conflict(left: &str, right: &str) -> Result<Option<String>, JsValue> {
    cidr_conflict_internal(left, right).map_err(|err| JsValue::from_str(&err))
}

fn cidr_conflict_internal(left: &str, right: &str) -> Result<Option<String>, String> {
    let left = CidrBlock::parse(left).map_err(|err| err.to_string())?;
    let right = CidrBlock::parse(right).map_err(|err| err.to_string())?;
    Ok(left
        .is_conflicting(&right)
        .map(|containment| containment.to_string()))
}

#[wasm_bindgen]
pub fn cidr_conflicts(input: &str) -> Result<JsValue, JsValue> {
    let conflicts = cidr::check_conflicts(input);
    serde_wasm_bindgen::to_value(&conflicts).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn cron_describe(expression: &str) -> Result<JsValue, JsValue> {
    let inferences = cron::infer(expression);
    serde_wasm_bindgen::to_value(&inferences).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn cron_weekdays(spec: &str) -> Result<JsValue, JsValue> {
    cron::compute_effective_weekdays_from_spec(spec)
        .map_err(|err| err.to_string())
        .and_then(|days| serde_wasm_bindgen::to_value(&days).map_err(|err| err.to_string()))
        .map_err(|err| JsValue::from_str(&err))
}

#[wasm_bindgen]
pub fn cron_months(spec: &str) -> Result<JsValue, JsValue> {
    cron::compute_effective_months_from_spec(spec)
        .map_err(|err| err.to_string())
        .and_then(|months| serde_wasm_bindgen::to_value(&months).map_err(|err| err.to_string()))
        .map_err(|err| JsValue::from_str(&err))
}

/// Reformats permissive JSON; `indentation` is `"tabs"`, `"2"` or `"4"`.
#[wasm_bindgen]
pub fn json_reformat(input: &str, indentation: &str) -> Result<String, JsValue> {
    json_reformat_internal(input, indentation).map_err(|err| JsValue::from_str(&err))
}

fn json_reformat_internal(input: &str, indentation: &str) -> Result<String, String> {
    let indentation: Indentation = indentation.parse().map_err(|err: json::JsonError| err.to_string())?;
    let config = ReformatConfig { indentation };
    Ok(json::reformat_with(input, &config))
}

#[wasm_bindgen]
pub fn json_format_strict(input: &str) -> Result<String, JsValue> {
    json::strict::format(input).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn json_minify(input: &str) -> Result<String, JsValue> {
    json::strict::minify(input).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Byte ranges the permissive parser had to recover from, as `[{from, to}]`.
#[wasm_bindgen]
pub fn json_syntax_errors(input: &str) -> Result<JsValue, JsValue> {
    let errors = json::parse(input).errors().to_vec();
    serde_wasm_bindgen::to_value(&errors).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum DateTextResult {
    PointInTime {
        iso: String,
        millis: i64,
        seconds: i64,
    },
    Duration {
        count: f64,
        unit: TimeUnit,
    },
    UnitConversion {
        in_count: f64,
        in_unit: TimeUnit,
        out_count: f64,
        out_unit: TimeUnit,
    },
}

impl From<DateParseResult> for DateTextResult {
    fn from(result: DateParseResult) -> Self {
        match result {
            DateParseResult::PointInTime { date_time } => {
                DateTextResult::PointInTime {
                    iso: date_time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    millis: date_time.timestamp_millis(),
                    seconds: date_time.timestamp(),
                }
            }
            DateParseResult::Duration { count, unit } => DateTextResult::Duration { count, unit },
            DateParseResult::UnitConversion {
                in_count,
                in_unit,
                out_count,
                out_unit,
            } => DateTextResult::UnitConversion {
                in_count,
                in_unit,
                out_count,
                out_unit,
            },
        }
    }
}

/// Parses free-form date text; unrecognised input yields `null`.
#[wasm_bindgen]
pub fn parse_date_text(input: &str) -> Result<JsValue, JsValue> {
    let result = parse_date_text_internal(input);
    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn parse_date_text_internal(input: &str) -> Option<DateTextResult> {
    datetime::parse_date(input).map(DateTextResult::from)
}

#[wasm_bindgen]
pub fn time_period_seconds(input: &str) -> Result<f64, JsValue> {
    datetime::period::time_period_to_seconds(input).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod lib_tests;
