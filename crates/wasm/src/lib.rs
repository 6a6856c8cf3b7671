//! Stateless JSON bridge for the web dashboard. Every call takes its inputs
//! as JSON text and returns freshly serialized JSON.

use sched_lens_core::analysis::{self, CompareOptions};
use sched_lens_core::layout::Panel;
use sched_lens_core::metrics::{build_utilization, merge_series};
use sched_lens_core::parsers::{self, DetectionPolicy, ParseError};
use sched_lens_core::views::gantt::render_gantt_panel;
use sched_lens_core::views::utilization::{render_comparison, render_utilization};
use sched_lens_protocol::Viewport;
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Debug, Error)]
enum BridgeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown panel: {0}")]
    UnknownPanel(String),
}

fn options(json: Option<&str>) -> Result<CompareOptions, BridgeError> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(serde_json::from_str(s)?),
        None => Ok(CompareOptions::default()),
    }
}

fn panel(name: &str) -> Result<Panel, BridgeError> {
    match name {
        "baseline" => Ok(Panel::Baseline),
        "compare" | "memory_aware" => Ok(Panel::Compare),
        other => Err(BridgeError::UnknownPanel(other.to_string())),
    }
}

fn normalize_timeline_json(json: &str) -> Result<String, BridgeError> {
    let intervals = parsers::parse_timeline(json.as_bytes())?;
    Ok(serde_json::to_string(&intervals)?)
}

fn utilization_series_json(json: &str, total_time: Option<f64>) -> Result<String, BridgeError> {
    let intervals = parsers::parse_timeline(json.as_bytes())?;
    Ok(serde_json::to_string(&build_utilization(&intervals, total_time))?)
}

fn analyze_run_json(json: &str) -> Result<String, BridgeError> {
    let result = parsers::parse_result(json.as_bytes())?;
    let run = analysis::analyze_run(&result, DetectionPolicy::default());
    Ok(serde_json::to_string(&run)?)
}

fn build_comparison(
    baseline: &str,
    compare: &str,
    options_json: Option<&str>,
) -> Result<analysis::Comparison, BridgeError> {
    let baseline = parsers::parse_result(baseline.as_bytes())?;
    let compare = parsers::parse_result(compare.as_bytes())?;
    let options = options(options_json)?;
    Ok(analysis::compare_runs(&baseline, &compare, &options))
}

/// Normalize a timeline in any supported shape into `[{pid, start, end}]`.
#[wasm_bindgen]
pub fn normalize_timeline(json: &str) -> Result<String, JsError> {
    Ok(normalize_timeline_json(json)?)
}

/// Build a 0/100 busy series from a timeline.
#[wasm_bindgen]
pub fn utilization_series(json: &str, total_time: Option<f64>) -> Result<String, JsError> {
    Ok(utilization_series_json(json, total_time)?)
}

/// Derive intervals, series, quanta and context switches from one result.
#[wasm_bindgen]
pub fn analyze_run(json: &str) -> Result<String, JsError> {
    Ok(analyze_run_json(json)?)
}

/// Build the full baseline-vs-compare view. `options` is an optional
/// `CompareOptions` JSON object.
#[wasm_bindgen]
pub fn compare_runs(
    baseline: &str,
    compare: &str,
    options: Option<String>,
) -> Result<String, JsError> {
    let comparison = build_comparison(baseline, compare, options.as_deref())?;
    Ok(serde_json::to_string(&comparison).map_err(BridgeError::from)?)
}

/// Render one Gantt panel (`"baseline"` or `"compare"`) as render commands.
#[wasm_bindgen]
pub fn render_gantt(
    baseline: &str,
    compare: &str,
    options: Option<String>,
    panel_name: &str,
) -> Result<String, JsError> {
    Ok(render_gantt_json(baseline, compare, options.as_deref(), panel_name)?)
}

fn render_gantt_json(
    baseline: &str,
    compare: &str,
    options_json: Option<&str>,
    panel_name: &str,
) -> Result<String, BridgeError> {
    let panel = panel(panel_name)?;
    let comparison = build_comparison(baseline, compare, options_json)?;
    let commands = render_gantt_panel(&comparison.gantt, panel);
    Ok(serde_json::to_string(&commands)?)
}

/// Render a result's CPU utilization chart. With a compare result, both
/// runs are drawn as overlaid step lines instead.
#[wasm_bindgen]
pub fn render_utilization_chart(
    baseline: &str,
    compare: Option<String>,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    Ok(render_utilization_json(
        baseline,
        compare.as_deref(),
        &Viewport::sized(width, height),
    )?)
}

fn render_utilization_json(
    baseline: &str,
    compare: Option<&str>,
    viewport: &Viewport,
) -> Result<String, BridgeError> {
    let policy = DetectionPolicy::default();
    let base = analysis::analyze_run(&parsers::parse_result(baseline.as_bytes())?, policy);
    let commands = match compare {
        Some(json) => {
            let cmp = analysis::analyze_run(&parsers::parse_result(json.as_bytes())?, policy);
            render_comparison(&merge_series(&base.series, &cmp.series), viewport)
        }
        None => render_utilization(&base.series, viewport),
    };
    Ok(serde_json::to_string(&commands)?)
}
