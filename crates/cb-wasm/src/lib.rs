//! WebAssembly bindings for the CSPBypass checker
//!
//! Both extension contexts (background worker and popup) call the same
//! resolver through these bindings, so the matching logic exists only
//! once. The dataset snapshot is installed by the JS side, which owns
//! fetching and storage; timestamps cross the boundary as unix millis
//! because `SystemTime::now()` is unavailable on wasm32-unknown-unknown.

use std::sync::RwLock;
use std::time::{Duration, SystemTime};

use wasm_bindgen::prelude::*;

use cb_core::{badge_text, resolve, select_csp, Dataset};

static DATASET: RwLock<Option<Dataset>> = RwLock::new(None);

/// Install (or replace) the dataset snapshot from a raw TSV body.
/// Returns the number of records parsed.
#[wasm_bindgen]
pub fn load_dataset(tsv: &str, fetched_at_ms: f64) -> usize {
    let fetched_at = SystemTime::UNIX_EPOCH + Duration::from_millis(fetched_at_ms as u64);
    let dataset = Dataset::from_tsv(tsv, fetched_at);
    let count = dataset.len();

    let mut slot = DATASET.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(dataset);
    count
}

#[wasm_bindgen]
pub fn is_loaded() -> bool {
    DATASET
        .read()
        .map(|slot| slot.is_some())
        .unwrap_or(false)
}

/// Whether the installed snapshot is still inside the 6-hour freshness
/// window at `now_ms`. False when nothing is loaded.
#[wasm_bindgen]
pub fn dataset_is_fresh(now_ms: f64) -> bool {
    let now = SystemTime::UNIX_EPOCH + Duration::from_millis(now_ms as u64);
    let slot = match DATASET.read() {
        Ok(slot) => slot,
        Err(_) => return false,
    };
    slot.as_ref().map_or(false, |ds| ds.is_fresh(now))
}

/// Resolve a CSP string or free-text query against the installed
/// snapshot. Returns `{count, badge, matches: [{domain, payload}]}`;
/// the zero-result shape when no dataset is loaded.
#[wasm_bindgen]
pub fn resolve_query(input: &str) -> JsValue {
    let slot = DATASET.read().unwrap_or_else(|e| e.into_inner());

    let result = match slot.as_ref() {
        Some(dataset) => resolve(input, dataset),
        None => Default::default(),
    };

    let js_result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&js_result, &"count".into(), &JsValue::from(result.count as u32));
    let _ = js_sys::Reflect::set(
        &js_result,
        &"badge".into(),
        &JsValue::from_str(&badge_text(result.count)),
    );

    let matches = js_sys::Array::new();
    for record in &result.matches {
        let entry = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&entry, &"domain".into(), &JsValue::from_str(&record.domain));
        let _ = js_sys::Reflect::set(&entry, &"payload".into(), &JsValue::from_str(&record.payload));
        matches.push(&entry);
    }
    let _ = js_sys::Reflect::set(&js_result, &"matches".into(), &matches);

    js_result.into()
}

/// Badge text for a count: "" for zero, "999+" above the cap.
#[wasm_bindgen]
pub fn badge_text_js(count: u32) -> String {
    badge_text(count as usize)
}

/// Pick the effective CSP among the meta-tag, report-only meta-tag and
/// HTTP header values. Returns `{csp, source}` or null; `source` is one
/// of "meta", "meta-report-only", "http-header".
#[wasm_bindgen]
pub fn select_csp_js(
    meta: Option<String>,
    meta_report_only: Option<String>,
    header: Option<String>,
) -> JsValue {
    let detected = match select_csp(
        meta.as_deref(),
        meta_report_only.as_deref(),
        header.as_deref(),
    ) {
        Some(detected) => detected,
        None => return JsValue::NULL,
    };

    let source = match detected.source {
        cb_core::CspSource::Meta => "meta",
        cb_core::CspSource::MetaReportOnly => "meta-report-only",
        cb_core::CspSource::HttpHeader => "http-header",
    };

    let js_result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&js_result, &"csp".into(), &JsValue::from_str(&detected.csp));
    let _ = js_sys::Reflect::set(&js_result, &"source".into(), &JsValue::from_str(source));
    js_result.into()
}
