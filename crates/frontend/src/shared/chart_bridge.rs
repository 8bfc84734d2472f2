//! Bridge to the charting library loaded by the host page
//!
//! The page exposes `window.dashboardCharts.render(canvasId, kind, data)`;
//! chart drawing itself happens on the JS side.

use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};

const CHARTS_GLOBAL: &str = "dashboardCharts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Bars for revenue, line for order count on a second axis
    BarLine,
    Donut,
    Line,
}

impl ChartKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::BarLine => "bar_line",
            Self::Donut => "donut",
            Self::Line => "line",
        }
    }
}

/// Hand serialized chart data to the host charting library
pub fn render_chart<T: Serialize>(canvas_id: &str, kind: ChartKind, data: &T) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;

    let charts = Reflect::get(&window, &JsValue::from_str(CHARTS_GLOBAL))?;
    if charts.is_undefined() || charts.is_null() {
        return Err(JsValue::from_str("dashboardCharts is not loaded"));
    }

    let render_value = Reflect::get(&charts, &JsValue::from_str("render"))?;
    if !render_value.is_function() {
        return Err(JsValue::from_str("dashboardCharts.render is not a function"));
    }
    let render_fn: Function = render_value.dyn_into()?;

    let data_value = data
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    render_fn.call3(
        &charts,
        &JsValue::from_str(canvas_id),
        &JsValue::from_str(kind.as_str()),
        &data_value,
    )?;
    Ok(())
}
