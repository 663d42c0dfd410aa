use crate::geom::point::Point;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LayoutConfig {
    #[serde(default)]
    pub manual_trace_hints: Vec<ManualTraceHint>,
    #[serde(default)]
    pub sch_auto_layout_enabled: bool,
    #[serde(default)]
    pub autorouter: Option<AutorouterConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ManualTraceHint {
    pub pcb_port_selector: String,
    #[serde(default)]
    pub offsets: Vec<Point<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutorouteMode {
    TraceByTrace,
    FullView,
    RipAndReplace,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutorouterConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub mode: Option<AutorouteMode>,
    #[serde(default = "default_layer_count")]
    pub layer_count: u32,
    #[serde(default = "default_min_trace_width")]
    pub min_trace_width: f64,
}

impl Default for AutorouterConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            mode: None,
            layer_count: default_layer_count(),
            min_trace_width: default_min_trace_width(),
        }
    }
}

fn default_layer_count() -> u32 {
    2
}

fn default_min_trace_width() -> f64 {
    0.1
}
