pub mod dispatch;
pub mod effect;
pub mod policy;
pub mod route_json;

pub use dispatch::do_initial_pcb_trace_render;
pub use effect::EffectScheduler;
pub use policy::{RoutingPolicy, routing_policy};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("autorouter request failed: {0}")]
    Request(String),
    #[error("failed to read autorouter response: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed autorouter response: {0}")]
    Response(#[from] serde_json::Error),
    #[error("autorouter task cancelled before completion")]
    Cancelled,
}
