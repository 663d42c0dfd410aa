use crate::DispatchError;
use crate::effect::EffectScheduler;
use crate::policy::{RoutingPolicy, routing_policy};
use crate::route_json::{RouteJson, build_route_json};
use circuit_common::db::indices::NodeId;
use circuit_common::tree::core::Tree;
use serde::Serialize;

pub const RESPONSE_FORMAT: &str = "simple_route_json";

#[derive(Serialize)]
struct AutorouteRequest<'a> {
    simple_route_json: &'a RouteJson,
    response_format: &'static str,
}

/// Routing entry point for one group. Evaluates the routing policy once;
/// only `ExternalService` has any effect here, registering a single
/// deferred POST on the scheduler. Everything else returns immediately:
/// per-trace routing is driven by the traces themselves, in order.
///
/// The network effect never fails into the caller. Errors surface on the
/// error channel and in the scheduler's drain count.
pub fn do_initial_pcb_trace_render(
    tree: &Tree,
    group: NodeId,
    scheduler: &EffectScheduler,
) -> RoutingPolicy {
    let Some(g) = tree.group(group) else {
        return RoutingPolicy::TraceByTrace;
    };

    let policy = routing_policy(&g.layout);
    if policy != RoutingPolicy::ExternalService {
        return policy;
    }
    let Some(auto) = &g.layout.autorouter else {
        return policy;
    };
    let Some(url) = auto.server_url.clone() else {
        return policy;
    };

    let route_json = build_route_json(tree, group, auto);
    let request = AutorouteRequest {
        simple_route_json: &route_json,
        response_format: RESPONSE_FORMAT,
    };
    let body = match serde_json::to_string(&request) {
        Ok(body) => body,
        Err(e) => {
            log::error!(
                "failed to serialize autorouter request for group '{}': {}",
                g.name,
                e
            );
            return policy;
        }
    };

    let group_name = g.name.clone();
    scheduler.spawn(async move {
        match submit(&url, body).await {
            Ok(response) => {
                log::info!(
                    "autorouter response for group '{}': {}",
                    group_name,
                    response
                );
                Ok(())
            }
            Err(e) => {
                log::error!("autorouter request for group '{}' failed: {}", group_name, e);
                Err(e)
            }
        }
    });

    policy
}

async fn submit(url: &str, body: String) -> Result<serde_json::Value, DispatchError> {
    let url = url.to_string();
    let text = tokio::task::spawn_blocking(move || {
        let response = ureq::post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| DispatchError::Request(e.to_string()))?;
        response.into_string().map_err(DispatchError::Read)
    })
    .await
    .map_err(|_| DispatchError::Cancelled)??;

    Ok(serde_json::from_str(&text)?)
}
