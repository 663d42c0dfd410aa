use circuit_common::util::config::{AutorouteMode, LayoutConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingPolicy {
    /// Each trace routes itself in a well-known order. The most
    /// deterministic strategy, because a new trace is generally ordered
    /// last.
    TraceByTrace,
    /// Delegate the whole routing problem to a configured external service.
    ExternalService,
    FullView,
    RipAndReplace,
}

/// The single policy decision for a render pass. A group routes trace by
/// trace unless an external autorouter is explicitly configured; an
/// autorouter section without a server URL can still select one of the
/// local whole-view modes.
pub fn routing_policy(layout: &LayoutConfig) -> RoutingPolicy {
    let Some(auto) = &layout.autorouter else {
        return RoutingPolicy::TraceByTrace;
    };
    if auto.server_url.is_some() {
        return RoutingPolicy::ExternalService;
    }
    match auto.mode {
        Some(AutorouteMode::FullView) => RoutingPolicy::FullView,
        Some(AutorouteMode::RipAndReplace) => RoutingPolicy::RipAndReplace,
        Some(AutorouteMode::TraceByTrace) | None => RoutingPolicy::TraceByTrace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_common::util::config::AutorouterConfig;

    fn layout(autorouter: Option<AutorouterConfig>) -> LayoutConfig {
        LayoutConfig {
            autorouter,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn no_autorouter_section_routes_trace_by_trace() {
        assert_eq!(routing_policy(&layout(None)), RoutingPolicy::TraceByTrace);
    }

    #[test]
    fn server_url_selects_the_external_service() {
        let cfg = AutorouterConfig {
            server_url: Some("http://localhost:3120/route".to_string()),
            ..AutorouterConfig::default()
        };
        assert_eq!(
            routing_policy(&layout(Some(cfg))),
            RoutingPolicy::ExternalService
        );
    }

    #[test]
    fn server_url_wins_over_an_explicit_mode() {
        let cfg = AutorouterConfig {
            server_url: Some("http://localhost:3120/route".to_string()),
            mode: Some(AutorouteMode::FullView),
            ..AutorouterConfig::default()
        };
        assert_eq!(
            routing_policy(&layout(Some(cfg))),
            RoutingPolicy::ExternalService
        );
    }

    #[test]
    fn explicit_modes_map_one_to_one() {
        for (mode, expected) in [
            (AutorouteMode::TraceByTrace, RoutingPolicy::TraceByTrace),
            (AutorouteMode::FullView, RoutingPolicy::FullView),
            (AutorouteMode::RipAndReplace, RoutingPolicy::RipAndReplace),
        ] {
            let cfg = AutorouterConfig {
                mode: Some(mode),
                ..AutorouterConfig::default()
            };
            assert_eq!(routing_policy(&layout(Some(cfg))), expected);
        }
    }
}
