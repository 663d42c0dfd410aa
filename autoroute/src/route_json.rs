use circuit_common::db::indices::NodeId;
use circuit_common::geom::point::Point;
use circuit_common::tree::core::Tree;
use circuit_common::util::config::AutorouterConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteJson {
    pub bounds: Bounds,
    pub obstacles: Vec<Obstacle>,
    pub connections: Vec<Connection>,
    pub layer_count: u32,
    pub min_trace_width: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    #[serde(rename = "type")]
    pub kind: String,
    pub center: Point<f64>,
    pub width: f64,
    pub height: f64,
    pub layers: Vec<String>,
    pub connected_to: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub name: String,
    pub points_to_connect: Vec<RoutePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub x: f64,
    pub y: f64,
    pub layer: u32,
}

/// Summarizes a group's routing problem for the external service. Bounds
/// and element lists stay empty: the service recomputes geometry from the
/// design it already holds, and only the layer count and minimum trace
/// width are carried from configuration.
pub fn build_route_json(tree: &Tree, group: NodeId, config: &AutorouterConfig) -> RouteJson {
    let traces = tree.traces_under(group);
    log::debug!("building route json over {} trace(s)", traces.len());

    RouteJson {
        bounds: Bounds::default(),
        obstacles: Vec::new(),
        connections: Vec::new(),
        layer_count: config.layer_count,
        min_trace_width: config.min_trace_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_common::tree::core::{GroupData, NodeKind, TraceData};
    use circuit_common::util::config::LayoutConfig;

    fn tree_with_traces(n: usize) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.add_root(NodeKind::Group(GroupData {
            name: "root".to_string(),
            is_subcircuit: true,
            layout: LayoutConfig::default(),
        }));
        for i in 0..n {
            tree.add_child(
                root,
                NodeKind::Trace(TraceData {
                    name: format!("t{}", i),
                    from: ".a > .p".to_string(),
                    to: ".b > .p".to_string(),
                }),
            );
        }
        (tree, root)
    }

    #[test]
    fn placeholder_record_with_configured_scalars() {
        let (tree, root) = tree_with_traces(3);
        let rj = build_route_json(&tree, root, &AutorouterConfig::default());

        assert_eq!(rj.bounds, Bounds::default());
        assert!(rj.obstacles.is_empty());
        assert!(rj.connections.is_empty());
        assert_eq!(rj.layer_count, 2);
        assert_eq!(rj.min_trace_width, 0.1);

        let custom = AutorouterConfig {
            layer_count: 4,
            min_trace_width: 0.2,
            ..AutorouterConfig::default()
        };
        let rj = build_route_json(&tree, root, &custom);
        assert_eq!(rj.layer_count, 4);
        assert_eq!(rj.min_trace_width, 0.2);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let (tree, root) = tree_with_traces(0);
        let rj = build_route_json(&tree, root, &AutorouterConfig::default());
        let value = serde_json::to_value(&rj).unwrap();

        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("bounds"));
        assert!(obj.contains_key("obstacles"));
        assert!(obj.contains_key("connections"));
        assert_eq!(obj["layerCount"], 2);
        assert_eq!(obj["minTraceWidth"], 0.1);

        let bounds = obj["bounds"].as_object().unwrap();
        for key in ["minX", "maxX", "minY", "maxY"] {
            assert_eq!(bounds[key], 0.0);
        }
    }

    #[test]
    fn round_trips_through_json() {
        let (tree, root) = tree_with_traces(1);
        let rj = build_route_json(&tree, root, &AutorouterConfig::default());
        let text = serde_json::to_string(&rj).unwrap();
        let back: RouteJson = serde_json::from_str(&text).unwrap();
        assert_eq!(back, rj);
    }
}
