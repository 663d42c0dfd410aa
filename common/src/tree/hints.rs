use crate::db::indices::NodeId;
use crate::tree::core::{NodeKind, TraceHintData, Tree};

/// Materializes a group's `manual_trace_hints` as `TraceHint` children, one
/// per descriptor, in declaration order. Selector syntax is not validated
/// here; hints are resolved against ports at routing time.
pub fn create_trace_hints_from_layout(tree: &mut Tree, group: NodeId) {
    let Some(g) = tree.group(group) else { return };
    if !g.is_subcircuit {
        return;
    }

    let hints = g.layout.manual_trace_hints.clone();
    if hints.is_empty() {
        return;
    }

    log::debug!(
        "creating {} trace hint(s) for group '{}'",
        hints.len(),
        g.name
    );

    for hint in hints {
        tree.add_child(
            group,
            NodeKind::TraceHint(TraceHintData {
                port_selector: hint.pcb_port_selector,
                offsets: hint.offsets,
            }),
        );
    }
}
