use crate::db::core::DesignDB;
use crate::db::indices::NodeId;
use crate::geom::point::Point;
use crate::tree::core::{ComponentData, GroupData, NodeKind, TraceData, Tree};
use crate::util::config::LayoutConfig;
use anyhow::{Result, bail};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct DesignFile {
    #[serde(default)]
    pub design: DesignMeta,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    #[serde(default)]
    pub traces: Vec<TraceEntry>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DesignMeta {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub is_subcircuit: bool,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_component_size")]
    pub width: f64,
    #[serde(default = "default_component_size")]
    pub height: f64,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default = "default_true")]
    pub schematic: bool,
    #[serde(default)]
    pub ports: Vec<PortEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PortEntry {
    pub name: String,
    #[serde(default)]
    pub dx: f64,
    #[serde(default)]
    pub dy: f64,
}

#[derive(Debug, Deserialize)]
pub struct TraceEntry {
    #[serde(default)]
    pub name: String,
    pub group: String,
    pub from: String,
    pub to: String,
}

fn default_component_size() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

pub fn parse(db: &mut DesignDB, tree: &mut Tree, filename: &str) -> Result<NodeId> {
    let text = std::fs::read_to_string(filename)?;
    load_design(db, tree, &text)
}

/// Builds the node tree and schematic records from a TOML design
/// description. Returns the root group. Groups must be declared before any
/// group that names them as parent.
pub fn load_design(db: &mut DesignDB, tree: &mut Tree, text: &str) -> Result<NodeId> {
    let file: DesignFile = toml::from_str(text)?;

    if file.groups.is_empty() {
        bail!("design has no groups");
    }

    let mut group_ids: HashMap<String, NodeId> = HashMap::new();
    let mut root = None;

    for entry in &file.groups {
        let kind = NodeKind::Group(GroupData {
            name: entry.name.clone(),
            is_subcircuit: entry.is_subcircuit,
            layout: entry.layout.clone(),
        });
        let id = match &entry.parent {
            Some(parent_name) => {
                let Some(&parent) = group_ids.get(parent_name) else {
                    bail!(
                        "group '{}' references unknown parent '{}'",
                        entry.name,
                        parent_name
                    );
                };
                tree.add_child(parent, kind)
            }
            None => {
                let id = tree.add_root(kind);
                if root.is_none() {
                    root = Some(id);
                }
                id
            }
        };
        if group_ids.insert(entry.name.clone(), id).is_some() {
            bail!("duplicate group name '{}'", entry.name);
        }
    }

    for entry in &file.components {
        let Some(&group) = group_ids.get(&entry.group) else {
            bail!(
                "component '{}' references unknown group '{}'",
                entry.name,
                entry.group
            );
        };

        let schematic_component = if entry.schematic {
            let center = Point::new(entry.x, entry.y);
            let id = db.add_schematic_component(
                entry.name.clone(),
                center,
                entry.width,
                entry.height,
                entry.is_fixed,
            );
            for port in &entry.ports {
                db.add_schematic_port(
                    id,
                    port.name.clone(),
                    center + Point::new(port.dx, port.dy),
                );
            }
            Some(id)
        } else {
            None
        };

        tree.add_child(
            group,
            NodeKind::Component(ComponentData {
                name: entry.name.clone(),
                schematic_component,
            }),
        );
    }

    for entry in &file.traces {
        let Some(&group) = group_ids.get(&entry.group) else {
            bail!(
                "trace '{}' references unknown group '{}'",
                entry.name,
                entry.group
            );
        };
        tree.add_child(
            group,
            NodeKind::Trace(TraceData {
                name: entry.name.clone(),
                from: entry.from.clone(),
                to: entry.to.clone(),
            }),
        );
    }

    log::info!(
        "Loaded design '{}': {} group(s), {} component(s), {} trace(s)",
        file.design.name,
        file.groups.len(),
        file.components.len(),
        file.traces.len()
    );

    // All parentless groups are roots; the first one declared is the design root.
    match root {
        Some(r) => Ok(r),
        None => bail!("design has no root group"),
    }
}
