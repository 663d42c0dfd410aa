use crate::db::indices::*;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct SchematicComponentData {
    pub name: String,
    pub center: Point<f64>,
    pub width: f64,
    pub height: f64,
    pub is_fixed: bool,
    pub ports: Vec<SchematicPortId>,
}

impl SchematicComponentData {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.width, self.height)
    }
}

#[derive(Clone, Debug)]
pub struct SchematicPortData {
    pub name: String,
    pub component: SchematicComponentId,
    pub center: Point<f64>,
}

pub struct DesignDB {
    pub schematic_components: Vec<SchematicComponentData>,
    pub schematic_ports: Vec<SchematicPortData>,

    pub component_name_map: HashMap<String, SchematicComponentId>,
}

impl Default for DesignDB {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignDB {
    pub fn new() -> Self {
        Self {
            schematic_components: Vec::with_capacity(1000),
            schematic_ports: Vec::with_capacity(5000),
            component_name_map: HashMap::new(),
        }
    }

    pub fn num_components(&self) -> usize {
        self.schematic_components.len()
    }
    pub fn num_ports(&self) -> usize {
        self.schematic_ports.len()
    }

    pub fn add_schematic_component(
        &mut self,
        name: String,
        center: Point<f64>,
        width: f64,
        height: f64,
        is_fixed: bool,
    ) -> SchematicComponentId {
        let id = SchematicComponentId::new(self.schematic_components.len());
        self.schematic_components.push(SchematicComponentData {
            name: name.clone(),
            center,
            width,
            height,
            is_fixed,
            ports: Vec::new(),
        });
        self.component_name_map.insert(name, id);
        id
    }

    pub fn add_schematic_port(
        &mut self,
        component: SchematicComponentId,
        name: String,
        center: Point<f64>,
    ) -> SchematicPortId {
        let id = SchematicPortId::new(self.schematic_ports.len());
        self.schematic_ports.push(SchematicPortData {
            name,
            component,
            center,
        });
        self.schematic_components[component.index()].ports.push(id);
        id
    }

    pub fn schematic_component(&self, id: SchematicComponentId) -> Option<&SchematicComponentData> {
        self.schematic_components.get(id.index())
    }

    pub fn schematic_port(&self, id: SchematicPortId) -> Option<&SchematicPortData> {
        self.schematic_ports.get(id.index())
    }

    pub fn ports_of(&self, component: SchematicComponentId) -> Vec<SchematicPortId> {
        self.schematic_ports
            .iter()
            .enumerate()
            .filter(|(_, p)| p.component == component)
            .map(|(i, _)| SchematicPortId::new(i))
            .collect()
    }

    pub fn set_component_center(&mut self, id: SchematicComponentId, center: Point<f64>) {
        self.schematic_components[id.index()].center = center;
    }

    pub fn set_port_center(&mut self, id: SchematicPortId, center: Point<f64>) {
        self.schematic_ports[id.index()].center = center;
    }

    /// Snapshot of every component and port position, in id order.
    pub fn positions_snapshot(&self) -> Vec<Point<f64>> {
        self.schematic_components
            .iter()
            .map(|c| c.center)
            .chain(self.schematic_ports.iter().map(|p| p.center))
            .collect()
    }

    pub fn bounding_box(&self) -> Rect {
        let mut bbox: Option<Rect> = None;
        for comp in &self.schematic_components {
            let r = comp.rect();
            bbox = Some(match bbox {
                Some(b) => b.union(&r),
                None => r,
            });
        }
        bbox.unwrap_or_default()
    }
}
