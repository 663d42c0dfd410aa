use circuit_common::db::core::DesignDB;
use circuit_common::db::indices::{SchematicComponentId, SchematicPortId};
use circuit_common::geom::point::Point;
use circuit_common::geom::rect::Rect;

#[derive(Clone, Debug)]
pub struct SceneComponent {
    pub id: SchematicComponentId,
    pub name: String,
    pub rect: Rect,
    pub is_fixed: bool,
}

#[derive(Clone, Debug)]
pub struct ScenePort {
    pub id: SchematicPortId,
    pub component_index: usize,
    /// Offset from the owning component's center, captured at conversion
    /// time and preserved through placement.
    pub offset: Point<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub components: Vec<SceneComponent>,
    pub ports: Vec<ScenePort>,
}

pub fn from_db(db: &DesignDB) -> Scene {
    let components = db
        .schematic_components
        .iter()
        .enumerate()
        .map(|(i, c)| SceneComponent {
            id: SchematicComponentId::new(i),
            name: c.name.clone(),
            rect: c.rect(),
            is_fixed: c.is_fixed,
        })
        .collect();

    let ports = db
        .schematic_ports
        .iter()
        .enumerate()
        .map(|(i, p)| ScenePort {
            id: SchematicPortId::new(i),
            component_index: p.component.index(),
            offset: p.center - db.schematic_components[p.component.index()].center,
        })
        .collect();

    Scene { components, ports }
}

pub fn write_back(db: &mut DesignDB, scene: &Scene) {
    for comp in &scene.components {
        db.set_component_center(comp.id, comp.rect.center());
    }
    for port in &scene.ports {
        let center = scene.components[port.component_index].rect.center();
        db.set_port_center(port.id, center + port.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_port_offsets() {
        let mut db = DesignDB::new();
        let c = db.add_schematic_component("U1".into(), Point::new(0.0, 0.0), 2.0, 1.0, false);
        let p = db.add_schematic_port(c, "out".into(), Point::new(1.0, 0.25));

        let mut scene = from_db(&db);
        scene.components[0].rect = Rect::from_center_size(Point::new(10.0, -3.0), 2.0, 1.0);
        write_back(&mut db, &scene);

        assert_eq!(
            db.schematic_component(c).unwrap().center,
            Point::new(10.0, -3.0)
        );
        assert_eq!(
            db.schematic_port(p).unwrap().center,
            Point::new(11.0, -2.75)
        );
    }
}
