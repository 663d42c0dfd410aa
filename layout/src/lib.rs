pub mod place;
pub mod scene;
pub mod validate;

use circuit_common::db::core::DesignDB;
use circuit_common::db::indices::NodeId;
use circuit_common::tree::core::Tree;
use circuit_common::util::profiler::ScopedTimer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("component '{0}' has a non-finite size or position")]
    NonFinite(String),
    #[error("{0}")]
    Validation(String),
}

/// Schematic auto-layout for one group. No-op unless the group is a
/// subcircuit with `sch_auto_layout_enabled`. The database is only written
/// after placement and validation both succeed; on any error the previous
/// positions stay untouched.
pub fn run(db: &mut DesignDB, tree: &Tree, group: NodeId) -> Result<(), LayoutError> {
    let Some(g) = tree.group(group) else {
        return Ok(());
    };
    if !g.is_subcircuit || !g.layout.sch_auto_layout_enabled {
        return Ok(());
    }

    let mut components = Vec::new();
    let mut ports = Vec::new();
    for node in tree.descendants(group) {
        if let Some(sc_id) = tree.node(node).kind.schematic_component() {
            if db.schematic_component(sc_id).is_none() {
                log::warn!("{:?} referenced by the tree is missing from the database", sc_id);
                continue;
            }
            ports.extend(db.ports_of(sc_id));
            components.push(sc_id);
        }
    }

    if components.is_empty() {
        log::debug!("group '{}' has no schematic components to lay out", g.name);
        return Ok(());
    }

    log::info!(
        "Schematic auto-layout for group '{}': {} component(s), {} port(s)",
        g.name,
        components.len(),
        ports.len()
    );
    let _timer = ScopedTimer::new("Schematic auto-layout");

    // The scene covers the whole database, not just this group's subtree;
    // nested subcircuits are re-laid out with it. See DESIGN.md.
    let scene = scene::from_db(db);
    let laid_out = place::ascending_central_lr(&scene)?;
    validate::run(&laid_out).map_err(LayoutError::Validation)?;
    scene::write_back(db, &laid_out);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_common::db::parser::design::load_design;
    use circuit_common::geom::point::Point;

    fn design(is_subcircuit: bool, auto_layout: bool) -> String {
        format!(
            r#"
            [[groups]]
            name = "root"
            is_subcircuit = {is_subcircuit}

            [groups.layout]
            sch_auto_layout_enabled = {auto_layout}

            [[components]]
            name = "U1"
            group = "root"
            x = 0.0
            y = 0.0
            width = 2.0
            height = 1.0

            [[components.ports]]
            name = "out"
            dx = 1.0
            dy = 0.0

            [[components]]
            name = "U2"
            group = "root"
            x = 0.3
            y = 0.1
            width = 2.0
            height = 1.0

            [[components]]
            name = "U3"
            group = "root"
            x = -0.2
            y = -0.4
            width = 1.0
            height = 1.0
            "#
        )
    }

    fn load(text: &str) -> (DesignDB, Tree, NodeId) {
        let mut db = DesignDB::new();
        let mut tree = Tree::new();
        let root = load_design(&mut db, &mut tree, text).unwrap();
        (db, tree, root)
    }

    #[test]
    fn non_subcircuit_leaves_database_untouched() {
        let (mut db, tree, root) = load(&design(false, true));
        let before = db.positions_snapshot();
        run(&mut db, &tree, root).unwrap();
        assert_eq!(db.positions_snapshot(), before);
    }

    #[test]
    fn disabled_auto_layout_leaves_database_untouched() {
        let (mut db, tree, root) = load(&design(true, false));
        let before = db.positions_snapshot();
        run(&mut db, &tree, root).unwrap();
        assert_eq!(db.positions_snapshot(), before);
    }

    #[test]
    fn all_components_get_laid_out() {
        let (mut db, tree, root) = load(&design(true, true));
        run(&mut db, &tree, root).unwrap();

        // overlapping seed positions must have been separated
        for i in 0..db.num_components() {
            for j in (i + 1)..db.num_components() {
                let a = db.schematic_components[i].rect();
                let b = db.schematic_components[j].rect();
                assert!(!a.overlaps(&b), "components {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn ports_move_with_their_component() {
        let (mut db, tree, root) = load(&design(true, true));
        run(&mut db, &tree, root).unwrap();

        let comp = &db.schematic_components[0];
        let port = &db.schematic_ports[0];
        assert_eq!(port.center, comp.center + Point::new(1.0, 0.0));
    }

    #[test]
    fn second_run_is_a_fixed_point() {
        let (mut db, tree, root) = load(&design(true, true));
        run(&mut db, &tree, root).unwrap();
        let first = db.positions_snapshot();
        run(&mut db, &tree, root).unwrap();
        assert_eq!(db.positions_snapshot(), first);
    }

    #[test]
    fn placement_failure_aborts_before_any_write() {
        let (mut db, tree, root) = load(&design(true, true));
        db.schematic_components[1].width = f64::NAN;
        let before = db.positions_snapshot();

        let result = run(&mut db, &tree, root);
        assert!(matches!(result, Err(LayoutError::NonFinite(_))));
        assert_eq!(db.positions_snapshot(), before);
    }
}
