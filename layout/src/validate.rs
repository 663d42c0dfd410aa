use crate::scene::Scene;
use circuit_common::geom::point::Point;
use circuit_common::geom::rect::Rect;
use rayon::prelude::*;

const CHECK_TOLERANCE: f64 = 0.005;

/// Overlap/consistency check over a laid-out scene. Pairs of fixed
/// components are exempt; their positions predate the placer.
pub fn run(scene: &Scene) -> Result<(), String> {
    for comp in &scene.components {
        if !comp.rect.is_finite() {
            return Err(format!("component '{}' has a non-finite rect", comp.name));
        }
    }

    let has_overlap = (0..scene.components.len()).into_par_iter().any(|i| {
        let a = &scene.components[i];
        let r1 = a.rect;
        let r1_shrink = Rect::new(
            Point::new(r1.min.x + CHECK_TOLERANCE, r1.min.y + CHECK_TOLERANCE),
            Point::new(r1.max.x - CHECK_TOLERANCE, r1.max.y - CHECK_TOLERANCE),
        );

        for j in (i + 1)..scene.components.len() {
            let b = &scene.components[j];
            if a.is_fixed && b.is_fixed {
                continue;
            }
            if r1_shrink.overlaps(&b.rect) {
                log::error!("FAIL: Component overlap '{}' and '{}'", a.name, b.name);
                return true;
            }
        }
        false
    });

    if has_overlap {
        Err("scene validation failed: overlapping components".to_string())
    } else {
        log::info!("\x1b[32mPASS\x1b[0m: Scene is valid.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneComponent;
    use circuit_common::db::indices::SchematicComponentId;

    fn component(i: usize, center: Point<f64>, is_fixed: bool) -> SceneComponent {
        SceneComponent {
            id: SchematicComponentId::new(i),
            name: format!("U{}", i),
            rect: Rect::from_center_size(center, 2.0, 1.0),
            is_fixed,
        }
    }

    #[test]
    fn disjoint_scene_passes() {
        let scene = Scene {
            components: vec![
                component(0, Point::new(0.0, 0.0), false),
                component(1, Point::new(5.0, 0.0), false),
            ],
            ports: Vec::new(),
        };
        assert!(run(&scene).is_ok());
    }

    #[test]
    fn overlapping_movables_fail() {
        let scene = Scene {
            components: vec![
                component(0, Point::new(0.0, 0.0), false),
                component(1, Point::new(0.5, 0.0), false),
            ],
            ports: Vec::new(),
        };
        assert!(run(&scene).is_err());
    }

    #[test]
    fn fixed_pairs_are_exempt() {
        let scene = Scene {
            components: vec![
                component(0, Point::new(0.0, 0.0), true),
                component(1, Point::new(0.5, 0.0), true),
            ],
            ports: Vec::new(),
        };
        assert!(run(&scene).is_ok());
    }
}
