use crate::LayoutError;
use crate::scene::Scene;
use circuit_common::geom::point::Point;
use circuit_common::geom::rect::Rect;
use circuit_common::geom::rtree::SpatialIndex;
use std::cmp::Ordering;

const COMPONENT_SPACING: f64 = 0.4;
const QUERY_TOLERANCE: f64 = 1e-6;

/// Deterministic placement: movable components sorted ascending by area,
/// packed into rows left-to-right around a central anchor, skipping over
/// occupied space. The anchor depends only on fixed components (origin when
/// there are none), so re-running over an already laid-out scene reproduces
/// the same positions.
pub fn ascending_central_lr(scene: &Scene) -> Result<Scene, LayoutError> {
    for comp in &scene.components {
        if !comp.rect.is_finite() {
            return Err(LayoutError::NonFinite(comp.name.clone()));
        }
    }

    let mut out = scene.clone();

    let mut index = SpatialIndex::new();
    for (i, comp) in scene.components.iter().enumerate() {
        if comp.is_fixed {
            index.insert(comp.rect, i);
        }
    }

    let mut movable: Vec<usize> = (0..scene.components.len())
        .filter(|&i| !scene.components[i].is_fixed)
        .collect();
    if movable.is_empty() {
        return Ok(out);
    }

    movable.sort_by(|&a, &b| {
        scene.components[a]
            .rect
            .area()
            .partial_cmp(&scene.components[b].rect.area())
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let anchor = fixed_anchor(scene);

    let widest = movable
        .iter()
        .map(|&i| scene.components[i].rect.width())
        .fold(0.0_f64, f64::max);
    let total_width: f64 = movable
        .iter()
        .map(|&i| scene.components[i].rect.width() + COMPONENT_SPACING)
        .sum();
    let row_width = (total_width / 2.0).max(widest + COMPONENT_SPACING);
    let row_height = movable
        .iter()
        .map(|&i| scene.components[i].rect.height())
        .fold(0.0_f64, f64::max)
        + COMPONENT_SPACING;

    let row_start = anchor.x - row_width / 2.0;
    let mut cursor_x = row_start;
    let mut cursor_y = anchor.y;

    for &i in &movable {
        let w = scene.components[i].rect.width();
        let h = scene.components[i].rect.height();

        let placed = loop {
            if cursor_x + w > row_start + row_width + QUERY_TOLERANCE {
                cursor_x = row_start;
                cursor_y += row_height;
                continue;
            }

            let candidate =
                Rect::from_center_size(Point::new(cursor_x + w / 2.0, cursor_y), w, h);
            if index.is_free(candidate.inflate(COMPONENT_SPACING - QUERY_TOLERANCE)) {
                break candidate;
            }
            cursor_x += COMPONENT_SPACING;
        };

        index.insert(placed, i);
        out.components[i].rect = placed;
        cursor_x = placed.max.x + COMPONENT_SPACING;
    }

    Ok(out)
}

// Movable positions must not influence the anchor, or the layout would
// drift on every re-run.
fn fixed_anchor(scene: &Scene) -> Point<f64> {
    let mut bbox: Option<Rect> = None;
    for comp in &scene.components {
        if comp.is_fixed {
            bbox = Some(match bbox {
                Some(b) => b.union(&comp.rect),
                None => comp.rect,
            });
        }
    }
    match bbox {
        Some(b) => b.center(),
        None => Point::new(0.0, 0.0),
    }
}
