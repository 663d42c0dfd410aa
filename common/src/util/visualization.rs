use crate::db::core::DesignDB;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

pub fn draw_schematic(db: &DesignDB, filename: &str, width: u32, height: u32) {
    let mut img = RgbImage::new(width, height);
    image::imageops::replace(
        &mut img,
        &RgbImage::from_pixel(width, height, Rgb([20, 20, 20])),
        0,
        0,
    );

    let bbox = db.bounding_box().inflate(2.0);
    let view_w = bbox.width();
    let view_h = bbox.height();
    if view_w <= 0.0 || view_h <= 0.0 {
        return;
    }

    let scale_x = width as f64 / view_w;
    let scale_y = height as f64 / view_h;

    let map = |x: f64, y: f64| {
        (
            (x - bbox.min.x) * scale_x,
            height as f64 - (y - bbox.min.y) * scale_y,
        )
    };

    let color_component = Rgb([180, 60, 60]);
    let color_fixed = Rgb([180, 120, 40]);
    let color_port = Rgb([220, 220, 220]);

    for comp in &db.schematic_components {
        let r = comp.rect();
        let (x, y_bot) = map(r.min.x, r.min.y);
        let w = (r.width() * scale_x).max(2.0);
        let h = (r.height() * scale_y).max(2.0);
        let rect = ImageRect::at(x as i32, (y_bot - h) as i32).of_size(w as u32, h as u32);

        if comp.is_fixed {
            draw_filled_rect_mut(&mut img, rect, color_fixed);
        } else {
            draw_filled_rect_mut(&mut img, rect, color_component);
        }
    }

    for port in &db.schematic_ports {
        let (x, y) = map(port.center.x, port.center.y);
        let rect = ImageRect::at(x as i32 - 1, y as i32 - 1).of_size(3, 3);
        draw_filled_rect_mut(&mut img, rect, color_port);
    }

    let _ = img.save(Path::new(filename));
}
