use eframe::egui::{self, viewport::IconData, Color32};

// Purple rounded screen with a pink play triangle
pub fn generate_icon(size: u32) -> IconData {
    let (w, h) = (size, size);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    let inset = w as f32 * 0.08;
    let corner = w as f32 * 0.18;

    let p1 = (w as f32 * 0.40, h as f32 * 0.32);
    let p2 = (w as f32 * 0.40, h as f32 * 0.68);
    let p3 = (w as f32 * 0.70, h as f32 * 0.50);

    for y in 0..h {
        for x in 0..w {
            let idx = ((y * w + x) * 4) as usize;
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if !in_rounded_rect(px, py, inset, w as f32 - inset, corner) {
                continue;
            }
            // Vertical gradient: violet at the top, deep indigo at the bottom
            let t = py / h as f32;
            let (r, g, b) = if point_in_triangle(px, py, p1, p2, p3) {
                (236.0, 72.0, 153.0)
            } else {
                (lerp(126.0, 46.0, t), lerp(34.0, 16.0, t), lerp(206.0, 101.0, t))
            };
            rgba[idx] = r as u8;
            rgba[idx + 1] = g as u8;
            rgba[idx + 2] = b as u8;
            rgba[idx + 3] = 255;
        }
    }

    IconData { rgba, width: w, height: h }
}

/// Stand-in poster for shows without artwork: dark card with a crossed frame.
pub fn placeholder_image(width: usize, height: usize) -> egui::ColorImage {
    let mut image = egui::ColorImage::new([width, height], Color32::from_rgb(31, 41, 55));
    let border = Color32::from_rgb(168, 85, 247);
    let line = Color32::from_rgb(75, 85, 99);
    for y in 0..height {
        for x in 0..width {
            let on_border = x < 2 || y < 2 || x + 2 >= width || y + 2 >= height;
            // Both diagonals of the card
            let fx = x as f32 / width as f32;
            let fy = y as f32 / height as f32;
            let on_diagonal = (fx - fy).abs() < 0.01 || (fx + fy - 1.0).abs() < 0.01;
            if on_border {
                image.pixels[y * width + x] = border;
            } else if on_diagonal {
                image.pixels[y * width + x] = line;
            }
        }
    }
    image
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

#[inline]
fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 { ax * by - ay * bx }

fn in_rounded_rect(px: f32, py: f32, min: f32, max: f32, radius: f32) -> bool {
    if px < min || py < min || px > max || py > max {
        return false;
    }
    let cx = px.clamp(min + radius, max - radius);
    let cy = py.clamp(min + radius, max - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

fn point_in_triangle(px: f32, py: f32, p1: (f32, f32), p2: (f32, f32), p3: (f32, f32)) -> bool {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;
    let c1 = cross(x2 - x1, y2 - y1, px - x1, py - y1);
    let c2 = cross(x3 - x2, y3 - y2, px - x2, py - y2);
    let c3 = cross(x1 - x3, y1 - y3, px - x3, py - y3);
    let has_neg = (c1 < 0.0) || (c2 < 0.0) || (c3 < 0.0);
    let has_pos = (c1 > 0.0) || (c2 > 0.0) || (c3 > 0.0);
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_has_transparent_corner_and_opaque_center() {
        let icon = generate_icon(64);
        assert_eq!(icon.rgba.len(), 64 * 64 * 4);
        assert_eq!(icon.rgba[3], 0);
        let center = ((32 * 64 + 32) * 4) as usize;
        assert_eq!(icon.rgba[center + 3], 255);
    }

    #[test]
    fn test_placeholder_dimensions() {
        let img = placeholder_image(30, 40);
        assert_eq!(img.size, [30, 40]);
        assert_eq!(img.pixels.len(), 30 * 40);
    }
}
