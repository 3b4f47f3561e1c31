use eframe::egui;

/// Squared euclidean distance. Hit tests compare against a squared radius so
/// the per-node scan never takes a square root.
pub fn squared_distance(p: egui::Pos2, q: egui::Pos2) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

/// Distance from `p` to the closest point of the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to that endpoint rather than to the infinite line.
pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len2 = ab.x * ab.x + ab.y * ab.y;
    if ab_len2 <= f32::EPSILON {
        return (p - a).length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / ab_len2;
    let t = t.clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length()
}

pub fn within_radius(p: egui::Pos2, center: egui::Pos2, radius: f32) -> bool {
    squared_distance(p, center) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_matches_pythagoras() {
        let d = squared_distance(egui::pos2(1.0, 2.0), egui::pos2(4.0, 6.0));
        assert_eq!(d, 25.0);
    }

    #[test]
    fn segment_distance_clamps_to_endpoint() {
        let a = egui::pos2(0.0, 0.0);
        let b = egui::pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(egui::pos2(15.0, 0.0), a, b), 5.0);
        assert_eq!(distance_to_segment(egui::pos2(-3.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn segment_distance_is_perpendicular_inside_span() {
        let a = egui::pos2(0.0, 0.0);
        let b = egui::pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(egui::pos2(4.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(egui::pos2(4.0, 0.0), a, b), 0.0);
    }

    #[test]
    fn degenerate_segment_measures_to_point() {
        let a = egui::pos2(2.0, 2.0);
        assert_eq!(distance_to_segment(egui::pos2(5.0, 6.0), a, a), 5.0);
    }

    #[test]
    fn radius_test_is_strict() {
        let c = egui::pos2(0.0, 0.0);
        assert!(within_radius(egui::pos2(19.9, 0.0), c, 20.0));
        assert!(!within_radius(egui::pos2(20.0, 0.0), c, 20.0));
    }
}
