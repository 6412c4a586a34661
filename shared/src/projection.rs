use std::f64::consts::PI;
use std::fmt::Write;

use crate::config::MapConfig;
use crate::geometry::{GeoFeature, Ring};

/// Robinson table: (parallel length, distance from equator) every 5 degrees,
/// with one row of padding below the equator for the interpolation.
const ROBINSON: [(f64, f64); 20] = [
    (0.9986, -0.0620),
    (1.0000, 0.0000),
    (0.9986, 0.0620),
    (0.9954, 0.1240),
    (0.9900, 0.1860),
    (0.9822, 0.2480),
    (0.9730, 0.3100),
    (0.9600, 0.3720),
    (0.9427, 0.4340),
    (0.9216, 0.4958),
    (0.8962, 0.5571),
    (0.8679, 0.6176),
    (0.8350, 0.6769),
    (0.7986, 0.7346),
    (0.7597, 0.7903),
    (0.7186, 0.8435),
    (0.6732, 0.8936),
    (0.6213, 0.9394),
    (0.5722, 0.9761),
    (0.5322, 1.0000),
];

/// Scales the tabulated y distance so the projection has its usual aspect ratio.
const ROBINSON_Y_FACTOR: f64 = 1.593415793900743;

/// Unscaled Robinson projection of (lambda, phi) in radians.
pub fn robinson_raw(lambda: f64, phi: f64) -> (f64, f64) {
    let i = (phi.abs() * 36.0 / PI).min(18.0);
    let i0 = i.floor() as usize;
    let di = i - i0 as f64;
    let (ax, ay) = ROBINSON[i0];
    let (bx, by) = ROBINSON[i0 + 1];
    let (cx, cy) = ROBINSON[(i0 + 2).min(19)];

    let x = lambda * (bx + di * (cx - ax) / 2.0 + di * di * (cx - 2.0 * bx + ax) / 2.0);
    let y = phi.signum()
        * ROBINSON_Y_FACTOR
        * (by + di * (cy - ay) / 2.0 + di * di * (cy - 2.0 * by + ay) / 2.0);
    (x, y)
}

fn wrap_degrees(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the eastern edge on the east.
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

/// Spacing of the points inserted where a path follows the cut meridian.
const CUT_STEP_DEG: f64 = 5.0;

/// Points of one ring in rotated longitude and latitude.
type Run = Vec<(f64, f64)>;

/// Latitude where the segment `from -> to` meets the cut, interpolated
/// linearly in longitude distance to the cut on either side.
fn cut_latitude(from: (f64, f64), to: (f64, f64)) -> f64 {
    let before = 180.0 - from.0.abs();
    let after = 180.0 - to.0.abs();
    let total = before + after;
    if total <= 0.0 {
        return from.1;
    }
    from.1 + (to.1 - from.1) * before / total
}

/// Points on the edge of the map leading from `end` back to `start`, both
/// on the cut. When they lie on opposite edges the path goes round the
/// nearer pole.
fn along_cut(end: (f64, f64), start: (f64, f64)) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    if end.0 == start.0 {
        push_edge_steps(&mut points, end.0, end.1, start.1);
        return points;
    }
    let pole = if end.1 + start.1 < 0.0 { -90.0 } else { 90.0 };
    push_edge_steps(&mut points, end.0, end.1, pole);
    points.push((end.0, pole));
    points.push((start.0, pole));
    push_edge_steps(&mut points, start.0, pole, start.1);
    points
}

/// Intermediate points strictly between `from` and `to` along one edge.
fn push_edge_steps(points: &mut Vec<(f64, f64)>, edge: f64, from: f64, to: f64) {
    let steps = ((to - from).abs() / CUT_STEP_DEG).ceil() as usize;
    for i in 1..steps {
        points.push((edge, from + (to - from) * i as f64 / steps as f64));
    }
}

/// Rotated, scaled and translated Robinson projection in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    rotate_deg: f64,
    translate: (f64, f64),
}

impl Projection {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            scale: config.scale,
            rotate_deg: config.rotate_deg,
            translate: config.translate(),
        }
    }

    /// Longitude after the rotation, in [-180, 180].
    pub fn rotated_lon(&self, lon: f64) -> f64 {
        wrap_degrees(lon + self.rotate_deg)
    }

    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.project_rotated(self.rotated_lon(lon), lat)
    }

    fn project_rotated(&self, rotated_lon: f64, lat: f64) -> (f64, f64) {
        let lambda = rotated_lon.to_radians();
        let phi = lat.clamp(-90.0, 90.0).to_radians();
        let (x, y) = robinson_raw(lambda, phi);
        (
            self.translate.0 + self.scale * x,
            self.translate.1 - self.scale * y,
        )
    }

    /// Split a ring into runs that each stay on one side of the cut meridian.
    /// Every run of a ring that crosses the cut starts and ends on the cut;
    /// the flag reports whether it crossed at all.
    fn split_at_cut(&self, ring: &Ring) -> (Vec<Run>, bool) {
        let mut runs: Vec<Run> = Vec::new();
        let mut current: Run = Vec::new();
        let mut previous: Option<(f64, f64)> = None;
        for &(lon, lat) in ring {
            let rotated = self.rotated_lon(lon);
            if let Some((prev_lon, prev_lat)) = previous {
                if (rotated - prev_lon).abs() > 180.0 {
                    let edge = 180.0_f64.copysign(prev_lon);
                    let lat_cut = cut_latitude((prev_lon, prev_lat), (rotated, lat));
                    current.push((edge, lat_cut));
                    runs.push(std::mem::take(&mut current));
                    current.push((-edge, lat_cut));
                }
            }
            current.push((rotated, lat));
            previous = Some((rotated, lat));
        }
        if runs.is_empty() {
            return (vec![current], false);
        }
        // The tail of a closed ring continues into its head.
        let head = runs.remove(0);
        let skip = usize::from(current.last() == head.first());
        current.extend(head.into_iter().skip(skip));
        runs.push(current);
        (runs, true)
    }

    fn write_point(&self, out: &mut String, command: char, (rotated_lon, lat): (f64, f64)) {
        let (x, y) = self.project_rotated(rotated_lon, lat);
        let _ = write!(out, "{command}{x:.2},{y:.2}");
    }

    fn write_ring(&self, out: &mut String, ring: &Ring) {
        let (runs, crossed) = self.split_at_cut(ring);
        for run in runs {
            let Some((&first, rest)) = run.split_first() else {
                continue;
            };
            self.write_point(out, 'M', first);
            for &point in rest {
                self.write_point(out, 'L', point);
            }
            if crossed {
                if let Some(&last) = rest.last() {
                    for point in along_cut(last, first) {
                        self.write_point(out, 'L', point);
                    }
                }
            }
            out.push('Z');
        }
    }

    /// SVG path data for every ring of the feature. Empty for features without area.
    pub fn path(&self, feature: &GeoFeature) -> String {
        let mut out = String::new();
        for polygon in &feature.polygons {
            for ring in polygon {
                self.write_ring(&mut out, ring);
            }
        }
        out
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Projection, robinson_raw, wrap_degrees};
    use crate::config::MapConfig;
    use crate::geometry::GeoFeature;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-6, "expected {expected}, got {actual} (diff: {diff})");
    }

    fn unrotated() -> Projection {
        Projection::new(&MapConfig {
            rotate_deg: 0.0,
            ..MapConfig::default()
        })
    }

    #[test]
    fn origin_maps_to_translate() {
        let (x, y) = unrotated().project(0.0, 0.0);
        assert_close(x, 480.0);
        assert_close(y, 250.0);
    }

    #[test]
    fn equator_is_linear_in_longitude() {
        let (x, y) = robinson_raw(1.0, 0.0);
        assert_close(x, 1.0);
        assert_close(y, 0.0);
    }

    #[test]
    fn poles_use_last_table_row() {
        let (x, y) = robinson_raw(std::f64::consts::PI, std::f64::consts::FRAC_PI_2);
        assert_close(x, std::f64::consts::PI * 0.5322);
        assert_close(y, 1.593415793900743);
        let (_, south) = robinson_raw(0.0, -std::f64::consts::FRAC_PI_2);
        assert_close(south, -1.593415793900743);
    }

    #[test]
    fn north_is_up_on_screen() {
        let projection = unrotated();
        let (_, north) = projection.project(0.0, 45.0);
        let (_, south) = projection.project(0.0, -45.0);
        assert!(north < 250.0 && south > 250.0);
        assert_close(north - 250.0, 250.0 - south);
    }

    #[test]
    fn rotation_wraps_longitudes() {
        let projection = Projection::default();
        assert_close(projection.rotated_lon(0.0), -8.0);
        assert_close(projection.rotated_lon(-175.0), 177.0);
        assert_close(projection.rotated_lon(-170.0), -178.0);
        assert_close(wrap_degrees(180.0), 180.0);
        assert_close(wrap_degrees(-180.0), -180.0);
    }

    #[test]
    fn simple_ring_is_one_closed_subpath() {
        let feature = GeoFeature {
            id: Some("AAA".to_string()),
            name: "Alpha".to_string(),
            polygons: vec![vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]]],
        };
        let path = unrotated().path(&feature);
        assert!(path.starts_with("M480.00,250.00L"));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('M').count(), 1);
    }

    fn formatted(projection: &Projection, rotated_lon: f64, lat: f64) -> String {
        let (x, y) = projection.project_rotated(rotated_lon, lat);
        format!("{x:.2},{y:.2}")
    }

    #[test]
    fn ring_crossing_the_cut_closes_along_the_cut() {
        let feature = GeoFeature {
            id: None,
            name: "Chukotka".to_string(),
            polygons: vec![vec![vec![(170.0, 65.0), (179.0, 65.0), (-179.0, 66.0), (170.0, 65.0)]]],
        };
        let projection = unrotated();
        let path = projection.path(&feature);
        // One piece on each side of the cut, both ending on the map edge.
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('Z').count(), 2);
        assert!(path.contains(&formatted(&projection, 180.0, 65.5)));
        assert!(path.contains(&formatted(&projection, -180.0, 65.5)));
        let east = path
            .split('Z')
            .find(|piece| piece.contains(&formatted(&projection, 170.0, 65.0)))
            .unwrap();
        assert!(east.trim_start_matches('M').starts_with(&formatted(&projection, 180.0, 65.0 + 10.0 / 11.0)));
    }

    #[test]
    fn ring_round_a_pole_follows_the_pole_line() {
        let feature = GeoFeature {
            id: None,
            name: "Antarctica".to_string(),
            polygons: vec![vec![vec![
                (-170.0, -80.0),
                (-60.0, -80.0),
                (60.0, -80.0),
                (170.0, -80.0),
                (-170.0, -80.0),
            ]]],
        };
        let projection = unrotated();
        let path = projection.path(&feature);
        assert_eq!(path.matches('M').count(), 1);
        assert!(path.contains(&formatted(&projection, 180.0, -85.0)));
        assert!(path.contains(&formatted(&projection, 180.0, -90.0)));
        assert!(path.contains(&formatted(&projection, -180.0, -90.0)));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn feature_without_polygons_has_empty_path() {
        let feature = GeoFeature {
            id: None,
            name: String::new(),
            polygons: Vec::new(),
        };
        assert!(Projection::default().path(&feature).is_empty());
    }
}
