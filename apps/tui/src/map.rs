//! Projection of issue coordinates into viewport percentages.

use crate::domain::Issue;

/// Box shown when there is nothing to fit (Bahawalpur city centre).
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    min_lat: 29.35,
    max_lat: 29.45,
    min_lon: 71.65,
    max_lon: 71.72,
};

pub const PADDING_RATIO: f64 = 0.1;
pub const MIN_PADDING: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Extrema of the given points, or `DEFAULT_BOUNDS` when empty.
    pub fn enclosing(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        points
            .into_iter()
            .fold(None, |bounds: Option<Self>, (lat, lon)| {
                Some(bounds.map_or(
                    Self {
                        min_lat: lat,
                        max_lat: lat,
                        min_lon: lon,
                        max_lon: lon,
                    },
                    |b| Self {
                        min_lat: b.min_lat.min(lat),
                        max_lat: b.max_lat.max(lat),
                        min_lon: b.min_lon.min(lon),
                        max_lon: b.max_lon.max(lon),
                    },
                ))
            })
            .unwrap_or(DEFAULT_BOUNDS)
    }

    /// Widens each axis by 10% of its span, or by `MIN_PADDING` when the span
    /// is zero, so `max > min` holds strictly afterwards.
    pub fn padded(self) -> Self {
        let lat_padding = axis_padding(self.max_lat - self.min_lat);
        let lon_padding = axis_padding(self.max_lon - self.min_lon);

        Self {
            min_lat: self.min_lat - lat_padding,
            max_lat: self.max_lat + lat_padding,
            min_lon: self.min_lon - lon_padding,
            max_lon: self.max_lon + lon_padding,
        }
    }

    pub fn project(&self, lat: f64, lng: f64) -> MarkerPosition {
        let lat_pct = (lat - self.min_lat) / (self.max_lat - self.min_lat) * 100.0;
        let lon_pct = (lng - self.min_lon) / (self.max_lon - self.min_lon) * 100.0;

        MarkerPosition {
            left: clamp_pct(lon_pct),
            // North is screen-up while top-offset grows downward.
            top: 100.0 - clamp_pct(lat_pct),
        }
    }
}

fn axis_padding(span: f64) -> f64 {
    let padding = span * PADDING_RATIO;
    if padding > 0.0 {
        padding
    } else {
        MIN_PADDING
    }
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Marker placement as percentages from the viewport's left and top edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub left: f64,
    pub top: f64,
}

/// Padded viewport bounds for a set of issues.
pub fn viewport_bounds<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Bounds {
    Bounds::enclosing(
        issues
            .into_iter()
            .map(|issue| (issue.location.lat, issue.location.lng)),
    )
    .padded()
}

pub fn project_issues<'a>(issues: &[&'a Issue]) -> Vec<(&'a Issue, MarkerPosition)> {
    let bounds = viewport_bounds(issues.iter().copied());
    issues
        .iter()
        .map(|issue| (*issue, bounds.project(issue.location.lat, issue.location.lng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fixtures::issue;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-6, "expected {expected}, got {actual}, diff {diff}");
    }

    fn at(id: &str, lat: f64, lng: f64) -> Issue {
        let mut issue = issue(id, "Marker", "GOVT", 5, None);
        issue.location.lat = lat;
        issue.location.lng = lng;
        issue
    }

    #[test]
    fn single_issue_is_centered() {
        let only = at("1", 40.758, -73.9855);
        let projected = project_issues(&[&only]);

        assert_eq!(projected.len(), 1);
        assert_close(projected[0].1.left, 50.0);
        assert_close(projected[0].1.top, 50.0);
    }

    #[test]
    fn identical_coordinates_use_minimum_padding() {
        let a = at("1", 29.4, 71.7);
        let b = at("2", 29.4, 71.7);
        let bounds = viewport_bounds([&a, &b]);

        assert_close(bounds.max_lat - bounds.min_lat, 2.0 * MIN_PADDING);
        assert_close(bounds.max_lon - bounds.min_lon, 2.0 * MIN_PADDING);
    }

    #[test]
    fn extremes_land_strictly_inside_viewport() {
        let issues = [
            at("1", 40.758, -73.9855),
            at("2", 40.756, -73.987),
            at("3", 40.760, -73.983),
        ];
        let refs = issues.iter().collect::<Vec<_>>();

        for (_, position) in project_issues(&refs) {
            assert!(position.left > 0.0 && position.left < 100.0);
            assert!(position.top > 0.0 && position.top < 100.0);
        }
    }

    #[test]
    fn north_maps_to_screen_up() {
        let south = at("1", 40.756, -73.987);
        let north = at("2", 40.760, -73.987);
        let projected = project_issues(&[&south, &north]);

        assert!(projected[1].1.top < projected[0].1.top);
        assert_close(projected[0].1.top, 100.0 - 10.0 / 1.2);
    }

    #[test]
    fn empty_set_falls_back_to_default_box() {
        let bounds = viewport_bounds(std::iter::empty::<&Issue>());
        assert_close(bounds.min_lat, 29.35 - 0.01);
        assert_close(bounds.max_lon, 71.72 + 0.007);
    }

    #[test]
    fn out_of_bounds_points_are_clamped() {
        let position = DEFAULT_BOUNDS.project(50.0, 0.0);
        assert_close(position.top, 0.0);
        assert_close(position.left, 0.0);
    }
}
