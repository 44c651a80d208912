//! Polyline container shared by the geographic and planar sides of the
//! pipeline.

/// An ordered run of 2D vertices. Units depend on context: degrees for
/// geographic lines, metres for projected lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapLine {
    points: Vec<(f64, f64)>,
}

impl MapLine {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl FromIterator<(f64, f64)> for MapLine {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
