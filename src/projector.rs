//! Projects geographic polylines to planar coordinates, splitting them where
//! the projection tears the globe apart.

use crate::error::ProjError;
use crate::line::MapLine;
use crate::proj::common::adjlon;
use crate::proj::Projection;

/// Spacing between graticule lines, degrees.
const GRATICULE_STEP_DEG: f64 = 15.0;
/// Vertex sampling distance along each graticule line, degrees.
const GRATICULE_SAMPLE_DEG: f64 = 2.0;
/// A planar jump longer than this fraction of the full map width splits the
/// line.
const JUMP_FRACTION: f64 = 0.25;

/// Degree-space counterpart of [`adjlon`]: wraps a longitude into
/// [-180, 180]. Inputs stay within one wrap of the range.
fn wrap_deg(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Stateless driver that feeds line vertices through a [`Projection`].
///
/// Input lines carry (longitude, latitude) vertices in degrees; projected
/// output is in metres. Vertices the projection cannot place are dropped and
/// the line is split at the gap, so one input line may yield several output
/// sub-lines.
#[derive(Debug, Default)]
pub struct LineProjector;

impl LineProjector {
    pub fn new() -> Self {
        Self
    }

    /// Appends a degree-space graticule covering the projection's declared
    /// domain: meridians and parallels every 15°, vertices every 2°.
    pub fn construct_graticule(&self, lines: &mut Vec<MapLine>, proj: &dyn Projection) {
        let cfg = proj.config();
        let lon0_deg = cfg.lon0.to_degrees();
        let lon_min = cfg.lon_min.to_degrees();
        let lon_max = cfg.lon_max.to_degrees();
        let lat_min = cfg.lat_min.to_degrees();
        let lat_max = cfg.lat_max.to_degrees();
        let full_world = (lon_max - lon_min) >= 360.0 - 1e-9;

        // meridians
        let mut lon = lon_min;
        while lon <= lon_max + 1e-9 {
            // for a full-world domain the +180° meridian duplicates -180°
            if !(full_world && (lon - lon_max).abs() < 1e-9) {
                let mut line = MapLine::new();
                let mut lat = lat_min;
                while lat <= lat_max + 1e-9 {
                    line.push(wrap_deg(lon0_deg + lon), lat);
                    lat += GRATICULE_SAMPLE_DEG;
                }
                lines.push(line);
            }
            lon += GRATICULE_STEP_DEG;
        }

        // parallels, poles excluded
        let mut lat = (lat_min / GRATICULE_STEP_DEG).ceil() * GRATICULE_STEP_DEG;
        while lat <= lat_max + 1e-9 {
            if lat.abs() < 90.0 - 1e-9 {
                let mut line = MapLine::new();
                let mut lon = lon_min;
                while lon <= lon_max + 1e-9 {
                    line.push(wrap_deg(lon0_deg + lon), lat);
                    lon += GRATICULE_SAMPLE_DEG;
                }
                lines.push(line);
            }
            lat += GRATICULE_STEP_DEG;
        }
    }

    /// Forward-projects `src` into `dst`, splitting lines at dropped
    /// vertices, longitude wraps and planar discontinuities.
    pub fn project_lines(
        &self,
        src: &[MapLine],
        dst: &mut Vec<MapLine>,
        proj: &dyn Projection,
    ) -> Result<(), ProjError> {
        let cfg = proj.config();
        let max_jump =
            JUMP_FRACTION * cfg.ellipsoid.a * (cfg.lon_max - cfg.lon_min);
        let half_domain = 0.5 * (cfg.lon_max - cfg.lon_min);

        for line in src {
            let mut current = MapLine::new();
            let mut prev: Option<(f64, f64, f64)> = None;
            for &(lon_deg, lat_deg) in line.points() {
                let lon = lon_deg.to_radians();
                let lat = lat_deg.to_radians();
                match self.project_vertex(lon, lat, proj)? {
                    None => {
                        Self::flush(&mut current, dst);
                        prev = None;
                    }
                    Some((x, y)) => {
                        if let Some((plon, px, py)) = prev {
                            let dlon = (adjlon(lon) - adjlon(plon)).abs();
                            let jump = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                            if dlon > half_domain || jump > max_jump {
                                Self::flush(&mut current, dst);
                            }
                        }
                        current.push(x, y);
                        prev = Some((lon, x, y));
                    }
                }
            }
            Self::flush(&mut current, dst);
        }
        Ok(())
    }

    /// Projects the planar lines back to degree space. Fails up-front when
    /// the family has no inverse.
    pub fn inverse(
        &self,
        src: &[MapLine],
        proj: &dyn Projection,
    ) -> Result<Vec<MapLine>, ProjError> {
        if !proj.has_inverse() {
            return Err(ProjError::InverseUnsupported(proj.name()));
        }
        let mut out = Vec::new();
        for line in src {
            let mut current = MapLine::new();
            for &(x, y) in line.points() {
                match proj.inverse(x, y) {
                    Ok((lon, lat)) => {
                        current.push(lon.to_degrees(), lat.to_degrees());
                    }
                    Err(ProjError::OutsideDomain) | Err(ProjError::NoConvergence(_)) => {
                        Self::flush(&mut current, &mut out);
                    }
                    Err(e) => return Err(e),
                }
            }
            Self::flush(&mut current, &mut out);
        }
        Ok(out)
    }

    /// One vertex through the forward transform. `Ok(None)` marks a vertex
    /// the projection cannot place; hard errors propagate.
    fn project_vertex(
        &self,
        lon: f64,
        lat: f64,
        proj: &dyn Projection,
    ) -> Result<Option<(f64, f64)>, ProjError> {
        let cfg = proj.config();
        let rel = adjlon(lon - cfg.lon0);
        if rel < cfg.lon_min - 1e-9
            || rel > cfg.lon_max + 1e-9
            || lat < cfg.lat_min - 1e-9
            || lat > cfg.lat_max + 1e-9
        {
            return Ok(None);
        }
        match proj.forward(lon, lat) {
            Ok(xy) => Ok(Some(xy)),
            Err(ProjError::OutsideDomain) | Err(ProjError::NoConvergence(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Moves `current` into `dst` if it holds any projected output. A
    /// single vertex is kept: splitting a two-vertex segment must still
    /// yield output on both sides of the cut.
    fn flush(current: &mut MapLine, dst: &mut Vec<MapLine>) {
        if !current.is_empty() {
            dst.push(std::mem::take(current));
        }
    }
}
