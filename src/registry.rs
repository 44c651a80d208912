//! Name-keyed factory for the projection families.

use crate::error::ProjError;
use crate::proj::albers::AlbersEqualArea;
use crate::proj::azimuthal_equidistant::AzimuthalEquidistant;
use crate::proj::bonne::Bonne;
use crate::proj::cassini::Cassini;
use crate::proj::cylindrical_equal_area::CylindricalEqualArea;
use crate::proj::equidistant_conic::EquidistantConic;
use crate::proj::lambert_azimuthal::LambertAzimuthalEqualArea;
use crate::proj::lambert_conformal::LambertConformalConic;
use crate::proj::mercator::Mercator;
use crate::proj::orthographic::Orthographic;
use crate::proj::plate_carree::PlateCarree;
use crate::proj::sinusoidal::Sinusoidal;
use crate::proj::stereographic::Stereographic;
use crate::proj::winkel_tripel::WinkelTripel;
use crate::proj::Projection;

/// Display names of every available family, alphabetically ordered. The
/// order is stable and suitable for UI listings.
pub const NAMES: &[&str] = &[
    "Albers Equal-Area Conic",
    "Azimuthal Equidistant",
    "Bonne",
    "Cassini",
    "Cylindrical Equal-Area",
    "Equidistant Conic",
    "Lambert Azimuthal Equal-Area",
    "Lambert Conformal Conic",
    "Mercator",
    "Orthographic",
    "Plate Carrée",
    "Sinusoidal",
    "Stereographic",
    "Winkel Tripel",
];

pub fn list_names() -> &'static [&'static str] {
    NAMES
}

/// Instantiates a projection by its display name (exact, case-sensitive).
/// The returned instance is unconfigured; call `initialize()` before use.
pub fn create_by_name(name: &str) -> Result<Box<dyn Projection>, ProjError> {
    let proj: Box<dyn Projection> = match name {
        "Albers Equal-Area Conic" => Box::new(AlbersEqualArea::new()),
        "Azimuthal Equidistant" => Box::new(AzimuthalEquidistant::new()),
        "Bonne" => Box::new(Bonne::new()),
        "Cassini" => Box::new(Cassini::new()),
        "Cylindrical Equal-Area" => Box::new(CylindricalEqualArea::new()),
        "Equidistant Conic" => Box::new(EquidistantConic::new()),
        "Lambert Azimuthal Equal-Area" => Box::new(LambertAzimuthalEqualArea::new()),
        "Lambert Conformal Conic" => Box::new(LambertConformalConic::new()),
        "Mercator" => Box::new(Mercator::new()),
        "Orthographic" => Box::new(Orthographic::new()),
        "Plate Carrée" => Box::new(PlateCarree::new()),
        "Sinusoidal" => Box::new(Sinusoidal::new()),
        "Stereographic" => Box::new(Stereographic::new()),
        "Winkel Tripel" => Box::new(WinkelTripel::new()),
        _ => return Err(ProjError::UnknownName(name.to_string())),
    };
    Ok(proj)
}
