//! Cartogram corrections: fixed affine repositioning of named sub-regions
//! whose true location would force an impractically large viewport.
//!
//! Each exception applies, in this exact order: translate by a fixed
//! offset, scale by a fixed non-uniform factor about the shape's own
//! centroid, rotate by a fixed angle about that centroid. The ordering is
//! part of the contract; reordering produces a different placement.
//!
//! Pure and stateless per feature: the same input always yields
//! bit-identical output, and features can be corrected in any order.

use crate::geometry::Ring;

/// One named exception and its affine parameters.
#[derive(Debug, Clone, Copy)]
pub struct Correction {
    /// Canonical entity name the correction applies to.
    pub name: &'static str,
    /// Longitude/latitude offset applied first.
    pub translate: (f64, f64),
    /// Non-uniform scale factors applied second, about the centroid.
    pub scale: (f64, f64),
    /// Rotation in degrees applied last, about the centroid.
    pub rotate_deg: f64,
}

/// The fixed exception set. Immutable process-wide configuration.
pub const CORRECTIONS: &[Correction] = &[
    Correction {
        name: "Alaska",
        translate: (48.0, -36.0),
        scale: (0.35, 0.45),
        rotate_deg: -30.0,
    },
    Correction {
        name: "Hawaii",
        translate: (52.0, 4.0),
        scale: (1.0, 1.0),
        rotate_deg: 0.0,
    },
];

fn correction_for(name: &str) -> Option<&'static Correction> {
    CORRECTIONS.iter().find(|c| c.name == name)
}

/// Applies the named entity's correction to a ring. Entities outside the
/// exception set pass through unchanged.
pub fn apply(ring: &Ring, name: &str) -> Ring {
    match correction_for(name) {
        Some(correction) => apply_correction(ring, correction),
        None => ring.clone(),
    }
}

fn apply_correction(ring: &Ring, correction: &Correction) -> Ring {
    // 1. translate
    let mut out = Ring {
        lons: ring.lons.iter().map(|x| x + correction.translate.0).collect(),
        lats: ring.lats.iter().map(|y| y + correction.translate.1).collect(),
    };

    // 2. scale about the centroid (which the scale itself leaves fixed)
    let (cx, cy) = out.centroid();
    for x in &mut out.lons {
        *x = cx + (*x - cx) * correction.scale.0;
    }
    for y in &mut out.lats {
        *y = cy + (*y - cy) * correction.scale.1;
    }

    // 3. rotate about the same centroid
    let theta = correction.rotate_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    for i in 0..out.lons.len() {
        let dx = out.lons[i] - cx;
        let dy = out.lats[i] - cy;
        out.lons[i] = cx + dx * cos - dy * sin;
        out.lats[i] = cy + dx * sin + dy * cos;
    }

    out
}
