//! Sequential color palette for choropleth shading.
//!
//! Process-wide immutable configuration. The display layer sometimes wants
//! the dark end first; that is a pure function returning a new sequence,
//! never an in-place reversal of the shared constant.

/// Six-step sequential palette (dark → light), hex RGB.
pub const VIRIDIS_6: [&str; 6] = [
    "#440154", "#404387", "#29788E", "#22A784", "#79D151", "#FDE724",
];

/// The palette light-end first, as a new sequence.
pub fn reversed() -> Vec<&'static str> {
    let mut out = VIRIDIS_6.to_vec();
    out.reverse();
    out
}
