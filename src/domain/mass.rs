//! Component-mass conversions.

/// Convert component masses to chirp mass and symmetric mass ratio.
///
/// `mchirp = (m1 m2)^(3/5) / (m1 + m2)^(1/5)`, `eta = m1 m2 / (m1 + m2)^2`.
#[must_use]
pub fn mass1_mass2_to_mchirp_eta(mass1: f64, mass2: f64) -> (f64, f64) {
    let total = mass1 + mass2;
    let eta = mass1 * mass2 / (total * total);
    let mchirp = total * eta.powf(0.6);
    (mchirp, eta)
}

#[must_use]
pub fn chirp_mass(mass1: f64, mass2: f64) -> f64 {
    mass1_mass2_to_mchirp_eta(mass1, mass2).0
}
