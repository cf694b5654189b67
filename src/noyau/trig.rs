// src/noyau/trig.rs
//
// Trigonométrie en degrés
// -----------------------
// Au clavier, sin/cos/tan prennent des degrés : la réécriture produit
// sinus(rad(x)), donc la conversion vit ici et les fonctions natives
// travaillent en radians.

use num_traits::{Float, FloatConst};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    /// Applique la fonction à un angle en radians.
    pub fn applique<F: Float>(self, x: F) -> F {
        match self {
            TrigFn::Sin => x.sin(),
            TrigFn::Cos => x.cos(),
            TrigFn::Tan => x.tan(),
        }
    }
}

/// Degrés -> radians : `d * (π / 180)`.
pub fn deg_vers_rad<F: Float + FloatConst>(degres: F) -> F {
    let demi_tour = F::from(180).unwrap_or_else(F::nan);
    degres * (F::PI() / demi_tour)
}
