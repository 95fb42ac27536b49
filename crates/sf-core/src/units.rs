//! uom quantities at the API boundary.
//!
//! Only the bath temperature crosses the public API as a typed quantity;
//! times (ps), energies (eV) and pulsations (rad/ps) stay bare `Real`s in
//! the equations of motion.

use uom::si::f64::ThermodynamicTemperature;
use uom::si::thermodynamic_temperature::kelvin as kelvin_unit;

pub type Temperature = ThermodynamicTemperature;

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    Temperature::new::<kelvin_unit>(v)
}

/// Temperature in kelvin as a bare number.
#[inline]
pub fn as_kelvin(t: Temperature) -> f64 {
    t.get::<kelvin_unit>()
}
