//! Inter-atomic distances with open or periodic boundaries.

use crate::error::{FieldError, FieldResult};
use serde::{Deserialize, Serialize};
use sf_core::{Real, Vector3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Boundary {
    /// Plain Euclidean distance.
    #[default]
    Open,
    /// Minimum-image convention in an orthorhombic box.
    Periodic { box_size: [Real; 3] },
}

impl Boundary {
    pub fn periodic(box_size: Vector3) -> FieldResult<Self> {
        if box_size.iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(FieldError::InvalidArg {
                what: "periodic box lengths must be positive",
            });
        }
        Ok(Self::Periodic {
            box_size: [box_size.x, box_size.y, box_size.z],
        })
    }

    /// Separation vector `a - b`, wrapped to the nearest image when periodic.
    pub fn separation(&self, a: &Vector3, b: &Vector3) -> Vector3 {
        let mut d = a - b;
        if let Self::Periodic { box_size } = self {
            for (x, l) in d.iter_mut().zip(box_size) {
                *x -= l * (*x / l).round();
            }
        }
        d
    }

    pub fn distance(&self, a: &Vector3, b: &Vector3) -> Real {
        self.separation(a, b).norm()
    }
}
