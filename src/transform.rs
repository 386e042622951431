/*
Copyright 2024 Rollen S. D'Souza

Redistribution and use in source and binary forms, with or without modification,
are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its contributors
   may be used to endorse or promote products derived from this software without
   specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS “AS IS” AND
ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR
ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
(INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON
ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
*/

//! Transform module.
//!
//! A rigid-body 6-DoF pose with a 6x6 covariance over (translation, rotation).
//! Composition and inversion propagate the covariance to first order via the
//! adjoint of the rigid transform, matching how pose-graph covariances are
//! usually carried through a chain of relative transforms.

use nalgebra::{Matrix3, Matrix6, UnitQuaternion, Vector3};

#[derive(Debug, Clone)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub covariance: Matrix6<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            translation: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            covariance: Matrix6::zeros(),
        }
    }

    pub fn new(translation: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Transform {
            translation,
            orientation,
            covariance: Matrix6::zeros(),
        }
    }

    /// Resets `self` to the identity transform in place.
    pub fn set_identity(&mut self) {
        self.translation = Vector3::zeros();
        self.orientation = UnitQuaternion::identity();
        self.covariance = Matrix6::zeros();
    }

    pub fn with_covariance(
        translation: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
        covariance: Matrix6<f64>,
    ) -> Self {
        Transform {
            translation,
            orientation,
            covariance,
        }
    }

    /// The 6x6 adjoint of this transform, used to carry a covariance defined
    /// in the child frame into the parent frame.
    fn adjoint(&self) -> Matrix6<f64> {
        let r = self.orientation.to_rotation_matrix().into_inner();
        let t = self.translation;
        let t_hat = Matrix3::new(
            0.0, -t.z, t.y, //
            t.z, 0.0, -t.x, //
            -t.y, t.x, 0.0,
        );

        let mut adj = Matrix6::zeros();
        adj.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        adj.fixed_view_mut::<3, 3>(0, 3).copy_from(&(t_hat * r));
        adj.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        adj
    }

    /// Composes `self` followed by `other`, i.e. the transform you'd get by
    /// chaining `self` (parent <- self) and `other` (self <- other).
    pub fn compose(&self, other: &Transform) -> Transform {
        let translation = self.translation + self.orientation * other.translation;
        let orientation = self.orientation * other.orientation;

        let adj = self.adjoint();
        let covariance = self.covariance + adj * other.covariance * adj.transpose();

        Transform {
            translation,
            orientation,
            covariance,
        }
    }

    pub fn inverse(&self) -> Transform {
        let orientation = self.orientation.inverse();
        let translation = orientation * (-self.translation);

        let inv = Transform {
            translation,
            orientation,
            covariance: Matrix6::zeros(),
        };
        let adj = inv.adjoint();
        let covariance = adj * self.covariance * adj.transpose();

        Transform {
            translation,
            orientation,
            covariance,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.translation.iter().all(|v| v.is_finite())
            && self.orientation.into_inner().coords.iter().all(|v| v.is_finite())
            && self.covariance.iter().all(|v| v.is_finite())
    }

    /// Approximate equality within `eps` on translation and quaternion
    /// coefficients; used by tests and the edge-pair invariant check.
    pub fn approx_eq(&self, other: &Transform, eps: f64) -> bool {
        (self.translation - other.translation).norm() <= eps
            && (self.orientation.into_inner().coords - other.orientation.into_inner().coords)
                .norm()
                <= eps
    }
}

impl std::ops::Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, other: &Transform) -> Transform {
        self.compose(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_composes_to_identity() {
        let id = Transform::identity();
        let composed = id.compose(&id);
        assert!(composed.translation.norm() < 1e-12);
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );
        let round_trip = t.compose(&t.inverse());
        assert!(round_trip.approx_eq(&Transform::identity(), 1e-9));
    }

    #[test]
    fn translation_only_composition() {
        let a = Transform::new(Vector3::new(1.0, 0.0, 0.0), UnitQuaternion::identity());
        let b = Transform::new(Vector3::new(0.0, 1.0, 0.0), UnitQuaternion::identity());
        let c = a.compose(&b);
        assert!((c.translation - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn set_identity_resets_an_existing_instance() {
        let mut t = Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );
        t.set_identity();
        assert!(t.approx_eq(&Transform::identity(), 1e-12));
        assert!(t.covariance.iter().all(|v| *v == 0.0));
    }
}
