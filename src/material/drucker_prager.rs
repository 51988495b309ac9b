use super::{check_flow_rate, ElasticMaterial, ElastoplasticTrait};
use crate::base::{real, VoigtTensor, SQRT_J2_SINGULAR};
use crate::codec::{get_field, put_field, Archive, MaterialKind};
use crate::StrError;
use bytes::{Buf, BufMut};
use nalgebra::RealField;

/// Implements the Drucker-Prager elastoplastic material (e.g., for soils)
///
/// The yield function is:
///
/// ```text
/// f = α I1 + √J2 - k
/// ```
///
/// and the plastic potential is:
///
/// ```text
/// g = β I1 + √J2
/// ```
///
/// where α is the internal friction coefficient, β is the dilatancy and k is the
/// (possibly hardened) yield term. The flow is associated when β = α. With α = 0 the
/// cone degenerates into the von Mises cylinder of radius √3 k.
///
/// The yield term evolves exponentially with the accumulated plastic strain κ:
///
/// ```text
/// k(κ) = k∞ + (k₀ - k∞) exp(-κ / s)
/// ```
///
/// where k₀ is the elastic yield, k∞ is the hardening limit and s is the hardening speed
/// (the larger, the slower). κ is the von Mises equivalent of the caller's plastic strain
/// (see [DruckerPragerPlastic::hardened_yield]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DruckerPragerPlastic<T: RealField + Copy = f64> {
    /// Hookean material
    elastic: ElasticMaterial<T>,

    /// Initial yield term k₀ (cohesion-like)
    elastic_yield: T,

    /// Internal friction coefficient α
    alpha: T,

    /// Dilatancy coefficient β
    dilatancy: T,

    /// Inverse speed of the exponential hardening (zero disables hardening)
    hardening_speed: T,

    /// Asymptotic yield term k∞
    hardening_limit: T,

    /// Plastic flow rate multiplier
    flow_rate: T,
}

impl<T: RealField + Copy> DruckerPragerPlastic<T> {
    /// Allocates a new instance
    ///
    /// The hardening limit is set equal to the elastic yield and hardening is disabled.
    pub fn new(elastic: ElasticMaterial<T>, elastic_yield: T, alpha: T, dilatancy: T) -> Result<Self, StrError> {
        check_non_negative(elastic_yield, "elastic yield must be ≥ 0")?;
        check_non_negative(alpha, "alpha must be ≥ 0")?;
        check_non_negative(dilatancy, "dilatancy must be ≥ 0")?;
        Ok(DruckerPragerPlastic {
            elastic,
            elastic_yield,
            alpha,
            dilatancy,
            hardening_speed: T::zero(),
            hardening_limit: elastic_yield,
            flow_rate: T::one(),
        })
    }

    /// Sets the initial yield term k₀
    pub fn set_elastic_yield(&mut self, elastic_yield: T) -> Result<(), StrError> {
        check_non_negative(elastic_yield, "elastic yield must be ≥ 0")?;
        self.elastic_yield = elastic_yield;
        Ok(())
    }

    /// Sets the internal friction coefficient α
    pub fn set_alpha(&mut self, alpha: T) -> Result<(), StrError> {
        check_non_negative(alpha, "alpha must be ≥ 0")?;
        self.alpha = alpha;
        Ok(())
    }

    /// Sets the dilatancy coefficient β (usually 0 ≤ β ≤ α)
    pub fn set_dilatancy(&mut self, dilatancy: T) -> Result<(), StrError> {
        check_non_negative(dilatancy, "dilatancy must be ≥ 0")?;
        self.dilatancy = dilatancy;
        Ok(())
    }

    /// Sets the inverse speed of hardening (zero disables hardening)
    pub fn set_hardening_speed(&mut self, hardening_speed: T) -> Result<(), StrError> {
        check_non_negative(hardening_speed, "hardening speed must be ≥ 0")?;
        self.hardening_speed = hardening_speed;
        Ok(())
    }

    /// Sets the asymptotic yield term (above k₀ for hardening, below for softening)
    pub fn set_hardening_limit(&mut self, hardening_limit: T) -> Result<(), StrError> {
        check_non_negative(hardening_limit, "hardening limit must be ≥ 0")?;
        self.hardening_limit = hardening_limit;
        Ok(())
    }

    /// Sets α and k₀ from the friction angle and cohesion of the Mohr-Coulomb model
    ///
    /// The faceted Mohr-Coulomb surface is approximated by an inscribed cone (`inner_approx`)
    /// or by a circumscribed cone:
    ///
    /// ```text
    /// inscribed:     α = 2 sin φ / (√3 (3 + sin φ))    k₀ = 6 c cos φ / (√3 (3 + sin φ))
    /// circumscribed: α = 2 sin φ / (√3 (3 - sin φ))    k₀ = 6 c cos φ / (√3 (3 - sin φ))
    /// ```
    ///
    /// Both cones share the apex at I1 = 3 c cot φ.
    ///
    /// # Input
    ///
    /// * `phi` -- friction angle in radians, 0 < φ < π/2
    /// * `cohesion` -- cohesion c ≥ 0
    /// * `inner_approx` -- use the inscribed cone, otherwise the circumscribed one
    pub fn set_from_mohr_coulomb(&mut self, phi: T, cohesion: T, inner_approx: bool) -> Result<(), StrError> {
        if !(phi > T::zero() && phi < T::pi() * real::<T>(0.5)) {
            return Err("phi must be in (0, π/2)");
        }
        check_non_negative(cohesion, "cohesion must be ≥ 0")?;
        let (sin_phi, cos_phi) = (phi.sin(), phi.cos());
        let three = real::<T>(3.0);
        let den = if inner_approx {
            three.sqrt() * (three + sin_phi)
        } else {
            three.sqrt() * (three - sin_phi)
        };
        self.alpha = real::<T>(2.0) * sin_phi / den;
        self.elastic_yield = real::<T>(6.0) * cohesion * cos_phi / den;
        Ok(())
    }

    /// Returns the initial yield term k₀
    pub fn elastic_yield(&self) -> T {
        self.elastic_yield
    }

    /// Returns the internal friction coefficient α
    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// Returns the dilatancy coefficient β
    pub fn dilatancy(&self) -> T {
        self.dilatancy
    }

    /// Returns the inverse speed of hardening
    pub fn hardening_speed(&self) -> T {
        self.hardening_speed
    }

    /// Returns the asymptotic yield term
    pub fn hardening_limit(&self) -> T {
        self.hardening_limit
    }

    /// Indicates whether the flow is associated (β = α) or not
    pub fn associated(&self) -> bool {
        self.dilatancy == self.alpha
    }

    /// Calculates the yield term k(κ) given the accumulated plastic strain κ
    ///
    /// In `return_mapping`, κ is the von Mises equivalent of the current plastic strain tensor,
    /// not a path integral. Thus κ decreases when the plastic flow reverses (e.g., cyclic shear)
    /// and k moves back toward k₀. Callers needing path-accumulated hardening should integrate
    /// κ themselves and use [DruckerPragerPlastic::yield_function_hardened].
    pub fn hardened_yield(&self, accumulated_plastic_strain: T) -> T {
        if !(self.hardening_speed > T::zero()) {
            return self.elastic_yield;
        }
        let kappa = accumulated_plastic_strain.max(T::zero());
        let decay = (-kappa / self.hardening_speed).exp();
        self.hardening_limit + (self.elastic_yield - self.hardening_limit) * decay
    }

    /// Calculates the yield function with the yield term hardened by κ
    pub fn yield_function_hardened(&self, stress: &VoigtTensor<T>, accumulated_plastic_strain: T) -> T {
        let k = self.hardened_yield(accumulated_plastic_strain);
        self.alpha * stress.invariant_i1() + stress.invariant_j2().sqrt() - k
    }

    /// Calculates the derivative of the yield function w.r.t stress
    ///
    /// ```text
    /// df/dσ = α I + s / (2 √J2)
    /// ```
    pub fn yield_gradient(&self, stress: &VoigtTensor<T>) -> VoigtTensor<T> {
        cone_gradient(stress, self.alpha)
    }

    /// Calculates the derivative of the plastic potential w.r.t stress (flow direction)
    ///
    /// ```text
    /// dg/dσ = β I + s / (2 √J2)
    /// ```
    pub fn flow_direction(&self, stress: &VoigtTensor<T>) -> VoigtTensor<T> {
        cone_gradient(stress, self.dilatancy)
    }

    /// Projects the trial elastic strain onto the cone with yield term k
    ///
    /// With Δε_p = Δλ dg/dσ, the stress update is σ = σ_trial - Δλ (3 K β I + G s/√J2), thus:
    ///
    /// ```text
    /// Δλ = f_trial / (G + 9 K α β)
    /// ```
    ///
    /// If √J2 - G Δλ < 0 the deviator would reverse and the stress is returned to the apex.
    fn project(&self, trial_strain: &VoigtTensor<T>, k: T) -> VoigtTensor<T> {
        let stress = self.elastic.compute_elastic_stress(trial_strain);
        let sqrt_j2 = stress.invariant_j2().sqrt();
        let f = self.alpha * stress.invariant_i1() + sqrt_j2 - k;
        if f <= T::zero() {
            return VoigtTensor::zero();
        }
        let gg = self.elastic.shear();
        let kk = self.elastic.bulk_modulus();
        let lambda = f / (gg + real::<T>(9.0) * kk * self.alpha * self.dilatancy);
        let correction = if self.alpha > T::zero() && sqrt_j2 < gg * lambda {
            let apex = VoigtTensor::identity() * (k / (real::<T>(3.0) * self.alpha));
            tracing::debug!(?apex, "Drucker-Prager return to the apex");
            *trial_strain - self.elastic.compute_elastic_strain(&apex)
        } else {
            self.flow_direction(&stress) * lambda
        };
        correction * self.flow_rate
    }
}

impl<T: RealField + Copy> Default for DruckerPragerPlastic<T> {
    fn default() -> Self {
        let elastic_yield = real::<T>(0.1);
        DruckerPragerPlastic {
            elastic: ElasticMaterial::default(),
            elastic_yield,
            alpha: real::<T>(0.5),
            dilatancy: T::zero(),
            hardening_speed: T::zero(),
            hardening_limit: elastic_yield,
            flow_rate: T::one(),
        }
    }
}

impl<T: RealField + Copy> ElastoplasticTrait<T> for DruckerPragerPlastic<T> {
    fn elastic(&self) -> &ElasticMaterial<T> {
        &self.elastic
    }

    fn elastic_mut(&mut self) -> &mut ElasticMaterial<T> {
        &mut self.elastic
    }

    /// Calculates the yield function f = α I1 + √J2 - k₀
    fn yield_function(&self, stress: &VoigtTensor<T>) -> T {
        self.alpha * stress.invariant_i1() + stress.invariant_j2().sqrt() - self.elastic_yield
    }

    /// Calculates the yield function with k hardened by the last plastic strain
    fn yield_function_current(&self, stress: &VoigtTensor<T>, last_plastic_strain: &VoigtTensor<T>) -> T {
        self.yield_function_hardened(stress, last_plastic_strain.equivalent_von_mises())
    }

    /// Calculates the plastic strain flow from a virgin state (no hardening)
    fn plastic_strain_flow(&self, total_strain: &VoigtTensor<T>) -> VoigtTensor<T> {
        self.project(total_strain, self.elastic_yield)
    }

    /// Calculates the plastic strain correction onto the (hardened) cone
    fn return_mapping(
        &self,
        increment_strain: &VoigtTensor<T>,
        last_elastic_strain: &VoigtTensor<T>,
        last_plastic_strain: &VoigtTensor<T>,
    ) -> VoigtTensor<T> {
        let trial = *last_elastic_strain + *increment_strain;
        let k = self.hardened_yield(last_plastic_strain.equivalent_von_mises());
        let correction = self.project(&trial, k);
        tracing::trace!(yielding = correction != VoigtTensor::zero(), "Drucker-Prager return mapping");
        correction
    }

    fn flow_rate(&self) -> T {
        self.flow_rate
    }

    fn set_flow_rate(&mut self, flow_rate: T) -> Result<(), StrError> {
        check_flow_rate(flow_rate)?;
        self.flow_rate = flow_rate;
        Ok(())
    }
}

impl Archive for DruckerPragerPlastic<f64> {
    const KIND: MaterialKind = MaterialKind::DruckerPrager;

    fn write_fields<B: BufMut>(&self, buf: &mut B) {
        self.elastic.write_fields(buf);
        put_field(buf, self.elastic_yield);
        put_field(buf, self.alpha);
        put_field(buf, self.dilatancy);
        put_field(buf, self.hardening_speed);
        put_field(buf, self.hardening_limit);
        put_field(buf, self.flow_rate);
    }

    fn read_fields<B: Buf>(buf: &mut B) -> Result<Self, StrError> {
        let elastic = ElasticMaterial::<f64>::read_fields(buf)?;
        let elastic_yield = get_field(buf)?;
        let alpha = get_field(buf)?;
        let dilatancy = get_field(buf)?;
        let hardening_speed = get_field(buf)?;
        let hardening_limit = get_field(buf)?;
        let flow_rate = get_field(buf)?;
        check_non_negative(elastic_yield, "elastic yield must be ≥ 0")?;
        check_non_negative(alpha, "alpha must be ≥ 0")?;
        check_non_negative(dilatancy, "dilatancy must be ≥ 0")?;
        check_non_negative(hardening_speed, "hardening speed must be ≥ 0")?;
        check_non_negative(hardening_limit, "hardening limit must be ≥ 0")?;
        check_flow_rate(flow_rate)?;
        Ok(DruckerPragerPlastic {
            elastic,
            elastic_yield,
            alpha,
            dilatancy,
            hardening_speed,
            hardening_limit,
            flow_rate,
        })
    }
}

/// Calculates slope I + s / (2 √J2), dropping the deviatoric term at the hydrostatic axis
fn cone_gradient<T: RealField + Copy>(stress: &VoigtTensor<T>, slope: T) -> VoigtTensor<T> {
    let mut gradient = VoigtTensor::identity() * slope;
    let sqrt_j2 = stress.invariant_j2().sqrt();
    if sqrt_j2 > real::<T>(SQRT_J2_SINGULAR) {
        gradient += stress.deviatoric_part() * (T::one() / (real::<T>(2.0) * sqrt_j2));
    } else {
        tracing::debug!("singular cone gradient at the hydrostatic axis");
    }
    gradient
}

fn check_non_negative<T: RealField + Copy>(value: T, message: StrError) -> Result<(), StrError> {
    if !(value >= T::zero()) || !value.is_finite() {
        return Err(message);
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
