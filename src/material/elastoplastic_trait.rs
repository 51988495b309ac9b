use super::ElasticMaterial;
use crate::base::VoigtTensor;
use crate::StrError;
use nalgebra::RealField;

/// Specifies the essential functions for elastoplastic materials
///
/// Implementations are stateless constitutive laws: the strain history (last elastic
/// strain and last plastic strain) is owned by the caller and passed in at every call.
/// All functions are total over finite inputs and valid parameters.
pub trait ElastoplasticTrait<T: RealField + Copy = f64>: Send + Sync {
    /// Returns an access to the underlying Hookean material
    fn elastic(&self) -> &ElasticMaterial<T>;

    /// Returns a mutable access to the underlying Hookean material
    fn elastic_mut(&mut self) -> &mut ElasticMaterial<T>;

    /// Calculates the yield function f with the initial (unhardened) yield parameters
    ///
    /// f < 0: elastic state; f = 0: on the yield surface; f > 0: inadmissible state
    ///
    /// Models with hardening accept states beyond this surface; see [ElastoplasticTrait::yield_function_current].
    fn yield_function(&self, stress: &VoigtTensor<T>) -> T;

    /// Calculates the yield function f on the surface used by `return_mapping` given the last plastic strain
    ///
    /// Without hardening, this equals [ElastoplasticTrait::yield_function].
    fn yield_function_current(&self, stress: &VoigtTensor<T>, _last_plastic_strain: &VoigtTensor<T>) -> T {
        self.yield_function(stress)
    }

    /// Calculates the plastic strain flow corresponding to a total strain
    ///
    /// The total strain is regarded as purely elastic; the result (scaled by the flow
    /// rate) is zero whenever the corresponding stress is admissible.
    fn plastic_strain_flow(&self, total_strain: &VoigtTensor<T>) -> VoigtTensor<T>;

    /// Calculates the plastic strain correction bringing the trial stress back to the yield surface
    ///
    /// The trial elastic strain is `last_elastic_strain + increment_strain`. The caller adds the
    /// returned tensor to its plastic strain and subtracts it from its elastic strain.
    fn return_mapping(
        &self,
        increment_strain: &VoigtTensor<T>,
        last_elastic_strain: &VoigtTensor<T>,
        last_plastic_strain: &VoigtTensor<T>,
    ) -> VoigtTensor<T>;

    /// Returns the plastic flow rate multiplier
    fn flow_rate(&self) -> T;

    /// Sets the plastic flow rate multiplier
    ///
    /// The lower the value, the slower the plastic flow during dynamic simulations
    /// (delayed plasticity). A value of 1.0 renders an instantaneous projection.
    fn set_flow_rate(&mut self, flow_rate: T) -> Result<(), StrError>;

    /// Computes the trial stress assuming that the whole increment is elastic
    fn trial_stress(&self, increment_strain: &VoigtTensor<T>, last_elastic_strain: &VoigtTensor<T>) -> VoigtTensor<T> {
        let trial = *last_elastic_strain + *increment_strain;
        self.elastic().compute_elastic_stress(&trial)
    }

    /// Indicates whether the stress is admissible (f ≤ 0) w.r.t the initial yield surface
    fn admissible(&self, stress: &VoigtTensor<T>) -> bool {
        self.yield_function(stress) <= T::zero()
    }
}

/// Checks the flow rate multiplier
pub(crate) fn check_flow_rate<T: RealField + Copy>(flow_rate: T) -> Result<(), StrError> {
    if !(flow_rate > T::zero()) || !flow_rate.is_finite() {
        return Err("flow rate must be > 0");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
