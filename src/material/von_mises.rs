use super::{check_flow_rate, ElasticMaterial, ElastoplasticTrait};
use crate::base::{real, VoigtTensor};
use crate::codec::{get_field, put_field, Archive, MaterialKind};
use crate::StrError;
use bytes::{Buf, BufMut};
use nalgebra::RealField;

/// Implements the von Mises elastoplastic material (perfect plasticity)
///
/// The yield function is:
///
/// ```text
/// f = σeq - elastic_yield
/// ```
///
/// where σeq is the von Mises equivalent stress. The plastic flow is associated, i.e.,
/// parallel to the deviatoric stress (normal to the von Mises cylinder).
///
/// The plastic yield is the equivalent stress at fracture. It does not affect the return
/// mapping; the caller decides what to do when [VonMisesPlastic::is_fractured] is true.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VonMisesPlastic<T: RealField + Copy = f64> {
    /// Hookean material
    elastic: ElasticMaterial<T>,

    /// Equivalent stress at the transition elastic → plastic
    elastic_yield: T,

    /// Equivalent stress at the transition plastic → fracture
    plastic_yield: T,

    /// Plastic flow rate multiplier
    flow_rate: T,
}

impl<T: RealField + Copy> VonMisesPlastic<T> {
    /// Allocates a new instance
    pub fn new(elastic: ElasticMaterial<T>, elastic_yield: T, plastic_yield: T) -> Result<Self, StrError> {
        check_yields(elastic_yield, plastic_yield)?;
        Ok(VonMisesPlastic {
            elastic,
            elastic_yield,
            plastic_yield,
            flow_rate: T::one(),
        })
    }

    /// Sets the equivalent stress at the onset of plastic flow
    pub fn set_elastic_yield(&mut self, elastic_yield: T) -> Result<(), StrError> {
        check_yields(elastic_yield, self.plastic_yield)?;
        self.elastic_yield = elastic_yield;
        Ok(())
    }

    /// Sets the equivalent stress at fracture
    pub fn set_plastic_yield(&mut self, plastic_yield: T) -> Result<(), StrError> {
        check_yields(self.elastic_yield, plastic_yield)?;
        self.plastic_yield = plastic_yield;
        Ok(())
    }

    /// Returns the equivalent stress at the onset of plastic flow
    pub fn elastic_yield(&self) -> T {
        self.elastic_yield
    }

    /// Returns the equivalent stress at fracture
    pub fn plastic_yield(&self) -> T {
        self.plastic_yield
    }

    /// Calculates the fracture function (σeq - plastic_yield)
    pub fn fracture_function(&self, stress: &VoigtTensor<T>) -> T {
        stress.equivalent_von_mises() - self.plastic_yield
    }

    /// Indicates whether the stress exceeds the plastic yield (fracture)
    pub fn is_fractured(&self, stress: &VoigtTensor<T>) -> bool {
        self.fracture_function(stress) > T::zero()
    }

    /// Computes the radial correction of an elastic strain onto the von Mises cylinder
    ///
    /// Since σeq depends on the deviator only and dev(σ) = 2G dev(ε), scaling dev(ε) by
    /// elastic_yield/σeq brings the stress exactly onto the yield surface.
    fn radial_correction(&self, elastic_strain: &VoigtTensor<T>) -> VoigtTensor<T> {
        let stress = self.elastic.compute_elastic_stress(elastic_strain);
        let sigma_eq = stress.equivalent_von_mises();
        if sigma_eq <= self.elastic_yield {
            return VoigtTensor::zero();
        }
        let m = self.flow_rate * (T::one() - self.elastic_yield / sigma_eq);
        elastic_strain.deviatoric_part() * m
    }
}

impl<T: RealField + Copy> Default for VonMisesPlastic<T> {
    fn default() -> Self {
        VonMisesPlastic {
            elastic: ElasticMaterial::default(),
            elastic_yield: real::<T>(0.1),
            plastic_yield: real::<T>(0.2),
            flow_rate: T::one(),
        }
    }
}

impl<T: RealField + Copy> ElastoplasticTrait<T> for VonMisesPlastic<T> {
    fn elastic(&self) -> &ElasticMaterial<T> {
        &self.elastic
    }

    fn elastic_mut(&mut self) -> &mut ElasticMaterial<T> {
        &mut self.elastic
    }

    /// Calculates the yield function f = σeq - elastic_yield
    fn yield_function(&self, stress: &VoigtTensor<T>) -> T {
        stress.equivalent_von_mises() - self.elastic_yield
    }

    /// Calculates the plastic strain flow (parallel to the deviatoric strain)
    fn plastic_strain_flow(&self, total_strain: &VoigtTensor<T>) -> VoigtTensor<T> {
        self.radial_correction(total_strain)
    }

    /// Calculates the plastic strain correction by radial return
    ///
    /// The last plastic strain is not needed because there is no hardening.
    fn return_mapping(
        &self,
        increment_strain: &VoigtTensor<T>,
        last_elastic_strain: &VoigtTensor<T>,
        _last_plastic_strain: &VoigtTensor<T>,
    ) -> VoigtTensor<T> {
        let trial = *last_elastic_strain + *increment_strain;
        let correction = self.radial_correction(&trial);
        tracing::trace!(yielding = correction != VoigtTensor::zero(), "von Mises return mapping");
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

impl Archive for VonMisesPlastic<f64> {
    const KIND: MaterialKind = MaterialKind::VonMises;

    fn write_fields<B: BufMut>(&self, buf: &mut B) {
        self.elastic.write_fields(buf);
        put_field(buf, self.elastic_yield);
        put_field(buf, self.plastic_yield);
        put_field(buf, self.flow_rate);
    }

    fn read_fields<B: Buf>(buf: &mut B) -> Result<Self, StrError> {
        let elastic = ElasticMaterial::<f64>::read_fields(buf)?;
        let elastic_yield = get_field(buf)?;
        let plastic_yield = get_field(buf)?;
        let flow_rate = get_field(buf)?;
        check_yields(elastic_yield, plastic_yield)?;
        check_flow_rate(flow_rate)?;
        Ok(VonMisesPlastic {
            elastic,
            elastic_yield,
            plastic_yield,
            flow_rate,
        })
    }
}

fn check_yields<T: RealField + Copy>(elastic_yield: T, plastic_yield: T) -> Result<(), StrError> {
    if !(elastic_yield > T::zero()) || !elastic_yield.is_finite() {
        return Err("elastic yield must be > 0");
    }
    if !(plastic_yield >= elastic_yield) {
        return Err("plastic yield must be ≥ elastic yield");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::VonMisesPlastic;
    use crate::base::VoigtTensor;
    use crate::codec::Archive;
    use crate::material::{ElasticMaterial, ElastoplasticTrait};
    use approx::assert_abs_diff_eq;

    const YOUNG: f64 = 1500.0; // G = 600
    const POISSON: f64 = 0.25;
    const Z0: f64 = 9.0;

    fn new_model() -> VonMisesPlastic {
        let elastic = ElasticMaterial::new(YOUNG, POISSON, 1.0).unwrap();
        VonMisesPlastic::new(elastic, Z0, 2.0 * Z0).unwrap()
    }

    /// Returns the shear strain εxy reaching the yield surface
    fn shear_strain_at_yield() -> f64 {
        Z0 / (1200.0 * f64::sqrt(3.0))
    }

    #[test]
    fn new_captures_errors() {
        let elastic = ElasticMaterial::default();
        assert_eq!(
            VonMisesPlastic::new(elastic, 0.0, 1.0).err(),
            Some("elastic yield must be > 0")
        );
        assert_eq!(
            VonMisesPlastic::new(elastic, 2.0, 1.0).err(),
            Some("plastic yield must be ≥ elastic yield")
        );
        VonMisesPlastic::new(elastic, 2.0, 2.0).unwrap();
    }

    #[test]
    fn default_works() {
        let model = VonMisesPlastic::<f64>::default();
        assert_eq!(model.elastic_yield(), 0.1);
        assert_eq!(model.plastic_yield(), 0.2);
        assert_eq!(model.flow_rate(), 1.0);
        assert_eq!(model.elastic().young(), 1e7);
    }

    #[test]
    fn setters_work_and_capture_errors() {
        let mut model = new_model();
        model.set_plastic_yield(30.0).unwrap();
        model.set_elastic_yield(20.0).unwrap();
        assert_eq!(model.elastic_yield(), 20.0);
        assert_eq!(model.plastic_yield(), 30.0);
        assert_eq!(
            model.set_elastic_yield(31.0).err(),
            Some("plastic yield must be ≥ elastic yield")
        );
        assert_eq!(
            model.set_plastic_yield(19.0).err(),
            Some("plastic yield must be ≥ elastic yield")
        );
        assert_eq!(model.set_elastic_yield(-1.0).err(), Some("elastic yield must be > 0"));
        assert_eq!(model.elastic_yield(), 20.0);
        assert_eq!(model.plastic_yield(), 30.0);
    }

    #[test]
    fn yield_function_works() {
        let mut model = new_model();
        model.set_elastic_yield(2.0).unwrap();
        model.set_plastic_yield(4.0).unwrap();
        let on_surface = VoigtTensor::new(2.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(model.yield_function(&on_surface), 0.0);
        assert!(model.yield_function(&(on_surface * 0.9)) < 0.0);
        assert!(model.yield_function(&(on_surface * 1.1)) > 0.0);

        // the hydrostatic part does not matter
        let shifted = on_surface + VoigtTensor::identity() * 100.0;
        assert_abs_diff_eq!(model.yield_function(&shifted), 0.0, epsilon = 1e-13);
    }

    #[test]
    fn fracture_check_works() {
        let model = new_model();
        let below = VoigtTensor::new(17.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let above = VoigtTensor::new(19.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(model.fracture_function(&below), -1.0);
        assert!(!model.is_fractured(&below));
        assert!(model.is_fractured(&above));
    }

    #[test]
    fn return_mapping_elastic_increment_gives_zero() {
        let model = new_model();
        let zero = VoigtTensor::zero();
        let eps = 0.5 * shear_strain_at_yield();
        let increment = VoigtTensor::new(0.0, 0.0, 0.0, eps, 0.0, 0.0);
        assert_eq!(model.return_mapping(&increment, &zero, &zero), zero);
        assert_eq!(model.plastic_strain_flow(&increment), zero);
    }

    #[test]
    fn return_mapping_projects_onto_the_yield_surface() {
        let model = new_model();
        let zero = VoigtTensor::zero();

        // pure shear with twice the yield strain: half of it becomes plastic
        let eps = 2.0 * shear_strain_at_yield();
        let increment = VoigtTensor::new(0.0, 0.0, 0.0, eps, 0.0, 0.0);
        let flow = model.return_mapping(&increment, &zero, &zero);
        assert_abs_diff_eq!(flow.xy(), 0.5 * eps, epsilon = 1e-15);
        assert_eq!(flow.xx(), 0.0);
        assert_eq!(flow.xz(), 0.0);
        let stress = model.elastic().compute_elastic_stress(&(increment - flow));
        assert_abs_diff_eq!(model.yield_function(&stress), 0.0, epsilon = 1e-12);

        // general strain with a volumetric part: the plastic strain is isochoric
        let last = VoigtTensor::new(0.001, -0.002, 0.003, 0.0, 0.004, -0.001);
        let increment = VoigtTensor::new(0.002, 0.0, -0.001, 0.003, 0.0, 0.0);
        let flow = model.return_mapping(&increment, &last, &zero);
        assert_abs_diff_eq!(flow.volumetric_part(), 0.0, epsilon = 1e-15);
        let stress = model.elastic().compute_elastic_stress(&(last + increment - flow));
        assert_abs_diff_eq!(model.yield_function(&stress), 0.0, epsilon = 1e-12);

        // the volumetric stress is preserved
        let trial = model.trial_stress(&increment, &last);
        assert_abs_diff_eq!(stress.invariant_i1(), trial.invariant_i1(), epsilon = 1e-12);
    }

    #[test]
    fn plastic_flow_is_parallel_to_the_deviatoric_stress() {
        let model = new_model();
        let strain = VoigtTensor::new(0.01, -0.004, 0.002, 0.003, -0.002, 0.001);
        let flow = model.plastic_strain_flow(&strain);
        let dev = model.elastic().compute_elastic_stress(&strain).deviatoric_part();
        let ratio = flow.xx() / dev.xx();
        assert!(ratio > 0.0);
        for i in 0..6 {
            assert_abs_diff_eq!(flow.vector()[i], ratio * dev.vector()[i], epsilon = 1e-15);
        }

        // same as the return mapping from a virgin state
        let zero = VoigtTensor::zero();
        assert_eq!(flow, model.return_mapping(&strain, &zero, &zero));
    }

    #[test]
    fn small_flow_rate_delays_the_projection() {
        let mut model = new_model();
        let zero = VoigtTensor::zero();
        let increment = VoigtTensor::new(0.0, 0.0, 0.0, 3.0 * shear_strain_at_yield(), 0.0, 0.0);
        let full = model.return_mapping(&increment, &zero, &zero);
        model.set_flow_rate(0.1).unwrap();
        let partial = model.return_mapping(&increment, &zero, &zero);
        assert_abs_diff_eq!(partial.xy(), 0.1 * full.xy(), epsilon = 1e-15);

        // the stress is still outside, but closer to the surface than the trial stress
        let f_trial = model.yield_function(&model.trial_stress(&increment, &zero));
        let stress = model.elastic().compute_elastic_stress(&(increment - partial));
        let f = model.yield_function(&stress);
        assert!(f > 0.0 && f < f_trial);
    }

    #[test]
    fn archive_round_trip_is_bit_identical() {
        let mut model = new_model();
        model.set_flow_rate(0.3).unwrap();
        let data = model.encode();
        assert_eq!(data.len(), 2 + 8 * 8);
        let read = VonMisesPlastic::<f64>::decode(&data).unwrap();
        assert_eq!(read, model);
        assert_eq!(read.flow_rate().to_bits(), 0.3f64.to_bits());

        let elastic = model.elastic().encode();
        assert_eq!(
            VonMisesPlastic::<f64>::decode(&elastic).err(),
            Some("archive holds a different material kind")
        );
    }
}
