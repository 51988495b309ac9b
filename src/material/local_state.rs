use super::ElastoplasticTrait;
use crate::base::VoigtTensor;
use nalgebra::RealField;

/// Holds the strain history of one integration point
///
/// The material models are stateless; this structure carries the data they need between calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalState<T: RealField + Copy = f64> {
    /// Holds the elastic strain tensor ε_e
    pub elastic_strain: VoigtTensor<T>,

    /// Holds the plastic strain tensor ε_p
    pub plastic_strain: VoigtTensor<T>,

    /// Holds the stress tensor σ = C : ε_e
    pub stress: VoigtTensor<T>,

    /// Holds the elastoplastic loading (vs elastic) flag of the last update
    pub loading: bool,
}

impl<T: RealField + Copy> LocalState<T> {
    /// Allocates a new instance with zero strains and stress
    pub fn new() -> Self {
        LocalState {
            elastic_strain: VoigtTensor::zero(),
            plastic_strain: VoigtTensor::zero(),
            stress: VoigtTensor::zero(),
            loading: false,
        }
    }

    /// Updates strains and stress given the total strain increment
    pub fn update(&mut self, model: &dyn ElastoplasticTrait<T>, delta_strain: &VoigtTensor<T>) {
        let flow = model.return_mapping(delta_strain, &self.elastic_strain, &self.plastic_strain);
        self.plastic_strain += flow;
        self.elastic_strain += *delta_strain - flow;
        self.stress = model.elastic().compute_elastic_stress(&self.elastic_strain);
        self.loading = flow != VoigtTensor::zero();
    }

    /// Returns the total strain ε = ε_e + ε_p
    pub fn total_strain(&self) -> VoigtTensor<T> {
        self.elastic_strain + self.plastic_strain
    }
}

impl<T: RealField + Copy> Default for LocalState<T> {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
