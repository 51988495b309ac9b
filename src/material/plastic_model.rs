use super::{DruckerPragerPlastic, ElasticMaterial, ElastoplasticTrait, VonMisesPlastic};
use crate::base::{ParamPlasticity, ParamSolid};
use crate::StrError;

/// Holds the actual elastoplastic model implementation
pub struct PlasticModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn ElastoplasticTrait>,
}

impl PlasticModel {
    /// Allocates a new instance
    pub fn new(param: &ParamSolid) -> Result<Self, StrError> {
        let elastic = ElasticMaterial::new(param.young, param.poisson, param.density)?;
        let actual: Box<dyn ElastoplasticTrait> = match param.plasticity {
            // Hookean material only
            ParamPlasticity::Elastic => return Err("elastic parameters cannot be used with a plastic model"),

            // von Mises plasticity model
            ParamPlasticity::VonMises {
                elastic_yield,
                plastic_yield,
                flow_rate,
            } => {
                let mut model = VonMisesPlastic::new(elastic, elastic_yield, plastic_yield)?;
                model.set_flow_rate(flow_rate)?;
                Box::new(model)
            }

            // Drucker-Prager plasticity model
            ParamPlasticity::DruckerPrager {
                elastic_yield,
                alpha,
                dilatancy,
                hardening_speed,
                hardening_limit,
                flow_rate,
            } => {
                let mut model = DruckerPragerPlastic::new(elastic, elastic_yield, alpha, dilatancy)?;
                model.set_hardening_speed(hardening_speed)?;
                model.set_hardening_limit(hardening_limit)?;
                model.set_flow_rate(flow_rate)?;
                Box::new(model)
            }

            // Drucker-Prager cone fitted to the Mohr-Coulomb surface
            ParamPlasticity::MohrCoulomb {
                phi,
                cohesion,
                inner_approx,
                dilatancy,
                hardening_speed,
                hardening_limit,
                flow_rate,
            } => {
                let mut model = DruckerPragerPlastic::new(elastic, 0.0, 0.0, dilatancy)?;
                model.set_from_mohr_coulomb(phi, cohesion, inner_approx)?;
                let limit = hardening_limit.unwrap_or(model.elastic_yield());
                model.set_hardening_speed(hardening_speed)?;
                model.set_hardening_limit(limit)?;
                model.set_flow_rate(flow_rate)?;
                Box::new(model)
            }
        };
        tracing::debug!(plasticity = ?param.plasticity, "allocated plastic model");
        Ok(PlasticModel { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::PlasticModel;
    use crate::base::{ParamPlasticity, SampleParams, VoigtTensor};
    use approx::assert_abs_diff_eq;

    #[test]
    fn new_captures_errors() {
        let rubber = SampleParams::param_rubber();
        assert_eq!(
            PlasticModel::new(&rubber).err(),
            Some("elastic parameters cannot be used with a plastic model")
        );

        let mut steel = SampleParams::param_steel();
        steel.poisson = 0.5;
        assert_eq!(PlasticModel::new(&steel).err(), Some("poisson must be in (-1, 0.5)"));

        let mut steel = SampleParams::param_steel();
        steel.plasticity = ParamPlasticity::VonMises {
            elastic_yield: 250e6,
            plastic_yield: 400e6,
            flow_rate: 0.0,
        };
        assert_eq!(PlasticModel::new(&steel).err(), Some("flow rate must be > 0"));

        let mut sand = SampleParams::param_sand();
        sand.plasticity = ParamPlasticity::DruckerPrager {
            elastic_yield: 2e4,
            alpha: 0.2,
            dilatancy: 0.05,
            hardening_speed: -1.0,
            hardening_limit: 4e4,
            flow_rate: 1.0,
        };
        assert_eq!(PlasticModel::new(&sand).err(), Some("hardening speed must be ≥ 0"));

        let mut clay = SampleParams::param_clay();
        clay.plasticity = ParamPlasticity::MohrCoulomb {
            phi: 0.0,
            cohesion: 1e4,
            inner_approx: true,
            dilatancy: 0.0,
            hardening_speed: 0.0,
            hardening_limit: None,
            flow_rate: 1.0,
        };
        assert_eq!(PlasticModel::new(&clay).err(), Some("phi must be in (0, π/2)"));
    }

    #[test]
    fn new_works() {
        for param in [
            SampleParams::param_steel(),
            SampleParams::param_sand(),
            SampleParams::param_clay(),
        ] {
            let model = PlasticModel::new(&param).unwrap();
            assert_eq!(model.actual.elastic().young(), param.young);
            assert_eq!(model.actual.elastic().poisson(), param.poisson);
            assert_eq!(model.actual.elastic().density(), param.density);
            assert_eq!(model.actual.flow_rate(), 1.0);
            assert!(model.actual.admissible(&VoigtTensor::zero()));
        }
    }

    #[test]
    fn mohr_coulomb_yield_matches_the_fitted_cone() {
        let param = SampleParams::param_clay();
        let model = PlasticModel::new(&param).unwrap();
        let phi = f64::to_radians(25.0);
        let den = f64::sqrt(3.0) * (3.0 + f64::sin(phi));
        let k = 6.0 * 1e4 * f64::cos(phi) / den;
        // pure shear stress with √J2 = k lies on the cone
        let stress = VoigtTensor::new(0.0, 0.0, 0.0, k, 0.0, 0.0);
        assert_abs_diff_eq!(model.actual.yield_function(&stress), 0.0, epsilon = 1e-9);
    }
}
