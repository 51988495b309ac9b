use super::{ParamPlasticity, ParamSolid};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a Hookean rubber-like solid (SI units)
    pub fn param_rubber() -> ParamSolid {
        ParamSolid {
            density: 1000.0, // kg/m³
            young: 1e7,      // Pa
            poisson: 0.4,
            plasticity: ParamPlasticity::Elastic,
        }
    }

    /// Returns sample parameters for a steel-like von Mises solid (SI units)
    pub fn param_steel() -> ParamSolid {
        ParamSolid {
            density: 7850.0, // kg/m³
            young: 210e9,    // Pa
            poisson: 0.3,
            plasticity: ParamPlasticity::VonMises {
                elastic_yield: 250e6, // Pa
                plastic_yield: 400e6, // Pa
                flow_rate: 1.0,
            },
        }
    }

    /// Returns sample parameters for a sand-like Drucker-Prager solid with hardening (SI units)
    pub fn param_sand() -> ParamSolid {
        ParamSolid {
            density: 1600.0, // kg/m³
            young: 5e7,      // Pa
            poisson: 0.3,
            plasticity: ParamPlasticity::DruckerPrager {
                elastic_yield: 2e4, // Pa
                alpha: 0.2,
                dilatancy: 0.05,
                hardening_speed: 1e-3,
                hardening_limit: 4e4, // Pa
                flow_rate: 1.0,
            },
        }
    }

    /// Returns sample parameters for a clay-like solid fitted to Mohr-Coulomb (SI units)
    pub fn param_clay() -> ParamSolid {
        ParamSolid {
            density: 1800.0, // kg/m³
            young: 2e7,      // Pa
            poisson: 0.35,
            plasticity: ParamPlasticity::MohrCoulomb {
                phi: f64::to_radians(25.0),
                cohesion: 1e4, // Pa
                inner_approx: true,
                dilatancy: 0.0,
                hardening_speed: 0.0,
                hardening_limit: None,
                flow_rate: 1.0,
            },
        }
    }

    /// Returns sample parameters given a name (rubber, steel, sand, or clay)
    pub fn by_name(name: &str) -> Option<ParamSolid> {
        match name {
            "rubber" => Some(SampleParams::param_rubber()),
            "steel" => Some(SampleParams::param_steel()),
            "sand" => Some(SampleParams::param_sand()),
            "clay" => Some(SampleParams::param_clay()),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
