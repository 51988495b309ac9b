use approx::assert_abs_diff_eq;
use conmat::prelude::*;
use conmat::StrError;

// Drucker-Prager plasticity with exponential hardening
//
// TEST GOAL
//
// Verifies that the yield term saturates at the hardening limit without overshoot
// while the stress point stays on the current (hardened) cone.
//
// CONFIGURATION AND PARAMETERS
//
// * Sample sand parameters: E = 5e7, ν = 0.3
// * Elastic yield: k₀ = 2e4, hardening limit: k∞ = 4e4, hardening speed: 1e-3
// * Friction: α = 0.2, dilatancy: β = 0.05 (non-associated flow)
// * 100 simple-shear increments Δε_xy = 1e-4

const N_STEPS: usize = 100;

#[test]
fn test_drucker_prager_hardening() -> Result<(), StrError> {
    // model
    let param = SampleParams::param_sand();
    let (k0, alpha, dilatancy, speed, limit) = match param.plasticity {
        ParamPlasticity::DruckerPrager {
            elastic_yield,
            alpha,
            dilatancy,
            hardening_speed,
            hardening_limit,
            ..
        } => (elastic_yield, alpha, dilatancy, hardening_speed, hardening_limit),
        _ => return Err("sand must be a Drucker-Prager material"),
    };
    let elastic = ElasticMaterial::new(param.young, param.poisson, param.density)?;
    let mut model = DruckerPragerPlastic::new(elastic, k0, alpha, dilatancy)?;
    model.set_hardening_speed(speed)?;
    model.set_hardening_limit(limit)?;

    // run
    let mut state = LocalState::<f64>::new();
    let delta = VoigtTensor::new(0.0, 0.0, 0.0, 1e-4, 0.0, 0.0);
    let mut previous_k = k0;
    let mut n_loading = 0;
    for _ in 0..N_STEPS {
        let kappa = state.plastic_strain.equivalent_von_mises();
        state.update(&model, &delta);
        if state.loading {
            n_loading += 1;
            let f = model.yield_function_hardened(&state.stress, kappa);
            assert_abs_diff_eq!(f, 0.0, epsilon = 1e-8);
        }
        let k = model.hardened_yield(state.plastic_strain.equivalent_von_mises());
        assert!(k >= previous_k);
        assert!(k <= limit);
        previous_k = k;
    }
    assert!(n_loading > N_STEPS / 2);
    assert_abs_diff_eq!(previous_k, limit, epsilon = 1e-6 * limit);

    // non-associated flow: dilation with β > 0 compresses the elastic volume
    assert!(state.plastic_strain.volumetric_part() > 0.0);
    assert!(state.stress.invariant_i1() < 0.0);

    // the same model through the factory gives the same path
    let boxed = PlasticModel::new(&param)?;
    let mut other = LocalState::<f64>::new();
    for _ in 0..N_STEPS {
        other.update(boxed.actual.as_ref(), &delta);
    }
    assert_eq!(other, state);
    Ok(())
}
