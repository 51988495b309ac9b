use conmat::prelude::*;
use conmat::StrError;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "conmat_path",
    about = "Runs a strain path through an elastoplastic material and prints the response"
)]
struct Options {
    /// JSON file with the material parameters (overrides --sample)
    #[structopt(long)]
    param: Option<String>,

    /// Name of the sample parameters: steel, sand, or clay
    #[structopt(long, default_value = "steel")]
    sample: String,

    /// Number of strain increments
    #[structopt(short = "n", long, default_value = "10")]
    steps: usize,

    /// Strain increment in Voigt notation: xx yy zz xy xz yz (default: simple shear)
    #[structopt(long, number_of_values = 6, allow_hyphen_values = true)]
    deps: Vec<f64>,
}

fn main() -> Result<(), StrError> {
    // logging (RUST_LOG=conmat=debug shows the return-mapping branches)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // parse options
    let options = Options::from_args();
    let d = match options.deps.len() {
        0 => vec![0.0, 0.0, 0.0, 1e-3, 0.0, 0.0],
        6 => options.deps.clone(),
        _ => return Err("the strain increment must have 6 components"),
    };

    // load parameters
    let param = match &options.param {
        Some(path) => ParamSolid::read_json(path)?,
        None => SampleParams::by_name(&options.sample).ok_or("unknown sample name")?,
    };
    let model = PlasticModel::new(&param)?;
    tracing::info!(plasticity = ?param.plasticity, steps = options.steps, "running strain path");

    // run path
    let delta = VoigtTensor::new(d[0], d[1], d[2], d[3], d[4], d[5]);
    let mut state = LocalState::new();
    println!(
        "{:>5} {:>15} {:>15} {:>15} {:>15} {:>8}",
        "step", "σ_eq", "I1", "f", "εp_eq", "loading"
    );
    for step in 1..=options.steps {
        let last_plastic_strain = state.plastic_strain;
        state.update(model.actual.as_ref(), &delta);
        println!(
            "{:>5} {:>15.6e} {:>15.6e} {:>15.6e} {:>15.6e} {:>8}",
            step,
            state.stress.equivalent_von_mises(),
            state.stress.invariant_i1(),
            model.actual.yield_function_current(&state.stress, &last_plastic_strain),
            state.plastic_strain.equivalent_von_mises(),
            state.loading,
        );
    }
    Ok(())
}
