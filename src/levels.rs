use std::path::PathBuf;
use clap::{ Parser, ValueEnum };
use log::{ info, warn };
use fdtise::{
    hamiltonian::Stencil,
    output,
    potential::{ FiniteWell, Harmonic, Potential },
    solve::{ Params, SolverConfig },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Harmonic oscillator
    Qho,
    /// Finite square well
    Well,
}

impl Kind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Qho => "qho",
            Self::Well => "well",
        }
    }
}

/// Compute the lowest eigenstates of a single potential and write them to
/// disk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Potential to solve for.
    #[arg(long, value_enum, default_value_t = Kind::Qho)]
    potential: Kind,

    /// Use the five-point stencil instead of the three-point one.
    #[arg(long)]
    five_point: bool,

    /// Box length (Å).
    #[arg(short, long, default_value_t = 200.0)]
    l: f64,

    /// Number of grid points.
    #[arg(short, long, default_value_t = 2000)]
    n: usize,

    /// Number of eigenstates.
    #[arg(short, long, default_value_t = 5)]
    eigenstates: usize,

    /// Oscillator quantum ħω (eV).
    #[arg(long, default_value_t = 10e-3)]
    hbar_omega: f64,

    /// Well depth (eV).
    #[arg(long, default_value_t = 5.0)]
    height: f64,

    /// Well width (Å).
    #[arg(long, default_value_t = 10.0)]
    width: f64,

    /// Normalization tolerance.
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,

    /// Output directory.
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();
    let args = Args::parse();

    let potential: Box<dyn Potential>
        = match args.potential {
            Kind::Qho => Box::new(Harmonic::new(args.hbar_omega)),
            Kind::Well => Box::new(FiniteWell::new(args.height, args.width)),
        };
    let params = Params {
        l: args.l,
        n: args.n,
        eigenstates: args.eigenstates,
        stencil: Stencil::from_five_point(args.five_point),
    };
    let config = SolverConfig { epsilon: Some(args.epsilon), maxiters: None };
    let states = params.solve_with(potential.as_ref(), config)?;
    info!(
        "solved {} states on {} points in {:.4e} s ({:?})",
        states.len(),
        args.n,
        states.elapsed_secs(),
        states.get_method(),
    );

    let norm_errors = states.norm_errors();
    for (j, sol) in states.solutions().iter().enumerate() {
        let tps = states.turning_points(j)?;
        let tps_str = match (tps.first(), tps.last()) {
            (Some(a), Some(b)) => format!("[{a:.4}, {b:.4}] A"),
            _ => "none".to_string(),
        };
        info!(
            "E_{j} = {:.10} eV; |norm - 1| = {:.2e}; turning points {tps_str}",
            sol.e, norm_errors[j],
        );
    }
    if !states.all_normalized() {
        warn!("one or more wavefunctions failed the normalization check");
    }

    let paths = output::write_eigenstates(&args.outdir, args.potential.prefix(), &states)?;
    for path in paths.iter() {
        info!("wrote {}", path.display());
    }
    Ok(())
}
