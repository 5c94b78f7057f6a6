use std::path::PathBuf;
use anyhow::Context;
use clap::{ Parser, ValueEnum };
use log::info;
use rayon::prelude::*;
use fdtise::{
    hamiltonian::Stencil,
    output::{ self, BenchRow },
    potential::{ FiniteWell, Harmonic, Potential },
    solve::{ self, SolverConfig, XResult },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Harmonic oscillator, ħω = 10 meV
    Qho,
    /// Finite square well, 5 eV deep and 10 Å wide
    Well,
}

impl Kind {
    fn build(self) -> Box<dyn Potential + Send + Sync> {
        match self {
            Self::Qho => Box::new(Harmonic::default()),
            Self::Well => Box::new(FiniteWell::default()),
        }
    }
}

fn parse_stencil(s: &str) -> Result<Stencil, String> {
    match s {
        "3" => Ok(Stencil::ThreePoint),
        "5" => Ok(Stencil::FivePoint),
        _ => Err(format!("stencil must be 3 or 5; got {s}")),
    }
}

/// Time the solver over a sweep of grid sizes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Potential to solve for.
    #[arg(long, value_enum, default_value_t = Kind::Qho)]
    potential: Kind,

    /// Finite-difference stencil (3 or 5 points).
    #[arg(long, default_value = "3", value_parser = parse_stencil)]
    stencil: Stencil,

    /// Box length (Å).
    #[arg(short, long, default_value_t = 200.0)]
    l: f64,

    /// Smallest grid size in the sweep.
    #[arg(long, default_value_t = 10)]
    n_min: usize,

    /// Upper bound on grid sizes in the sweep (exclusive).
    #[arg(long, default_value_t = 5000)]
    n_max: usize,

    /// Grid size step.
    #[arg(long, default_value_t = 50)]
    n_step: usize,

    /// Number of eigenstates computed at each grid size.
    #[arg(short, long, default_value_t = 5)]
    eigenstates: usize,

    /// Solve different grid sizes in parallel.
    ///
    /// Timings then include contention between threads.
    #[arg(long)]
    parallel: bool,

    /// Output file.
    #[arg(short, long, default_value = "output/benchmark.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();
    let args = Args::parse();
    anyhow::ensure!(args.n_step > 0, "grid size step must be positive");

    let potential = args.potential.build();
    let config = SolverConfig::default();
    let run = |n: usize| -> XResult<BenchRow> {
        let states = solve::solve_with(
            args.l, n, potential.as_ref(), args.eigenstates, args.stencil, config)?;
        let e0 = states.ground_energy().unwrap_or(f64::NAN);
        info!("N = {n:>5}: {:.4e} s, E0 = {e0:.8} eV", states.elapsed_secs());
        Ok(BenchRow { n, seconds: states.elapsed_secs(), e0 })
    };

    let sizes: Vec<usize> = (args.n_min..args.n_max).step_by(args.n_step).collect();
    let rows: Vec<BenchRow>
        = if args.parallel {
            sizes.par_iter().map(|&n| run(n)).collect::<XResult<_>>()?
        } else {
            sizes.iter().map(|&n| run(n)).collect::<XResult<_>>()?
        };

    let label = format!(
        "{:?}, {:?}, l = {} A, {} states{}",
        args.potential,
        args.stencil,
        args.l,
        args.eigenstates,
        if args.parallel { ", parallel" } else { "" },
    );
    let mut out = output::create(&args.output)
        .with_context(|| format!("couldn't create {}", args.output.display()))?;
    output::write_benchmark(&mut out, &label, &rows)?;
    std::io::Write::flush(&mut out)?;
    info!("wrote {} rows to {}", rows.len(), args.output.display());
    Ok(())
}
