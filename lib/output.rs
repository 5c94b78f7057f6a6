//! Whitespace-delimited text tables for solver results.
//!
//! Every table starts with one or more `#`-prefixed header lines followed by
//! one row per line, so that they can be read back with any loader that skips
//! comments.
//!
//! ```
//! use ndarray as nd;
//! use fdtise::output::write_energies;
//!
//! let mut buf: Vec<u8> = Vec::new();
//! write_energies(&mut buf, &nd::array![0.005, 0.015]).unwrap();
//! let text = String::from_utf8(buf).unwrap();
//! assert!(text.starts_with('#'));
//! assert_eq!(text.lines().filter(|l| !l.starts_with('#')).count(), 2);
//! ```

use std::{
    fs,
    io::{ BufWriter, Write },
    path::{ Path, PathBuf },
};
use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    error::{ LengthError, WriteError },
    solve::Eigenstates,
};

pub type WriteResult<T> = Result<T, WriteError>;

/// A single point in a grid-resolution sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BenchRow {
    /// Number of grid points.
    pub n: usize,
    /// Time spent in the solve, in seconds.
    pub seconds: f64,
    /// Ground-state energy (eV).
    pub e0: f64,
}

/// Write a wavefunction table with columns `x ψ₀ … ψₖ₋₁`.
///
/// `wfs` holds one state per row, as in [`Eigenstates::get_wfs`].
pub fn write_wavefunctions<W, S, T>(out: &mut W, x: &Arr1<S>, wfs: &Arr2<T>)
    -> WriteResult<()>
where
    W: Write,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    if wfs.ncols() != x.len() {
        return Err(WriteError::Shape { rows: wfs.ncols(), cols: x.len() });
    }
    writeln!(out, "# wavefunctions, normalized to sum(psi^2) dx = 1")?;
    write!(out, "# x[A]")?;
    for j in 0..wfs.nrows() {
        write!(out, " psi_{j}")?;
    }
    writeln!(out)?;
    for (i, xi) in x.iter().enumerate() {
        write!(out, "{xi:.12e}")?;
        for qj in wfs.column(i).iter() {
            write!(out, " {qj:.12e}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write an energy table with columns `n E_n`.
pub fn write_energies<W, S>(out: &mut W, energies: &Arr1<S>) -> WriteResult<()>
where
    W: Write,
    S: nd::Data<Elem = f64>,
{
    writeln!(out, "# n E[eV]")?;
    for (n, e) in energies.iter().enumerate() {
        writeln!(out, "{n} {e:.12e}")?;
    }
    Ok(())
}

/// Write a potential table with columns `x V(x)`.
pub fn write_potential<W, S, T>(out: &mut W, x: &Arr1<S>, V: &Arr1<T>)
    -> WriteResult<()>
where
    W: Write,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(x, V)?;
    writeln!(out, "# x[A] V[eV]")?;
    for (xi, Vi) in x.iter().zip(V) {
        writeln!(out, "{xi:.12e} {Vi:.12e}")?;
    }
    Ok(())
}

/// Write a benchmark table with columns `N seconds E0`.
pub fn write_benchmark<W>(out: &mut W, label: &str, rows: &[BenchRow])
    -> WriteResult<()>
where W: Write
{
    writeln!(out, "# {label}")?;
    writeln!(out, "# N time[s] E0[eV]")?;
    for BenchRow { n, seconds, e0 } in rows.iter() {
        writeln!(out, "{n} {seconds:.6e} {e0:.12e}")?;
    }
    Ok(())
}

/// Create (or truncate) a file and wrap it in a buffered writer.
pub fn create<P>(path: P) -> WriteResult<BufWriter<fs::File>>
where P: AsRef<Path>
{
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(fs::File::create(path)?))
}

/// Write the wavefunction, energy, and potential tables of a solve into
/// `outdir` as `{prefix}_wavefunctions.txt`, `{prefix}_energies.txt`, and
/// `{prefix}_potential.txt`, returning the paths written.
pub fn write_eigenstates<P>(outdir: P, prefix: &str, states: &Eigenstates)
    -> WriteResult<Vec<PathBuf>>
where P: AsRef<Path>
{
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir)?;

    let wf_path = outdir.join(format!("{prefix}_wavefunctions.txt"));
    let mut out = create(&wf_path)?;
    write_wavefunctions(&mut out, states.get_x(), states.get_wfs())?;
    out.flush()?;

    let e_path = outdir.join(format!("{prefix}_energies.txt"));
    let mut out = create(&e_path)?;
    write_energies(&mut out, states.get_energies())?;
    out.flush()?;

    let v_path = outdir.join(format!("{prefix}_potential.txt"));
    let mut out = create(&v_path)?;
    write_potential(&mut out, states.get_x(), states.get_V())?;
    out.flush()?;

    Ok(vec![wf_path, e_path, v_path])
}
