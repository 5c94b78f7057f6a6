// Round trip of a solve through the text tables.

use std::{ fs, path::PathBuf };
use fdtise::{
    output,
    potential::Harmonic,
    solve::Params,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("fdtise-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn read_table(path: &PathBuf) -> (Vec<String>, Vec<Vec<f64>>) {
    let text = fs::read_to_string(path).unwrap();
    let (header, body): (Vec<&str>, Vec<&str>)
        = text.lines().partition(|line| line.starts_with('#'));
    let rows = body.into_iter()
        .map(|line| {
            line.split_whitespace().map(|tok| tok.parse::<f64>().unwrap()).collect()
        })
        .collect();
    (header.into_iter().map(String::from).collect(), rows)
}

#[test]
fn eigenstate_tables() {
    let params = Params { n: 500, ..Params::default() };
    let states = params.solve(&Harmonic::default()).unwrap();
    let dir = scratch_dir("tables");
    let paths = output::write_eigenstates(&dir, "qho", &states).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("qho_wavefunctions.txt"));

    let (header, rows) = read_table(&paths[0]);
    assert!(!header.is_empty());
    assert_eq!(rows.len(), 500);
    assert!(rows.iter().all(|row| row.len() == 1 + states.len()));
    assert!((rows[0][0] + 100.0).abs() < 1e-9);
    assert!((rows[499][0] - 100.0).abs() < 1e-9);
    let dx = states.get_dx();
    for j in 0..states.len() {
        let norm: f64 = rows.iter().map(|row| row[j + 1].powi(2)).sum::<f64>() * dx;
        assert!((norm - 1.0).abs() < 1e-6, "state {j}: norm {norm}");
    }

    let (_, rows) = read_table(&paths[1]);
    assert_eq!(rows.len(), states.len());
    for (row, e) in rows.iter().zip(states.get_energies()) {
        assert!((row[1] - e).abs() < 1e-12 * e.abs().max(1.0));
    }

    let (_, rows) = read_table(&paths[2]);
    assert_eq!(rows.len(), 500);
    assert!(rows.iter().all(|row| row.len() == 2 && row[1] >= 0.0));

    fs::remove_dir_all(&dir).unwrap();
}
