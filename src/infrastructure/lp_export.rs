// CPLEX LP text export of a LinearProgram

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::domain::{
    models::LinearProgram,
    solver_service::{KnapsackError, Result},
    value_objects::{RowSense, VariableType},
};

/// Write `program` in CPLEX LP format. Columns are named `x0, x1, ...`;
/// unnamed rows become `r0, r1, ...`.
pub fn write_lp<W: Write>(program: &LinearProgram, out: &mut W) -> io::Result<()> {
    if !program.name.is_empty() {
        writeln!(out, "\\ {}", program.name)?;
    }

    writeln!(out, "Maximize")?;
    let objective: Vec<(usize, f64)> = program.objective.iter().copied().enumerate().collect();
    writeln!(out, " obj: {}", expression(&objective))?;

    writeln!(out, "Subject To")?;
    for (i, row) in program.rows.iter().enumerate() {
        let op = match row.sense {
            RowSense::AtMost => "<=",
            RowSense::AtLeast => ">=",
        };
        let name = if row.name.is_empty() {
            format!("r{}", i)
        } else {
            row.name.clone()
        };
        writeln!(out, " {}: {} {} {}", name, expression(&row.terms), op, row.bound)?;
    }

    let (binaries, continuous): (Vec<usize>, Vec<usize>) = (0..program.num_variables())
        .partition(|&i| program.variable_types[i] == VariableType::Binary);

    if !continuous.is_empty() {
        writeln!(out, "Bounds")?;
        for i in continuous {
            writeln!(out, " 0 <= x{} <= 1", i)?;
        }
    }
    if !binaries.is_empty() {
        writeln!(out, "Binaries")?;
        let names: Vec<String> = binaries.iter().map(|i| format!("x{}", i)).collect();
        writeln!(out, " {}", names.join(" "))?;
    }

    writeln!(out, "End")
}

/// Export `program` to a file, creating its directory if needed.
pub fn export_lp(program: &LinearProgram, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| KnapsackError::io(dir, e))?;
    }

    let file = File::create(path).map_err(|e| KnapsackError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_lp(program, &mut out)
        .and_then(|_| out.flush())
        .map_err(|e| KnapsackError::io(path, e))?;

    log::info!("wrote LP model '{}' to {}", program.name, path.display());
    Ok(())
}

fn expression(terms: &[(usize, f64)]) -> String {
    let mut text = String::new();
    for &(i, coeff) in terms.iter().filter(|(_, coeff)| *coeff != 0.0) {
        if text.is_empty() {
            if coeff < 0.0 {
                text.push_str("- ");
            }
        } else {
            text.push_str(if coeff < 0.0 { " - " } else { " + " });
        }
        text.push_str(&format!("{} x{}", coeff.abs(), i));
    }
    if text.is_empty() {
        // LP format needs at least one term
        text.push_str("0 x0");
    }
    text
}
