use eyre::{Result, bail};
use hyperclifford::{Algebra, Blade, Multivector, Signature, StructureConstant, TableEntry};
use itertools::Itertools;
use serde::Serialize;

/// Maximum number of failures to print for each signature.
const MAX_REPORTED_FAILURES: usize = 10;
/// Number of basis vectors above which `verify` warns that it will be slow.
const SLOW_VERIFY_NDIM: u8 = 8;

/// Clifford algebra Cayley table inspector
///
/// Signatures may be written as `Cl(p,n,z)`, `Cl(p,n)`, `p,n,z`, `p,n`, or a
/// name such as `pga3d` (see the `signatures` subcommand).
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the Cayley table of an algebra.
    Table {
        /// Signature of the algebra.
        signature: Signature,
        /// Order rows and columns by grade instead of by bitmask.
        #[arg(short, long)]
        natural: bool,
        /// Print JSON instead of a grid.
        #[arg(long)]
        json: bool,
    },
    /// Print the sign of the Poincaré dual of each blade, in natural order.
    Duals {
        /// Signature of the algebra.
        signature: Signature,
        /// Print JSON instead of a list.
        #[arg(long)]
        json: bool,
    },
    /// Check the identity, associativity, and regressive product laws.
    ///
    /// Associativity is checked on every triple of basis blades, which takes
    /// 8^n table lookups for n basis vectors.
    Verify {
        /// Signatures to check.
        #[arg(required = true)]
        signatures: Vec<Signature>,
    },
    /// Print all named signatures.
    Signatures,
}

#[derive(Serialize, Debug)]
struct TableOutput {
    signature: Signature,
    blades: Vec<String>,
    /// Rows indexed by left operand, columns by right operand.
    entries: Vec<Vec<EntryOutput>>,
}

#[derive(Serialize, Debug)]
struct EntryOutput {
    blade: String,
    bits: u64,
    constant: i8,
}
impl From<TableEntry> for EntryOutput {
    fn from(entry: TableEntry) -> Self {
        Self {
            blade: entry.result_blade.to_string(),
            bits: entry.result_blade.bits(),
            constant: entry.structure_constant.to_i8(),
        }
    }
}

#[derive(Serialize, Debug)]
struct DualsOutput {
    signature: Signature,
    blades: Vec<String>,
    /// Sign applied to the coefficient of each blade in the output of the dual.
    signs: Vec<i8>,
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Table {
            signature,
            natural,
            json,
        } => {
            let algebra = Algebra::cached(signature)?;
            let table = algebra.table();
            let blades = if natural {
                algebra.natural_order().as_slice().to_vec()
            } else {
                algebra.blades().collect()
            };

            if json {
                write_json_output(&TableOutput {
                    signature,
                    blades: blades.iter().map(|b| b.to_string()).collect(),
                    entries: blades
                        .iter()
                        .map(|&lhs| {
                            blades
                                .iter()
                                .map(|&rhs| EntryOutput::from(table.entry(lhs, rhs)))
                                .collect()
                        })
                        .collect(),
                })
            } else {
                if natural {
                    print!("{}", table.display_ordered(algebra.natural_order()));
                } else {
                    print!("{table}");
                }
                Ok(())
            }
        }

        Subcommand::Duals { signature, json } => {
            let algebra = Algebra::cached(signature)?;

            if json {
                write_json_output(&DualsOutput {
                    signature,
                    blades: algebra.natural_order().iter().map(|b| b.to_string()).collect(),
                    signs: algebra.dual_signs().natural_signs().iter().map(|s| s.to_i8()).collect(),
                })
            } else {
                print!("{}", format_duals(&algebra));
                Ok(())
            }
        }

        Subcommand::Verify { signatures } => {
            let mut failed = vec![];
            for signature in signatures {
                log::info!("verifying {signature}");
                let failures = verify(signature)?;
                if failures.is_empty() {
                    println!("{signature}: ok");
                } else {
                    println!("{signature}: {} failures", failures.len());
                    for failure in failures.iter().take(MAX_REPORTED_FAILURES) {
                        println!("  {failure}");
                    }
                    failed.push(signature);
                }
            }
            if !failed.is_empty() {
                bail!("verification failed for {}", failed.iter().join(", "));
            }
            Ok(())
        }

        Subcommand::Signatures => {
            for (name, signature) in Signature::NAMED {
                println!("{name:<16}{signature}");
            }
            Ok(())
        }
    }
}

/// Checks algebra laws on every combination of basis blades, returning a
/// description of each violation.
fn verify(signature: Signature) -> Result<Vec<String>> {
    let algebra = Algebra::cached(signature)?;
    let table = algebra.table();
    let mut failures = vec![];

    if algebra.ndim() > SLOW_VERIFY_NDIM {
        log::warn!(
            "verifying {signature} checks {} blade triples; this may take a while",
            algebra.blade_count().pow(3),
        );
    }

    for blade in algebra.blades() {
        for (lhs, rhs) in [(Blade::SCALAR, blade), (blade, Blade::SCALAR)] {
            let entry = table.entry(lhs, rhs);
            if entry.result_blade != blade || entry.structure_constant != StructureConstant::Pos {
                failures.push(format!("{lhs} * {rhs} = {entry}, expected {blade}"));
            }
        }
    }

    for (a, b, c) in itertools::iproduct!(algebra.blades(), algebra.blades(), algebra.blades()) {
        let ab = table.entry(a, b);
        let ab_c = table.entry(ab.result_blade, c);
        let bc = table.entry(b, c);
        let a_bc = table.entry(a, bc.result_blade);
        let lhs_constant = ab.structure_constant * ab_c.structure_constant;
        let rhs_constant = bc.structure_constant * a_bc.structure_constant;
        if ab_c.result_blade != a_bc.result_blade || lhs_constant != rhs_constant {
            failures.push(format!("({a} {b}) {c} is not {a} ({b} {c})"));
        }
    }

    for (a, b) in itertools::iproduct!(algebra.blades(), algebra.blades()) {
        let a = Multivector::<i64>::from_blade(&algebra, a, 1)?;
        let b = Multivector::<i64>::from_blade(&algebra, b, 1)?;
        let regressive = &a & &b;
        let expected = !((!&a) ^ (!&b));
        if regressive != expected {
            failures.push(format!("{a} ∨ {b} = {regressive}, expected {expected}"));
        }
    }

    Ok(failures)
}

/// Renders each blade and its dual in natural order, one per line.
fn format_duals(algebra: &Algebra) -> String {
    let ndim = algebra.ndim();
    let blades = algebra.natural_order().iter().collect_vec();
    let width = blades
        .iter()
        .map(|b| b.to_string().chars().count())
        .max()
        .unwrap_or(0);
    blades
        .iter()
        .map(|&blade| {
            let sign = algebra.dual_signs().complement_sign(blade);
            let complement = blade.complement(ndim);
            format!("{:>width$} -> {sign}{complement}\n", blade.to_string())
        })
        .collect()
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    println!();
    Ok(())
}
