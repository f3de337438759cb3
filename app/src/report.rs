// In app/src/report.rs

use core_types::{Signal, SignalOutput};

/// Per-file counts printed by the `batch` command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub bars: usize,
    pub crossings: usize,
    pub buys: usize,
    pub sells: usize,
}

impl Summary {
    pub fn from_outputs(outputs: &[SignalOutput]) -> Self {
        outputs.iter().fold(Self { bars: outputs.len(), ..Self::default() }, |mut acc, out| {
            if out.is_intersecting {
                acc.crossings += 1;
            }
            match out.signal {
                Signal::Buy => acc.buys += 1,
                Signal::Sell => acc.sells += 1,
                Signal::Hold => {}
            }
            acc
        })
    }
}

/// Prints the batch summary table.
pub fn print_batch_report(rows: &[(String, Result<Summary, String>)]) {
    println!("\n--- Signal Batch Complete ---");
    println!("{:<40} {:>8} {:>10} {:>6} {:>6}", "file", "bars", "crossings", "buy", "sell");
    for (file, row) in rows {
        match row {
            Ok(s) => println!("{:<40} {:>8} {:>10} {:>6} {:>6}", file, s.bars, s.crossings, s.buys, s.sells),
            Err(e) => println!("{:<40} error: {}", file, e),
        }
    }
    println!("-----------------------------");
}
