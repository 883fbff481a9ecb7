//! Utility call drill: a sibling-crate call, then an in-place list update.

use std::io::Write;

use anyhow::{Context, Result};
use drill_utils::add;

use crate::core::numbers::{double_values, format_list};

/// What the utility drill computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityOutcome {
    pub sum: i64,
    pub values: Vec<i64>,
}

/// Run the utility drill, printing `10 + 5 = 15` and the doubled list.
pub fn run_utility<W: Write>(out: &mut W) -> Result<UtilityOutcome> {
    let sum = add(10, 5);
    writeln!(out, "10 + 5 = {sum}").context("write output")?;

    let mut values = vec![1, 2, 3, 4];
    double_values(&mut values);
    writeln!(out, "{}", format_list(&values)).context("write output")?;

    Ok(UtilityOutcome { sum, values })
}
