//! Thin dialoguer wrappers for the interactive entry form.

use crate::entry::{parse_quantity, QuantityInput};
use crate::error::{StocktakeError, StocktakeResult};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

fn prompt_error(e: dialoguer::Error) -> StocktakeError {
    StocktakeError::Prompt(e.to_string())
}

/// Pick one item from a list, returning its index
pub fn select(prompt: &str, items: &[String]) -> StocktakeResult<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)
}

/// Free-text input; empty allowed
pub fn input_text(prompt: &str) -> StocktakeResult<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

/// Yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> StocktakeResult<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

/// Ask for a quantity until the answer validates.
///
/// Empty input means zero; unparsable or negative input is reported and
/// asked again instead of being coerced.
pub fn quantity(prompt: &str) -> StocktakeResult<f64> {
    loop {
        let raw: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        match parse_quantity(&raw) {
            QuantityInput::Empty => return Ok(0.0),
            QuantityInput::Valid(n) => return Ok(n),
            QuantityInput::Invalid(bad) => {
                println!(
                    "   {} '{}' is not a quantity (use 2, 0.5 or 0,5)",
                    "✗".red(),
                    bad
                );
            }
        }
    }
}
