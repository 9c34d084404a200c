//! Transform engine
//!
//! Every edit is a method on [`IdfDocument`](crate::IdfDocument). Edits
//! check all of their inputs before touching the document, so a failing
//! edit leaves it unchanged.

mod add;
mod autolayout;
mod height;
mod remove;
mod rename;
mod rotate;
mod translate;

pub use add::BusbarSpec;
pub use translate::TranslateTarget;

use crate::error::{IdfError, Result};

fn require_finite(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(IdfError::validation(parameter, "must be a finite number"))
    }
}

/// Trimmed outline name, rejecting names the file format cannot carry
fn clean_name<'a>(parameter: &str, name: &'a str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(IdfError::validation(parameter, "name cannot be blank"));
    }
    if name.contains('"') {
        return Err(IdfError::validation(parameter, "name cannot contain double quotes"));
    }
    Ok(name)
}
