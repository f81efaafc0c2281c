mod azuma;
mod azuma2020;
mod date;
mod error;
mod static_selector;
mod tamagoya;
mod text;

use std::io::BufRead;

use chrono::NaiveDate;

use crate::menu::Dish;

pub use azuma::Azuma;
pub use azuma2020::Azuma2020;
pub use error::{Error, Result};
pub use tamagoya::Tamagoya;

/// The day a document is about and its dishes in document order.
pub type Parsed = (NaiveDate, Vec<Dish>);

/// Turns one vendor's raw document into a date and a list of dishes.
pub trait Parse: Send + Sync {
    fn parse(&self, body: &mut dyn BufRead) -> Result<Parsed>;
}
