use std::io::BufRead;

use super::{Error, Parse, Parsed, Result};
use crate::{clock::Clock, menu::Dish};

/// Picks today's row out of the monthly `menu.txt` azuma-catering.co.jp
/// publishes since 2020.
///
/// Every line is `yyyymmdd,dish,...,dish,calorie`. The number of dishes
/// changes from day to day, so the file is not read as CSV. Lines are read
/// one at a time and reading stops at the first row for today.
#[derive(Debug, Clone, Default)]
pub struct Azuma2020<C> {
    clock: C,
}

impl<C: Clock> Azuma2020<C> {
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> Parse for Azuma2020<C> {
    fn parse(&self, body: &mut dyn BufRead) -> Result<Parsed> {
        let date = self.clock.today();
        let key = date.format("%Y%m%d").to_string();

        // lines are compared as bytes so a row in another encoding doesn't
        // stop the scan
        for line in body.split(b'\n') {
            let line = line?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);
            // date, at least one dish, calorie
            if line.split(|&b| b == b',').count() < 3 {
                return Err(Error::UnexpectedColumnCount(
                    String::from_utf8_lossy(line).into_owned(),
                ));
            }

            let mut fields = line.split(|&b| b == b',');
            if fields.next() != Some(key.as_bytes()) {
                continue;
            }

            let mut dishes: Vec<Dish> = fields
                .map(|field| Dish::from(String::from_utf8_lossy(field).into_owned()))
                .collect();
            dishes.pop();
            return Ok((date, dishes));
        }

        Err(Error::NoMenuForDate(date))
    }
}
