use std::io::BufRead;

use super::{
    date::parse_localized_date,
    text::{element_text, read_document},
    Parse, Parsed, Result,
};
use crate::{menu::Dish, static_selector};

/// Parses the lunch page azuma-catering.com served until 2019: the date in
/// the page's `<h2>` and one dish per `ul.lunch_menu > li`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Azuma;

impl Parse for Azuma {
    fn parse(&self, body: &mut dyn BufRead) -> Result<Parsed> {
        static_selector!(DATE_SELECTOR <- "h2");
        static_selector!(DISH_SELECTOR <- "ul[class=lunch_menu] > li");

        let document = read_document(body)?;
        let date = parse_localized_date(element_text(DATE_SELECTOR.first_in(&document)).trim())?;
        let dishes = document
            .select(&DISH_SELECTOR)
            .map(|li| Dish::new(li.text().collect::<String>()))
            .collect();

        Ok((date, dishes))
    }
}
