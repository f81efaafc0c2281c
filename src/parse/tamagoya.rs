use scraper::Html;

use super::{
    date::{index_of, parse_localized_date},
    text::{element_text, read_document, strip_whitespace},
    Error, Parse, Parsed, Result,
};
use crate::{menu::Dish, static_selector};

/// Parses the top page of tamagoya.co.jp.
///
/// The day's menu sits in `div.cnt > div.text`: an `<h3>` holding
/// `2020年1月2日(木)<main dish>` and a `<p>` with one side dish per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tamagoya;

impl Parse for Tamagoya {
    fn parse(&self, body: &mut dyn std::io::BufRead) -> Result<Parsed> {
        let document = read_document(body)?;
        Self::from_document(&document)
    }
}

impl Tamagoya {
    fn from_document(document: &Html) -> Result<Parsed> {
        static_selector!(CONTENT_SELECTOR <- "div[class=cnt] > div[class=text]");
        static_selector!(HEADER_SELECTOR <- "h3");
        static_selector!(SIDE_DISHES_SELECTOR <- "p");

        // a missing block reads as an empty header and fails on the date
        let content = CONTENT_SELECTOR.first_in(document);
        let header = content.and_then(|c| HEADER_SELECTOR.first_under(c));
        let sides = content.and_then(|c| SIDE_DISHES_SELECTOR.first_under(c));

        let (date, main) = parse_date_and_main_dish(&element_text(header))?;
        let mut dishes = vec![main];
        dishes.extend(parse_side_dishes(&element_text(sides)));
        Ok((date, dishes))
    }
}

fn parse_date_and_main_dish(header: &str) -> Result<(chrono::NaiveDate, Dish)> {
    let header: Vec<char> = strip_whitespace(header).chars().collect();

    let open = usize::try_from(index_of(&header, '(')).map_err(|_| Error::DateMarkerNotFound)?;
    let date = parse_localized_date(&header[..open].iter().collect::<String>())?;

    let rest = &header[open..];
    let close =
        usize::try_from(index_of(rest, ')')).map_err(|_| Error::DayOfWeekMarkerNotFound)?;
    let main: String = rest[close + 1..].iter().collect();

    Ok((date, Dish::from(main)))
}

// blank lines are kept as empty dishes
fn parse_side_dishes(sides: &str) -> impl Iterator<Item = Dish> + '_ {
    sides.split('\n').map(|side| Dish::new(side.trim()))
}
