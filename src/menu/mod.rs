mod dish;

use std::fmt::Display;

use chrono::NaiveDate;

pub use dish::Dish;

/// What a vendor serves on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    date: NaiveDate,
    dishes: Vec<Dish>,
}

impl Menu {
    pub const fn new(date: NaiveDate, dishes: Vec<Dish>) -> Self {
        Self { date, dishes }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }
}

impl Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [", self.date.format("%Y/%m/%d"))?;
        for (i, dish) in self.dishes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dish}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let menu = Menu::new(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            vec!["うどん".into(), "そば".into()],
        );
        assert_eq!(menu.to_string(), "2020/01/02: [うどん, そば]");
    }

    #[test]
    fn test_display_without_dishes() {
        let menu = Menu::new(NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(), Vec::new());
        assert_eq!(menu.to_string(), "2020/08/01: []");
        assert!(menu.dishes().is_empty());
    }
}
