use std::{fmt, sync::Arc};

use tracing::instrument;

use crate::{
    clock::Clock,
    config,
    error::Error,
    fetch::Fetch,
    menu::Menu,
    parse::{Azuma, Azuma2020, Parse, Tamagoya},
    Result,
};

static TAMAGOYA_URL: &str = "http://www.tamagoya.co.jp/";
static AZUMA_URL: &str = "http://azuma-catering.com/lunch.php";
static AZUMA2020_URL: &str = "http://azuma-catering.co.jp/calendar/menu.txt";

/// A lunch box company and how to read its menu.
pub struct Vendor {
    name: String,
    icon_emoji: String,
    location: String,
    fetch: Arc<dyn Fetch>,
    parser: Arc<dyn Parse>,
}

impl fmt::Debug for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vendor")
            .field("name", &self.name)
            .field("icon_emoji", &self.icon_emoji)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Vendor {
    pub fn new(
        name: impl Into<String>,
        icon_emoji: impl Into<String>,
        location: impl Into<String>,
        fetch: Arc<dyn Fetch>,
        parser: impl Parse + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            icon_emoji: icon_emoji.into(),
            location: location.into(),
            fetch,
            parser: Arc::new(parser),
        }
    }

    pub fn tamagoya(fetch: Arc<dyn Fetch>) -> Self {
        Self::new("玉子屋", "hatching_chick", TAMAGOYA_URL, fetch, Tamagoya)
    }

    /// あづま給食 up to 2019.
    pub fn azuma(fetch: Arc<dyn Fetch>) -> Self {
        Self::new("あづま給食", "bento", AZUMA_URL, fetch, Azuma)
    }

    /// あづま給食 from 2020 on.
    pub fn azuma2020(fetch: Arc<dyn Fetch>, clock: impl Clock + 'static) -> Self {
        Self::new(
            "あづま給食",
            "bento",
            AZUMA2020_URL,
            fetch,
            Azuma2020::new(clock),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon_emoji(&self) -> &str {
        &self.icon_emoji
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Fetches the vendor's document and reads today's menu out of it.
    ///
    /// The body is parsed and closed on the blocking pool since reading it
    /// may wait on the network. It is closed on every path. A failure to
    /// close only surfaces when parsing succeeded.
    #[instrument(skip(self), fields(vendor = %self.name, location = %self.location))]
    pub async fn menu(&self) -> Result<Menu> {
        let mut body = self
            .fetch
            .fetch(&self.location)
            .await
            .map_err(|cause| Error::Fetch {
                location: self.location.clone(),
                cause,
            })?;

        let parser = Arc::clone(&self.parser);
        let (parsed, closed) = tokio::task::spawn_blocking(move || {
            let parsed = parser.parse(&mut body);
            (parsed, body.close())
        })
        .await
        .map_err(Error::Task)?;

        let (date, dishes) = match (parsed, closed) {
            (Ok(parsed), Ok(())) => parsed,
            (Ok(_), Err(e)) => return Err(Error::StreamClose(e)),
            (Err(e), closed) => {
                if let Err(close_error) = closed {
                    tracing::warn!("Error while closing body after failed parse: {close_error}");
                }
                return Err(Error::Parse(e));
            }
        };

        Ok(Menu::new(date, dishes))
    }
}

/// Builds the vendors named in `names`, in that order.
pub fn registry(
    names: &[String],
    fetch: &Arc<dyn Fetch>,
    clock: impl Clock + Clone + 'static,
) -> std::result::Result<Vec<Vendor>, config::Error> {
    names
        .iter()
        .map(|name| match name.as_str() {
            "tamagoya" => Ok(Vendor::tamagoya(Arc::clone(fetch))),
            "azuma" => Ok(Vendor::azuma(Arc::clone(fetch))),
            "azuma2020" => Ok(Vendor::azuma2020(Arc::clone(fetch), clock.clone())),
            _ => Err(config::Error::UnknownVendor(name.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use httpmock::prelude::*;

    use super::*;
    use crate::{
        clock,
        fetch::{make_client, testing::MemoryFetch, HttpFetch},
        parse,
    };

    fn tamagoya_html() -> String {
        fs::read_to_string("./src/parse/html_examples/tamagoya.html").unwrap()
    }

    #[tokio::test]
    async fn test_menu() {
        let fetch = Arc::new(MemoryFetch::new().with(TAMAGOYA_URL, tamagoya_html()));
        let vendor = Vendor::tamagoya(Arc::clone(&fetch) as Arc<dyn Fetch>);
        let menu = vendor.menu().await.unwrap();
        assert_eq!(menu.to_string(), "2020/01/02: [うどん, シチュー, そば]");
        assert_eq!(fetch.closes(), 1);
    }

    #[tokio::test]
    async fn test_menu_azuma2020() {
        let fetch = Arc::new(
            MemoryFetch::new().with(AZUMA2020_URL, fs::read("./testdata/menu.txt").unwrap()),
        );
        let today = clock::fixed(NaiveDate::from_ymd_opt(2020, 8, 5).unwrap());
        let vendor = Vendor::azuma2020(Arc::clone(&fetch) as Arc<dyn Fetch>, today);
        let menu = vendor.menu().await.unwrap();
        assert_eq!(
            menu.to_string(),
            "2020/08/05: [ポークカレー, コールスロー, ご飯]"
        );
        assert!(menu.dishes()[0].is_souplike());
        assert_eq!(fetch.closes(), 1);
    }

    #[tokio::test]
    async fn test_menu_over_http() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/calendar/menu.txt");
                then.status(200).body(fs::read("./testdata/menu.txt").unwrap());
            })
            .await;

        let today = clock::fixed(NaiveDate::from_ymd_opt(2020, 8, 7).unwrap());
        let vendor = Vendor::new(
            "あづま給食",
            "bento",
            server.url("/calendar/menu.txt"),
            Arc::new(HttpFetch::new(make_client())),
            Azuma2020::new(today),
        );
        let menu = vendor.menu().await.unwrap();
        assert_eq!(menu.to_string(), "2020/08/07: [麻婆豆腐, 春雨サラダ, ご飯]");
    }

    #[tokio::test]
    async fn test_parse_failure_closes_body() {
        let fetch = Arc::new(MemoryFetch::new().with(AZUMA_URL, "<h2>準備中</h2>"));
        let vendor = Vendor::azuma(Arc::clone(&fetch) as Arc<dyn Fetch>);
        let err = vendor.menu().await.unwrap_err();
        assert!(matches!(err, Error::Parse(parse::Error::MalformedDate(_))));
        assert_eq!(fetch.closes(), 1);
    }

    #[tokio::test]
    async fn test_close_failure_after_parse() {
        let fetch = Arc::new(
            MemoryFetch::new()
                .with(TAMAGOYA_URL, tamagoya_html())
                .failing_close(),
        );
        let vendor = Vendor::tamagoya(Arc::clone(&fetch) as Arc<dyn Fetch>);
        let err = vendor.menu().await.unwrap_err();
        assert!(matches!(err, Error::StreamClose(_)));
        assert_eq!(fetch.closes(), 1);
    }

    #[tokio::test]
    async fn test_parse_failure_wins_over_close_failure() {
        let fetch = Arc::new(
            MemoryFetch::new()
                .with(TAMAGOYA_URL, "<html></html>")
                .failing_close(),
        );
        let vendor = Vendor::tamagoya(Arc::clone(&fetch) as Arc<dyn Fetch>);
        let err = vendor.menu().await.unwrap_err();
        assert!(matches!(err, Error::Parse(parse::Error::DateMarkerNotFound)));
        assert_eq!(fetch.closes(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let fetch = Arc::new(MemoryFetch::new());
        let vendor = Vendor::tamagoya(Arc::clone(&fetch) as Arc<dyn Fetch>);
        let err = vendor.menu().await.unwrap_err();
        assert!(matches!(&err, Error::Fetch { location, .. } if location == TAMAGOYA_URL));
        assert_eq!(err.to_string(), "fetching http://www.tamagoya.co.jp/: status code 404");
        assert_eq!(fetch.closes(), 0);
    }

    #[tokio::test]
    async fn test_vendors_are_independent() {
        let fetch: Arc<dyn Fetch> =
            Arc::new(MemoryFetch::new().with(TAMAGOYA_URL, tamagoya_html()));
        let today = clock::fixed(NaiveDate::from_ymd_opt(2020, 8, 5).unwrap());
        let names = ["tamagoya".to_owned(), "azuma2020".to_owned()];
        let vendors = registry(&names, &fetch, today).unwrap();
        let results = futures::future::join_all(vendors.iter().map(Vendor::menu)).await;
        assert_eq!(
            results[0].as_ref().unwrap().to_string(),
            "2020/01/02: [うどん, シチュー, そば]"
        );
        assert!(matches!(results[1], Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_registry() {
        let fetch: Arc<dyn Fetch> = Arc::new(MemoryFetch::new());
        let today = clock::fixed(NaiveDate::from_ymd_opt(2020, 8, 5).unwrap());
        let names = ["azuma2020".to_owned(), "azuma".to_owned(), "tamagoya".to_owned()];
        let vendors = registry(&names, &fetch, today.clone()).unwrap();
        let locations: Vec<&str> = vendors.iter().map(Vendor::location).collect();
        assert_eq!(locations, [AZUMA2020_URL, AZUMA_URL, TAMAGOYA_URL]);
        assert_eq!(vendors[2].name(), "玉子屋");

        let err = registry(&["hokkaido".to_owned()], &fetch, today).unwrap_err();
        assert!(matches!(err, config::Error::UnknownVendor(name) if name == "hokkaido"));
    }
}
