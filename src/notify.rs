use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::{error::Error, menu::Menu, vendor::Vendor, Result};

/// Message for a Slack incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    icon_emoji: String,
}

impl Payload {
    /// Date in bold, then one quoted bullet per dish. Soup-like dishes get a
    /// spoon.
    pub fn menu(vendor: &Vendor, menu: &Menu) -> Self {
        let mut text = menu.date().format("*%Y/%m/%d*\n").to_string();
        for dish in menu.dishes() {
            text.push_str("> - ");
            text.push_str(dish.name());
            if dish.is_souplike() {
                text.push_str(" :spoon:");
            }
            text.push('\n');
        }
        Self::from_vendor(vendor, text)
    }

    pub fn error(vendor: &Vendor, err: &Error) -> Self {
        Self::from_vendor(vendor, format!("bento: failed to fetch a menu: {err}"))
    }

    fn from_vendor(vendor: &Vendor, text: String) -> Self {
        Self {
            text,
            username: vendor.name().to_owned(),
            icon_emoji: vendor.icon_emoji().to_owned(),
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Posts payloads to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    webhook: Url,
}

impl Notifier {
    pub const fn new(client: Client, webhook: Url) -> Self {
        Self { client, webhook }
    }

    pub async fn post(&self, payload: &Payload) -> Result<()> {
        let json = serde_json::to_string(payload)?;
        let response = self
            .client
            .post(self.webhook.clone())
            .form(&[("payload", json)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Webhook(status));
        }
        Ok(())
    }

    /// Posts the vendor's menu for today, or why it could not be read.
    pub async fn notify(&self, vendor: &Vendor) -> Result<()> {
        let payload = match vendor.menu().await {
            Ok(menu) => {
                log::info!("{}: {menu}", vendor.name());
                Payload::menu(vendor, &menu)
            }
            Err(e) => {
                tracing::warn!("Error while getting the menu of {}: {e}", vendor.name());
                Payload::error(vendor, &e)
            }
        };
        self.post(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use httpmock::prelude::*;

    use super::*;
    use crate::fetch::{make_client, testing::MemoryFetch, Fetch};

    fn vendor() -> Vendor {
        Vendor::tamagoya(Arc::new(MemoryFetch::new()) as Arc<dyn Fetch>)
    }

    #[test]
    fn test_menu_payload() {
        let menu = Menu::new(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            vec!["うどん".into(), "シチュー".into(), "そば".into()],
        );
        let payload = Payload::menu(&vendor(), &menu);
        assert_eq!(
            payload.text(),
            "*2020/01/02*\n> - うどん\n> - シチュー :spoon:\n> - そば\n"
        );
    }

    #[test]
    fn test_payload_json() {
        let menu = Menu::new(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), Vec::new());
        let payload = Payload::menu(&vendor(), &menu);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "text": "*2020/01/02*\n",
                "username": "玉子屋",
                "icon_emoji": "hatching_chick",
            })
        );
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let payload = Payload {
            text: "hi".into(),
            username: String::new(),
            icon_emoji: String::new(),
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"text":"hi"}"#);
    }

    #[tokio::test]
    async fn test_notify_error() {
        let server = MockServer::start_async().await;
        let hook = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/hook")
                    .body_contains("payload=%7B");
                then.status(200);
            })
            .await;

        let notifier = Notifier::new(make_client(), server.url("/hook").parse().unwrap());
        notifier.notify(&vendor()).await.unwrap();
        hook.assert_async().await;
    }

    #[tokio::test]
    async fn test_webhook_rejects() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(500);
            })
            .await;

        let notifier = Notifier::new(make_client(), server.url("/hook").parse().unwrap());
        let payload = Payload {
            text: "hi".into(),
            username: String::new(),
            icon_emoji: String::new(),
        };
        let err = notifier.post(&payload).await.unwrap_err();
        assert!(matches!(err, Error::Webhook(s) if s.as_u16() == 500));
    }
}
