use std::{collections::HashMap, io::Read, sync::Arc};

use crate::{clock::Clock, error::Error, fetch::Fetch, Result};

pub static HOLIDAYS_URL: &str = "https://holidays-jp.github.io/api/v1/date.json";

/// Decides whether today is a working day by looking it up in a JSON object
/// keyed by `yyyy-mm-dd`, as served by holidays-jp.
///
/// Only listed holidays count. Weekends are not treated specially.
pub struct Holidays {
    location: String,
    fetch: Arc<dyn Fetch>,
    clock: Box<dyn Clock>,
}

impl Holidays {
    pub fn new(
        location: impl Into<String>,
        fetch: Arc<dyn Fetch>,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            location: location.into(),
            fetch,
            clock: Box::new(clock),
        }
    }

    pub async fn is_weekday_today(&self) -> Result<bool> {
        let mut body = self
            .fetch
            .fetch(&self.location)
            .await
            .map_err(|cause| Error::Fetch {
                location: self.location.clone(),
                cause,
            })?;

        let json = tokio::task::spawn_blocking(move || {
            let mut json = String::new();
            let read = body.read_to_string(&mut json);
            if let Err(e) = body.close() {
                log::warn!("Error while closing holiday data: {e}");
            }
            read.map(|_| json)
        })
        .await
        .map_err(Error::Task)?
        .map_err(Error::Read)?;

        let holidays: HashMap<String, String> = serde_json::from_str(&json)?;
        let today = self.clock.today().format("%Y-%m-%d").to_string();
        if let Some(name) = holidays.get(&today) {
            log::info!("{today} is a holiday: {name}");
            return Ok(false);
        }
        Ok(true)
    }
}
