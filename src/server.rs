use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::any, Router};
use futures::future::join_all;

use crate::{holiday::Holidays, notify::Notifier, vendor::Vendor};

/// Everything a notification run needs.
pub struct App {
    pub holidays: Holidays,
    pub notifier: Notifier,
    pub vendors: Vec<Vendor>,
}

pub fn router(app: Arc<App>) -> Router {
    Router::new().route("/", any(notify_menus)).with_state(app)
}

/// Posts every vendor's menu unless today is a holiday.
///
/// All vendors are handled concurrently and the response is sent only once
/// each of them is done. A vendor failing never stops the others.
async fn notify_menus(State(app): State<Arc<App>>) -> (StatusCode, String) {
    match app.holidays.is_weekday_today().await {
        Err(e) => {
            let message = format!("failed to decide whether to notify today's menu: {e}");
            log::error!("{message}");
            (StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        Ok(false) => (StatusCode::OK, "holiday, nothing to notify".to_owned()),
        Ok(true) => {
            let notifier = &app.notifier;
            let results = join_all(app.vendors.iter().map(|vendor| async move {
                notifier.notify(vendor).await.map_err(|e| {
                    log::error!("notifying {} ({}): {e}", vendor.name(), vendor.location());
                    e.to_string()
                })
            }))
            .await;

            let errors: Vec<String> = results.into_iter().filter_map(Result::err).collect();
            if errors.is_empty() {
                (StatusCode::OK, format!("notified {} menus", app.vendors.len()))
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, errors.join("\n"))
            }
        }
    }
}
