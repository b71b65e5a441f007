//! Catalog Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    views::{self, Page},
};

/// Product list.
#[salvo::handler]
pub(crate) async fn index(depot: &mut Depot) -> Result<Page, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Page::Html(views::catalog(
        &state.app.catalog.products(),
        state.app.currency,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{app_service, cookie_header, sign_up, test_state};

    use super::*;

    #[tokio::test]
    async fn lists_every_product() -> TestResult {
        let state = test_state();
        let session = sign_up(&state).await?;

        let mut res = TestClient::get("http://example.com/")
            .add_header(COOKIE, cookie_header(session), true)
            .send(&app_service(state, Router::new().get(index)))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        for name in ["Zapatillas", "Harina", "Pepe"] {
            assert!(body.contains(name), "missing {name}");
        }

        assert!(body.contains("href=\"/agregar_al_carrito/1\""));

        Ok(())
    }
}
