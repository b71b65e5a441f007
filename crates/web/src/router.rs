//! App Router

use salvo::Router;

use crate::{carts, catalog, healthcheck, payments, purchases, sessions, signup};

/// Every shop route behind the session middleware. Catalog, gateway checkout
/// and mail checkout also require signup.
pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(sessions::middleware::handler)
                .push(
                    Router::with_path("signup")
                        .get(signup::handlers::show)
                        .post(signup::handlers::submit),
                )
                .push(
                    Router::new()
                        .hoop(signup::guard::handler)
                        .get(catalog::index)
                        .push(Router::with_path("pago").post(payments::checkout::handler))
                        .push(Router::with_path("compra").get(purchases::handler)),
                )
                .push(Router::with_path("agregar_al_carrito/{id}").get(carts::add::handler))
                .push(
                    Router::with_path("carrito")
                        .get(carts::show::handler)
                        .push(Router::with_path("eliminar/{id}").post(carts::remove::handler))
                        .push(Router::with_path("actualizar/{id}").post(carts::update::handler)),
                )
                .push(Router::with_path("success").get(payments::callbacks::success))
                .push(Router::with_path("failure").get(payments::callbacks::failure))
                .push(Router::with_path("pending").get(payments::callbacks::pending))
                .push(Router::with_path("estado_pago").get(payments::status::show))
                .push(Router::with_path("estado_pago_form").get(payments::status::form)),
        )
}
