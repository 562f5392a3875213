//! App Router

use salvo::Router;

use crate::{auth, healthcheck, observability, purchases};

/// Public health and metrics routes plus the key-protected purchase routes.
pub(crate) fn app_router(metrics_enabled: bool) -> Router {
    let mut router = Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("healthcheck").get(healthcheck::handler));

    if metrics_enabled {
        router = router.push(Router::with_path("metrics").get(observability::metrics_handler));
    }

    router.push(
        Router::new()
            .hoop(purchases::replies::text_errors)
            .hoop(auth::middleware::handler)
            .push(Router::with_path("purchase").post(purchases::create::handler))
            .push(
                Router::with_path("purchases")
                    .get(purchases::index::handler)
                    .post(purchases::create::handler)
                    .push(Router::with_path("{buyer}").get(purchases::index::for_buyer)),
            )
            .push(Router::with_path("check_duplicate").post(purchases::check_duplicate::handler))
            .push(Router::with_path("check-duplicate").post(purchases::check_duplicate::handler)),
    )
}
