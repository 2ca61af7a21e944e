//! App Router

use salvo::Router;

use crate::{admin, auth, businesses, posts, shopping, users};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(user_router())
                .push(shopping_router())
                .push(admin_router()),
        )
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("sign-up").post(auth::handlers::sign_up::handler))
                .push(Router::with_path("validate").post(auth::handlers::validate::handler))
                .push(Router::with_path("sign-in").post(auth::handlers::sign_in::handler))
                .push(Router::with_path("sign-out").post(auth::handlers::sign_out::handler)),
        )
        .push(
            Router::with_path("business")
                .get(businesses::index::handler)
                .push(Router::with_path("{route_name}").get(businesses::get::handler)),
        )
        .push(
            Router::with_path("posts")
                .get(posts::index::handler)
                .push(Router::with_path("{post}").get(posts::get::handler)),
        )
}

fn user_router() -> Router {
    Router::with_path("user/{user}")
        .hoop(auth::access::owner_only)
        .get(users::get::handler)
        .put(users::update::handler)
        .push(
            Router::with_path("business")
                .get(businesses::owned_index::handler)
                .post(businesses::create::handler)
                .push(Router::with_path("all-route-names").get(businesses::route_names::handler))
                .push(
                    Router::with_path("{route_name}")
                        .get(businesses::owned_get::handler)
                        .put(businesses::update::handler)
                        .delete(businesses::delete::handler)
                        .push(Router::with_path("shopping").get(businesses::shopping::handler)),
                ),
        )
        .push(
            Router::with_path("posts")
                .get(posts::owned_index::handler)
                .post(posts::create::handler)
                .push(
                    Router::with_path("{post}")
                        .get(posts::owned_get::handler)
                        .put(posts::update::handler)
                        .delete(posts::delete::handler)
                        .push(Router::with_path("duplicate").post(posts::duplicate::handler)),
                ),
        )
        .push(
            Router::with_path("payment-plan")
                .get(users::plan::handler)
                .push(Router::with_path("purchase").post(users::purchase_plan::handler))
                .push(Router::with_path("history").get(users::plan_history::handler)),
        )
}

fn shopping_router() -> Router {
    Router::with_path("shopping")
        .get(shopping::index::handler)
        .post(shopping::add::handler)
        .delete(shopping::remove::handler)
        .push(
            Router::with_path("{shopping}")
                .get(shopping::get::handler)
                .push(Router::with_path("make-order").post(shopping::make_order::handler)),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin").hoop(auth::access::admin_only).push(
        Router::with_path("users").get(admin::users::handler).push(
            Router::with_path("{user}")
                .delete(admin::delete_user::handler)
                .push(Router::with_path("plans/{plan}").put(admin::set_plan_status::handler)),
        ),
    )
}
