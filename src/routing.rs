//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    budget::edit_budget_endpoint,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    recurring::{
        create_recurring_endpoint, delete_recurring_endpoint, get_recurring_page,
        toggle_recurring_endpoint,
    },
    statistics::get_statistics_page,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::RECURRING_VIEW, get(get_recurring_page))
        .route(endpoints::STATISTICS_VIEW, get(get_statistics_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // These routes are called by HTMX and respond with HX-REDIRECT headers or HTML fragments.
    let api_routes = Router::new()
        .route(endpoints::BUDGET_API, put(edit_budget_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(endpoints::RECURRING_API, post(create_recurring_endpoint))
        .route(
            endpoints::RECURRING_TRANSACTION,
            delete(delete_recurring_endpoint),
        )
        .route(endpoints::TOGGLE_RECURRING, put(toggle_recurring_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
