use crate::error::FarmGraphServerError;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use farmgraph::Advisor;

mod crops;
mod plots;
mod recommendations;

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/plots", get(plots::handle_list_plots))
        .route(
            "/plots/{plot_id}/year/{year}",
            get(plots::handle_plot_year_summary),
        )
        .route(
            "/records/{plot_id}/{year}",
            get(plots::handle_yield_records),
        )
        .route("/crops/legumes", get(crops::handle_legume_crops))
        .route("/crops/cereals", get(crops::handle_cereal_crops))
        .route(
            "/recommendations/needs-fertilizer",
            get(recommendations::handle_needs_fertilizer),
        )
        .route(
            "/recommendations/postpone-fertilizer",
            get(recommendations::handle_postpone_fertilizer),
        )
        .route(
            "/recommendations/high-pest-risk",
            get(recommendations::handle_high_pest_risk),
        )
        .route(
            "/recommendations/next-crop",
            get(recommendations::handle_next_crop),
        )
        .route(
            "/fertilizer/{plot_id}/{year}",
            get(recommendations::handle_fertilizer_recommendations),
        )
        .route(
            "/croprot/{plot_id}/{year}",
            get(recommendations::handle_crop_rotation_recommendations),
        )
}

/// Runs an advisor operation on the blocking thread pool.
///
/// The operations are CPU bound and must not stall the async workers.
async fn run<T>(
    state: AppState,
    operation: impl FnOnce(&Advisor) -> T + Send + 'static,
) -> Result<T, FarmGraphServerError>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || operation(&state.advisor))
        .await
        .map_err(|error| FarmGraphServerError::Internal(error.into()))
}
