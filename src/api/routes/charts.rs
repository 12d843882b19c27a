//! Chart Routes
//!
//! Endpoints backing the dashboard controls and charts.
//!
//! - GET /api/v1/governorates - Selector options
//! - GET /api/v1/range - Tourism index range control for a governorate
//! - GET /api/v1/charts/attractions - Attraction proportion chart
//! - GET /api/v1/charts/tourism-index - Tourism index distribution chart
//! - POST /api/v1/dashboard - Both charts for a complete view state

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    AttractionsParams, OptionsParams, OptionsResponse, RangeParams, RangeResponse,
    TourismIndexParams,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pipeline::{
    governorate_options, DashboardOutput, DashboardState, DistributionChart, DistributionView,
    GovernorateSelection, ProportionChart, ProportionView,
};

/// GET /api/v1/governorates
///
/// List selector options for the requested scope.
pub async fn list_governorates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OptionsParams>,
) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        scope: params.scope,
        options: governorate_options(&state.dataset, params.scope),
    })
}

/// GET /api/v1/range
///
/// Observed tourism index bounds for the selected governorate.
pub async fn get_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> Json<RangeResponse> {
    let governorate = GovernorateSelection::parse(params.governorate.as_deref());
    let range = state.dashboard.range_control(&state.dataset, &governorate);

    Json(RangeResponse {
        governorate: governorate.to_string(),
        range,
    })
}

/// GET /api/v1/charts/attractions
///
/// Attraction proportion chart for one governorate.
pub async fn attractions_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AttractionsParams>,
) -> Json<ProportionChart> {
    let view = ProportionView {
        governorate: GovernorateSelection::parse(params.governorate.as_deref()),
    };

    Json(state.dashboard.proportion_chart(&state.dataset, &view))
}

/// GET /api/v1/charts/tourism-index
///
/// Tourism index distribution for one governorate and index range.
pub async fn tourism_index_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TourismIndexParams>,
) -> ApiResult<Json<DistributionChart>> {
    validate_bounds(params.min, params.max)?;

    let view = DistributionView {
        governorate: GovernorateSelection::parse(params.governorate.as_deref()),
        min: params.min,
        max: params.max,
    };

    let chart = state.dashboard.distribution_chart(&state.dataset, &view)?;
    Ok(Json(chart))
}

/// POST /api/v1/dashboard
///
/// Render both charts and selectors for a complete view state.
pub async fn render_dashboard(
    State(state): State<Arc<AppState>>,
    Json(view_state): Json<DashboardState>,
) -> ApiResult<Json<DashboardOutput>> {
    validate_bounds(view_state.distribution.min, view_state.distribution.max)?;

    let output = state.dashboard.render(&state.dataset, &view_state)?;
    Ok(Json(output))
}

fn validate_bounds(min: Option<f64>, max: Option<f64>) -> ApiResult<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ApiError::Validation(format!(
                "min ({}) must not exceed max ({})",
                min, max
            )));
        }
    }
    Ok(())
}
