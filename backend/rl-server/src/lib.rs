pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;


pub use api::{
    error::{ApiError, ApiErrorResponse, DETAIL_LIMIT, Result as ApiResult},
    requests::{
        request_list_response::RequestListResponse,
        requests::{list_requests, method_not_allowed, preflight, probe, submit_request},
        submit_response::SubmitResponse,
    },
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
