pub mod aggregate;
pub mod dto;
pub mod stats;
pub mod status;

pub use aggregate::{Request, RequestId};
pub use dto::{
    ApiErrorBody, CreateRequestDto, CreateRequestResponse, DbCheckResponse, ListRequestsQuery,
    SearchRequestsQuery, StatsQuery, UpdateStatusDto,
};
pub use stats::RequestStats;
pub use status::{RequestStatus, StatusFilter};
