pub mod latest_review_route;
pub mod review_request;
pub mod review_response;
pub mod review_route;
