pub mod request_list_response;
#[allow(clippy::module_inception)]
pub mod requests;
pub mod submit_response;
