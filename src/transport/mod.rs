//! Adapts every way a request can arrive into one shape the functions
//! understand, and every response back out.

mod proxy;
mod request;
mod response;

pub use proxy::{ProxyRequest, ProxyResponse};
pub use request::Request;
pub use response::Response;
