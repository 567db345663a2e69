mod request;
mod response;

pub use request::{Request, RequestDevice};
pub use response::{ActionResult, Capability, Error, ErrorCode, Response, ResponseDevice};
