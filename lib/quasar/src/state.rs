mod capability;
mod property;
mod request;
mod response;

pub use capability::Capability;
pub use property::Property;
pub use request::Request;
pub use response::{Response, ResponseDevice};
