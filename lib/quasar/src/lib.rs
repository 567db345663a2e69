mod action;
mod device;
mod mode;
mod range;
mod state;
mod toggle;

pub use action::{
    ActionResult, Capability as ActionCapability, Error as ActionError,
    ErrorCode as ActionErrorCode, Request as ActionRequest, RequestDevice as ActionRequestDevice,
    Response as ActionResponse, ResponseDevice as ActionResponseDevice,
};

pub use device::Capability as DeviceCapability;
pub use device::{Device, DeviceType};
pub use device::{Property as DeviceProperty, TemperatureUnit};

pub use mode::{Mode, ModeFunction};
pub use range::{Range, RangeFunction};
pub use toggle::ToggleFunction;

pub use state::{
    Capability as StateCapability, Property as StateProperty, Request as StateRequest,
    Response as StateResponse, ResponseDevice as StateDevice,
};
