//! Transport abstraction traits
//!
//! These traits define the interface between the controller and the BLE
//! stack. The embedding application implements them on top of its GATT
//! client (write-with-response for the control point, notifications for the
//! treadmill data characteristic).

pub mod notify;
pub mod sink;

pub use notify::{NotificationHandler, NotificationSource};
pub use sink::{Ack, CommandSink, SinkError};
