mod forwarder_selector;

pub use forwarder_selector::{ForwarderSelector, RoutingSnapshot};
