//! VortexL2 Infrastructure Layer
pub mod dns;
pub mod forwarding;
pub mod repositories;
pub mod system;
pub mod tunnel;
