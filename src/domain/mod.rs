//! Domain types for the booking flow: money, properties, the draft, derived
//! pricing and the wizard state machine, plus the ports the application
//! layer talks to.

pub mod booking;
pub mod draft;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod property;
pub mod wizard;
