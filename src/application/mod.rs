//! Application layer orchestrating the booking flow.
//!
//! `BookingSession` drives a wizard and runs its payment as a tokio task,
//! reporting to the host over a channel. `AppState` holds the shared
//! notification and message state behind a reducer.

pub mod session;
pub mod state;
