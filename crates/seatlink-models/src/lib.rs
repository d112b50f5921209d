#![deny(missing_docs)]

//! # SeatLink Models
//!
//! Core data types shared by the SeatLink SDK and its front ends.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`session`] | `SessionId` and the identifier extractor |
//! | [`beacon`] | `BeaconParams`, defaults and raw-field parsing |
//! | [`status`] | `StatusSnapshot` and its derived display fields |
//! | [`account`] | Login credential, user profile, admin listing rows |
//! | [`api`] | Request / response bodies of the remote service |
//! | [`feedback`] | Short-lived user feedback messages |

pub mod account;
pub mod api;
pub mod beacon;
pub mod error;
pub mod feedback;
pub mod session;
pub mod status;

// Re-export all public types at crate root for convenience.
pub use account::*;
pub use api::*;
pub use beacon::*;
pub use error::*;
pub use feedback::*;
pub use session::*;
pub use status::*;
