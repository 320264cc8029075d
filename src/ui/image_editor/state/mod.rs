// SPDX-License-Identifier: MPL-2.0
//! Editor sub-state: the session value type and message routing.

mod routing;
pub mod session;

pub use session::Session;
