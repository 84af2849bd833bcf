//! Small formatting helpers shared by search results, tickets, and the CLI.
//!
//! DESIGN
//! ======
//! Everything here is pure so display rules can be tested without a backend.

pub mod datetime;
pub mod html;
pub mod money;
