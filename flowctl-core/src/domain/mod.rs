//! Domain types
//!
//! Entities served by the data index and acted on through the management
//! endpoints. The data index owns them; everything here is a client-side
//! snapshot.

pub mod job;
pub mod process;
