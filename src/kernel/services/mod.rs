//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types (search data model, host collaborators, settings).
//! - `adapters`: OS/runtime specific implementations (process, filesystem, async).

pub mod adapters;
pub mod ports;
