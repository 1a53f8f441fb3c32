//! Placement engine: grid geometry, occupancy, validated mutations and the
//! interaction state machine.
//!
//! Everything here operates on a borrowed [`ConfiguratorState`] plus the
//! [`Catalog`] used to resolve preset ids. The store wraps these functions
//! with change tracking and persistence.
//!
//! [`ConfiguratorState`]: crate::models::ConfiguratorState
//! [`Catalog`]: crate::catalog::Catalog

pub mod geometry;
pub mod interaction;
pub mod occupancy;
pub mod placement;

pub use geometry::{cells_covered, effective_footprint, within_bounds};
pub use interaction::{DragOutcome, Ghost};
pub use occupancy::{build_occupied_index, module_footprint, OccupiedCellIndex};
pub use placement::{can_move, can_place, find_conflicts};
