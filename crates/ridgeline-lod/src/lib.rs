//! Distance-based LOD selection for patch terrain: squared-distance band
//! tables, coarsest-first selection, and the camera temporal-coherence gate.

mod coherence;
mod selector;
mod table;

pub use coherence::CameraMemo;
pub use selector::LodSelector;
pub use table::LodDistanceTable;
