//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod ids;
mod patent;

pub use attribute::Attribute;
pub use ids::{CharacterKey, NpcId, PlayerId, PLAYERS_NAMESPACE};
pub use patent::Patent;
