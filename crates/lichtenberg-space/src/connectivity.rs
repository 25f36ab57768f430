//! Backend selection by neighbourhood size.

use crate::directions::Directions;
use crate::space::Space;
use crate::square4::Square4;
use crate::square8::Square8;
use lichtenberg_core::GrowthError;

/// Which neighbourhood growth uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Von Neumann neighbourhood: four cardinal steps.
    #[default]
    Four,
    /// Moore neighbourhood: cardinal and diagonal steps.
    Eight,
}

impl Connectivity {
    /// Build the matching lattice backend.
    pub fn build(
        self,
        width: i32,
        height: i32,
        directions: Directions,
    ) -> Result<Box<dyn Space>, GrowthError> {
        Ok(match self {
            Self::Four => Box::new(Square4::new(width, height, directions)?),
            Self::Eight => Box::new(Square8::new(width, height, directions)?),
        })
    }
}
