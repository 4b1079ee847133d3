//! Asset universe access port trait.

use crate::domain::asset::Universe;
use crate::domain::error::NesteggError;

pub trait UniversePort {
    fn load_universe(&self) -> Result<Universe, NesteggError>;
}
