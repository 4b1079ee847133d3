//! Holdings snapshot access port trait.

use crate::domain::error::NesteggError;
use crate::domain::holding::Holding;

pub trait HoldingsPort {
    fn fetch_holdings(&self) -> Result<Vec<Holding>, NesteggError>;
}
