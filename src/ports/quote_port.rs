//! Quote access port trait.

use crate::domain::error::NesteggError;
use crate::domain::quote::{PricePoint, Quote};

pub trait QuotePort {
    fn fetch_quotes(&self) -> Result<Vec<Quote>, NesteggError>;

    /// Chronological price history for one ticker. `Ok(None)` when no
    /// history exists: a data gap, not an error.
    fn fetch_history(&self, ticker: &str) -> Result<Option<Vec<PricePoint>>, NesteggError>;
}
