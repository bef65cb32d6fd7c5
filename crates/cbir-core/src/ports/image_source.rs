//! Image source port for loading the candidate database.

use crate::domain::Candidate;
use crate::error::Result;

/// Port for loading a database of candidate images.
pub trait ImageSource: Send + Sync {
    /// Loads every candidate, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the source cannot be opened or any image fails
    /// to decode; no partial database is returned.
    fn candidates(&self) -> Result<Vec<Candidate>>;

    /// Returns the number of candidates, if known without decoding.
    fn count_hint(&self) -> Option<usize>;
}
