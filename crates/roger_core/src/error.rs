//! Library error types.
//!
//! Detectors never surface errors (they return their zero value instead);
//! these variants exist for the collaborator boundary, where a failure is
//! caught by the lane executor and degraded to the next chain item.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RogerError {
    /// A collaborator (retrieval, personality) returned an error.
    #[error("collaborator failure: {0}")]
    Collaborator(String),

    /// A collaborator exceeded its share of the lane budget.
    #[error("collaborator timed out after {0}ms")]
    CollaboratorTimeout(u64),
}
