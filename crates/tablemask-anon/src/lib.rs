//! TableMask Anonymizer — table model, salted hashing, and the
//! column-masking transform.

pub mod anonymize;
pub mod hasher;
pub mod io;
pub mod table;

pub use anonymize::{anonymize, AnonymizeOutput, HASHED_SUFFIX};
pub use hasher::SaltedHasher;
pub use table::Table;
