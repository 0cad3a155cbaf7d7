//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of the repository traits defined in
//! `cotacao-core` for the SQLite database backend.

use crate::{Db, Error, types::DateTime};
use cotacao_core::ports::Repository;

mod price;

impl Repository for Db {
    type Error = Error;
    type DateTime = DateTime;
}
