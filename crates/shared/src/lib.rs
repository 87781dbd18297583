//! Wire and domain types shared between the directory client and the admin panel.

pub mod domain;
pub mod error;
pub mod protocol;
