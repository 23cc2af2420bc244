//! # Permission Browsing
//!
//! Pure helpers behind the permission picker: [`categorize`] groups a flat
//! permission list by name prefix, and [`filter_categories`] narrows the
//! grouped view as the user types.

pub mod catalog;
pub mod filter;

pub use catalog::*;
pub use filter::*;
