//! Directory tree discovery
//!
//! Classifies entry names, scans single directories, and walks the wiki tree
//! into a tree of scan results that the store reduces into hyphae.

pub mod classify;
pub mod path;
pub mod scanner;
pub mod source;
pub mod walker;
