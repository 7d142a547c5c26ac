//! Scaffold a project directory tree from `-xxx=value` options.
//!
//! [`options`] turns raw tokens into resolved values, [`layout`] maps them onto the items of a
//! project and [`items`] creates those items, pulling file contents from a [`store`].

pub mod args;
pub mod items;
pub mod layout;
pub mod log;
pub mod options;
pub mod store;
