//! Output generation for the working list.
//!
//! # Submodules
//!
//! - [`cards`]: renders candidates as numbered cards for the terminal
//! - [`json`]: writes the working list to a JSON file for scripting
//!
//! # Card layout
//!
//! ```text
//!  1. Göbekli Tepe                                    👀 9 min
//!     https://tr.wikipedia.org/wiki/G%C3%B6bekli_Tepe
//! ```

pub mod cards;
pub mod json;
