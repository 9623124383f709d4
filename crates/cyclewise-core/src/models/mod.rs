//! Domain models for the cyclewise system.

mod cycle;
mod food;
mod fridge;
mod grocery_list;
mod profile;

pub use cycle::*;
pub use food::*;
pub use fridge::*;
pub use grocery_list::*;
pub use profile::*;
