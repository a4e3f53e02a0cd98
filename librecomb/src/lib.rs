pub mod align;
pub mod alphabet;
pub mod output;
pub mod structs;

mod util;
