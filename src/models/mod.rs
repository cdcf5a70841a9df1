pub mod card;
pub mod pack;
pub mod set;

pub use card::*;
pub use pack::*;
pub use set::*;
