pub mod command;
pub mod health;
pub mod ranking;

pub use command::*;
pub use health::*;
pub use ranking::*;
