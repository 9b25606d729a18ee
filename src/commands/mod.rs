pub mod avatar;
pub mod background;
pub mod capture;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod fitting;

pub use avatar::*;
pub use background::*;
pub use capture::*;
pub use cart::*;
pub use catalog::*;
pub use config::*;
pub use fitting::*;
