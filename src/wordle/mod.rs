mod prelude;
mod word;
mod color;
mod data;
mod score;
mod select;
mod game;
mod tree;
mod report;
mod batch;
mod config;

pub use prelude::*;
pub use word::*;
pub use color::*;
pub use data::*;
pub use score::*;
pub use select::*;
pub use game::*;
pub use tree::*;
pub use report::*;
pub use batch::*;
pub use config::*;
