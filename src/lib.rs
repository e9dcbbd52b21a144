pub mod wordle;
pub mod util;
