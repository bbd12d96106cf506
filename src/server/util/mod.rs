pub mod list;
pub mod normalize;
pub mod parse;
