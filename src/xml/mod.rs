pub mod normalize;
pub mod tree;
