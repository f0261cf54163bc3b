pub mod apply;
pub mod merge;
