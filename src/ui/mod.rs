pub mod list;
pub mod mvi;
pub mod navigation;
