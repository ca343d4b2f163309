pub mod color;
pub mod component;
pub mod widget;
