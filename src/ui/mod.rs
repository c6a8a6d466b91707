pub mod notice;
pub mod render;
pub mod view;
