pub mod color;
pub mod control;
pub mod cursor;
pub mod error;
pub mod event;
pub mod geom;
pub mod input;
pub mod layout;
pub mod message;
pub mod painter;
pub mod runtime;
pub mod scope;
pub mod theme;
pub mod tree;
