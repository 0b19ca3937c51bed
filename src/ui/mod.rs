//! Retained-mode UI core.
//!
//! Controls live in an arena owned by [`core::runtime::Ui`], talk to each other through
//! [`core::message::Message`], and draw through a [`render::Renderer`] that sits on top of a
//! pixel [`backend::Backend`].

pub mod core;

pub mod backend;

pub mod render;

pub mod widgets;
