//! A lane-crossing arcade game for an 84×48 monochrome panel and a
//! four-button pad, with a terminal host for desktop play.

pub mod actor;
pub mod collision;
pub mod config;
pub mod driver;
pub mod engine;
pub mod geometry;
pub mod hal;
pub mod lanes;
pub mod mode;
pub mod player;
pub mod scene;
pub mod sprites;
pub mod term;
pub mod turtle;
