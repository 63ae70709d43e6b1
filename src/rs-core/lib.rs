use wasm_bindgen::prelude::*;

mod bindings;
mod buffer_tracker;
mod configuration;
pub mod controller;
mod controls_visibility;
mod fullscreen;
mod platform;
mod playback_state;
mod seek_volume;
mod source_resolver;
mod utils;

pub use utils::logger::Logger;
