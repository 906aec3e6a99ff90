#![allow(dead_code)]

pub mod game;
pub mod logging;
pub mod recording;
