//! Input tester for Linux handhelds: shows every button, the d-pad, the
//! analog nub and the gravity sensor live, and remembers what was pressed.

pub mod devices;
pub mod dispatcher;
pub mod element;
pub mod error;
pub mod event;
pub mod haptic;
pub mod layout;
pub mod logger;
pub mod mapping;
pub mod reader;
pub mod render;
pub mod session;
pub mod state;
