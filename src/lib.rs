// Engine library: everything except the terminal front end, which lives in
// the binary (main.rs, app.rs, event.rs, ui/).
pub mod config;
pub mod cue;
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;
