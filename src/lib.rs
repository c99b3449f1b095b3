// Library surface for headless/integration tests and reuse.
// The binary only adds argument parsing and picks the console source.
pub mod config;
pub mod difficulty;
pub mod round;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;
