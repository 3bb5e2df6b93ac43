// Tabfinder shared type definitions
// Host data (tabs, windows, groups), user input, settings and errors.

pub mod errors;
pub mod group;
pub mod input;
pub mod settings;
pub mod tab;
