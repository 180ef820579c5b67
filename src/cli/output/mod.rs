//! CLI output formatting module
//!
//! Commands produce a [`CommandOutput`] and [`output`] renders it either as
//! human-readable text or JSON.

pub mod table;

pub use table::TableFormatter;

/// Output that can be rendered for humans or machines
pub trait CommandOutput {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Print `value` to stdout in the requested mode
pub fn output<T: CommandOutput>(value: &T, json_mode: bool) {
    if json_mode {
        println!("{}", value.to_json());
    } else {
        println!("{}", value.to_human());
    }
}
