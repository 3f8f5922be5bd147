pub mod commands;
pub mod key_selection;
pub mod ports;
pub mod use_cases;
