//! CampusGPT: a terminal chat client for a campus question-answering service.

pub mod answer;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
