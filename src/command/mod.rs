//! Bomb commands: parsing, execution and diagnostics

pub mod diagnostics;
pub mod executor;
pub mod parser;

pub use diagnostics::{DiagnosticSink, RegionLog, RegionRecord};
pub use executor::{BombProcessor, CommandOutcome, RunReport};
pub use parser::{parse_line, parse_query, BombCommand, QueryLine};
