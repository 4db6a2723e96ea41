//! # bpmn-model
//!
//! Read a Business Process Model and Notation (BPMN) 2.0 document carrying agreement extensions
//! into a typed process model: model metadata, data store fields and, per process, the lanes,
//! classified activities, gateways, timer events and transitions.
//!
//! - Cross references are checked. A transition, gateway or lane pointing at an unknown id is
//!   an error.
//! - Business gaps (missing application, mappings, escalation, ...) fall back to empty values.
//! - Nothing is executed. Sub process references are recorded, not resolved.
//! - Processes can be extracted in parallel (opt in).
//!
//! ## Example
//!
//! ### Cargo.toml
//! ```toml
//! [dependencies]
//! bpmn-model = "0.1"
//! log = "0.4"
//! pretty_env_logger = "0.5"
//! ```
//! ### main.rs
//!
//! ```
//! use bpmn_model::Parser;
//!
//! extern crate pretty_env_logger;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pretty_env_logger::init();
//!
//!     let mut parser = Parser::new();
//!     parser.parse(&std::fs::read_to_string("tests/fixtures/formation.bpmn")?)?;
//!
//!     let model = parser.model()?;
//!     println!("{} {}", model.id, model.version);
//!     for process in parser.processes()? {
//!         for (id, name) in &process.activity_map {
//!             println!("{}: {id} {name}", process.id);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod bpmn;
mod error;
mod extract;
mod model;
mod parser;
mod reader;

pub mod params;

pub use bpmn::{
    ActivityType, Behavior, DataType, Direction, EventBehavior, EventType, GatewayType, Operator,
    ParameterType, TaskType,
};
pub use error::{Error, Result};
pub use model::{
    Activity, BoundaryEvent, Condition, DataMapping, DataReference, DataStoreField,
    DefaultTransition, EscalationAction, Gateway, IntermediateCatchEvent, Model, Participant,
    Performer, Process, TimerValue, Transition, Version,
};
pub use parser::{EXTENSION_NAMESPACE, Parser, ParserOptions};
pub use reader::{Flag, boolean_from_string};

/// A fresh parser with default options.
pub fn new_parser() -> Parser {
    Parser::new()
}
