//! Core flashcard library shared by the CLI and backend applications.
//!
//! Provides:
//! - Delimited-text parser turning question/answer tables into records
//! - Study session engine (queue, navigation, known/unknown classification)
//! - Repeat policy for re-queueing missed cards
//! - Keyboard dispatch and progress export
//! - Shared persistence types (DeckEntry, NewDeck, CardPayload)

pub mod error;
pub mod export;
pub mod input;
pub mod parser;
pub mod repeat;
pub mod session;
pub mod types;

pub use error::{ParseError, Result, ValidationError};
pub use export::ExportSnapshot;
pub use input::{Command, Key};
pub use parser::{parse, parse_bytes};
pub use repeat::RepeatPolicy;
pub use session::Session;
pub use types::{
    CardPayload, CurrentCard, DeckEntry, NewDeck, Position, Record, SessionConfig,
};
