//! Command-driven raster editor.
//!
//! Feed one command line at a time into an [`Interpreter`]; it keeps the
//! current [`Grid`] and saves it through a [`Storage`].
//!
//! ```
//! use pixgrid::{Interpreter, MemoryStorage};
//!
//! let mut interpreter = Interpreter::with_storage(MemoryStorage::new());
//! for line in ["I 5 6", "L 3 2 A", "V 2 3 5 J", "S out.txt"] {
//!     interpreter.execute_line(line).unwrap();
//! }
//! let saved = interpreter.storage().read("out.txt").unwrap();
//! assert_eq!(saved.lines().nth(1), Some("OOAOO"));
//! ```

#![deny(clippy::all)]

pub mod app;
pub mod command;
pub mod commands;
pub mod error;
pub mod interpreter;
pub mod presenter;
pub mod snapshot_dto;
pub mod storage;
pub mod telemetry;

pub use app::Application;

pub use command::Command;
pub use command::CommandKind;
pub use error::CliError;
pub use error::InterpreterError;
pub use error::ScriptError;
pub use interpreter::ErrorPolicy;
pub use interpreter::Interpreter;
pub use interpreter::Outcome;
pub use interpreter::ScriptReport;
pub use storage::FileStorage;
pub use storage::MemoryStorage;
pub use storage::Storage;
pub use storage::StorageError;

pub use pixgrid_core::Grid;
pub use pixgrid_core::Pixel;
