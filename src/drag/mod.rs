//! Pointer drag pipeline: sensor activation, drop target collision and the
//! drag session state machine.

pub mod collision;
pub mod sensor;
pub mod session;

pub use collision::{BoardLayout, Droppable};
pub use sensor::{PointerRelease, PointerSensor, SensorEvent};
pub use session::{DragController, DragState, DropOutcome};
