//! Inkboard Core Library
//!
//! Geometric interaction engine for the Inkboard whiteboard: hit-testing,
//! marquee selection, drag/move, the resize/rotate handle state machine and
//! the frame composition that keeps the screen consistent with that state.

pub mod board;
pub mod config;
pub mod drag;
pub mod element;
pub mod frame;
pub mod geometry;
pub mod hooks;
pub mod interaction;
pub mod layers;
pub mod selection;
pub mod shapes;
pub mod tools;
pub mod transform;

pub use board::Board;
pub use config::{ConfigError, InteractionConfig};
pub use drag::DragState;
pub use element::{Element, ElementError, ElementId, ElementStyle, SerializableColor};
pub use frame::{Frame, FrameItem};
pub use geometry::{Bounds, Viewport, bounding_box_of};
pub use hit_test::{find_elements_at_point, find_elements_in_box, topmost_at_point};
pub use hooks::{BoardEvent, BoardHooks, EventLog, NoopHooks};
pub use interaction::{GestureMode, Interaction, Modifiers};
pub use selection::SelectionState;
pub use shapes::{Arrow, Circle, Freehand, Line, Rectangle, Shape, ShapeTrait, Text};
pub use tools::{DrawingStyle, ToolKind, ToolManager};
pub use transform::{Handle, HandleKind, TransformState};
