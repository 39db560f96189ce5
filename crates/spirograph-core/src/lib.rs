//! Spirograph gear-motion core.
//!
//! Platform-agnostic state machine for an interactive spirograph toy: a
//! rotating gear meshes with a fixed gear, ring or beam, and dragging it
//! (by pointer or keyboard) traces a pen path. Hosts wire a
//! [`session::DragSession`] to their event loop, hand it angle samples and
//! shortcut actions, and collect pen segments through a
//! [`stroke::StrokeSink`]; rendering, windowing and raw input capture stay
//! on the host's side of those seams.

pub mod angle;
pub mod events;
pub mod input;
pub mod session;
pub mod shapes;
pub mod stroke;
pub mod viewport;

pub use angle::{normalize_degrees, pointer_angle, RotationTracker};
pub use events::{Event, EventBus, GearRole};
pub use input::{
    action_for_key, default_shortcuts, release_action_for_key, AngleInput, Shortcut,
    ShortcutAction, NUDGE_DEGREES,
};
pub use session::{DragMode, DragSession, DragSessionState, MAX_STEP_DEGREES};
pub use shapes::{
    build_rotator, BeamOptions, BeamRotator, FixedShapeKind, GearOptions, GearRotator,
    HoleOptions, RingGearOptions, RingGearRotator, Rotator, ShapeError, TransformInfo,
};
pub use stroke::{NullSink, PolylineSink, StrokeSink};
pub use viewport::Viewport;
