//! The drag session state machine.
//!
//! Converts pointer and keyboard input into a continuous stream of gear
//! poses: free drags roll the gear along the fixed shape one whole degree
//! at a time, in-place drags re-mesh it tooth by tooth, and keyboard
//! shortcuts replay the same paths with fixed-size steps. Pen segments are
//! emitted between consecutive poses while the pen is down, and never
//! across a mode switch or reconfiguration.

use crate::angle::{normalize_degrees, pointer_angle, RotationTracker};
use crate::events::{Event, GearRole};
use crate::input::{AngleInput, ShortcutAction, NUDGE_DEGREES};
use crate::shapes::{
    build_rotator, FixedShapeKind, GearOptions, HoleOptions, Rotator, ShapeError, TransformInfo,
};
use crate::stroke::{NullSink, StrokeSink};
use crate::viewport::Viewport;
use kurbo::Point;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Upper bound on whole-degree steps per update. Inputs asking for more are
/// clamped toward the previous angle, keeping the pen path continuous.
pub const MAX_STEP_DEGREES: f64 = 3600.0;

/// Nudges one tooth step past the quantization boundary so floating-point
/// ties resolve toward the intended tooth.
const TOOTH_STEP_TIE_BREAKER: f64 = 0.1;

/// How a drag gesture moves the gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragMode {
    /// The gear translates along the fixed shape's perimeter.
    #[default]
    Free,
    /// The gear spins about its own pivot, re-meshing tooth by tooth.
    InPlace,
}

/// The fields that survive across drags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSessionState {
    /// Mode the next drag will start in (tracks the held modifier).
    pub mode: DragMode,
    /// Whether a drag gesture is currently active.
    pub dragging: bool,
    /// Wrap detection and turn counting for free motion.
    pub tracker: RotationTracker,
    /// Unwrapped angle the gear currently sits at.
    pub last_absolute_angle: f64,
    /// Current meshing phase, in teeth. Always below the tooth count.
    pub tooth_offset: u32,
    /// Meshing phase committed by the last drag end or tooth step.
    pub initial_tooth_offset: u32,
    /// Reference angle latched on the first in-place sample of a drag.
    pub drag_start_angle: Option<f64>,
    /// Whether gear motion currently produces stroke output.
    pub pen_down: bool,
}

impl Default for DragSessionState {
    fn default() -> Self {
        Self {
            mode: DragMode::Free,
            dragging: false,
            tracker: RotationTracker::new(),
            last_absolute_angle: 0.0,
            tooth_offset: 0,
            initial_tooth_offset: 0,
            drag_start_angle: None,
            pen_down: true,
        }
    }
}

/// Owns the motion state, the active rotation function, and the current
/// gear/hole configuration. All methods run synchronously; `&mut self`
/// keeps the stepped updates from being re-entered.
pub struct DragSession {
    state: DragSessionState,
    /// Pose currently applied to the gear.
    pose: Option<TransformInfo>,
    /// Pose the next stroke segment continues from. Cleared whenever a
    /// segment must not span what happened in between.
    previous: Option<TransformInfo>,
    /// Mode latched at drag start; mid-drag modifier changes apply to the
    /// next drag.
    active_mode: DragMode,
    gear: GearOptions,
    hole: HoleOptions,
    rotator: Box<dyn Rotator>,
    viewport: Viewport,
}

impl DragSession {
    /// Wire up a session and compute the initial pose at angle zero.
    pub fn new(
        gear: GearOptions,
        hole: HoleOptions,
        rotator: Box<dyn Rotator>,
        viewport: Viewport,
    ) -> Self {
        let mut session = Self {
            state: DragSessionState::default(),
            pose: None,
            previous: None,
            active_mode: DragMode::Free,
            gear,
            hole,
            rotator,
            viewport,
        };
        session.move_gear(AngleInput::Degrees(0.0), &mut NullSink);
        session
    }

    pub fn state(&self) -> &DragSessionState {
        &self.state
    }

    pub fn pose(&self) -> Option<TransformInfo> {
        self.pose
    }

    pub fn gear(&self) -> &GearOptions {
        &self.gear
    }

    pub fn hole(&self) -> &HoleOptions {
        &self.hole
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Start a drag gesture, latching the current mode for its duration.
    pub fn begin_drag(&mut self) {
        self.state.dragging = true;
        self.active_mode = self.state.mode;
        debug!("drag started in {:?} mode", self.active_mode);
    }

    /// End the drag: the reached meshing phase becomes permanent and the
    /// in-place reference angle is forgotten.
    pub fn end_drag(&mut self) {
        self.state.dragging = false;
        self.state.initial_tooth_offset = self.state.tooth_offset;
        self.state.drag_start_angle = None;
        debug!("drag ended at tooth offset {}", self.state.tooth_offset);
    }

    /// Forward one pointer-move sample of an active drag.
    pub fn drag_move(&mut self, pointer: Point, sink: &mut dyn StrokeSink) {
        if !self.state.dragging {
            return;
        }
        match self.active_mode {
            DragMode::Free => self.move_gear(AngleInput::Pointer(pointer), sink),
            DragMode::InPlace => self.rotate_in_place(AngleInput::Pointer(pointer)),
        }
    }

    /// Free motion: unwrap the sample and roll the gear through every whole
    /// degree between the previous angle and the new one.
    pub fn move_gear(&mut self, input: AngleInput, sink: &mut dyn StrokeSink) {
        let wrapped = match input {
            AngleInput::Degrees(a) => normalize_degrees(a),
            // Free motion pivots on the fixed shape's center, the logical origin.
            AngleInput::Pointer(p) => pointer_angle(p, Point::ZERO),
        };
        let absolute = self.state.tracker.track(wrapped);
        self.advance_free(absolute, sink);
    }

    fn advance_free(&mut self, target: f64, sink: &mut dyn StrokeSink) {
        let mut target = target;
        let mut delta = target - self.state.last_absolute_angle;
        if delta.abs() > MAX_STEP_DEGREES {
            target = self.state.last_absolute_angle + MAX_STEP_DEGREES.copysign(delta);
            delta = target - self.state.last_absolute_angle;
            debug!("clamped oversized advance to {target}");
        }

        let steps = delta.abs().floor() as u64;
        let direction = if delta >= 0.0 { 1.0 } else { -1.0 };
        let base = self.state.last_absolute_angle;

        for k in 1..=steps {
            self.apply_pose(base + direction * k as f64, sink);
        }
        // Land exactly on the target so consecutive samples never drift
        // more than a degree apart.
        if delta.abs() - steps as f64 > 0.0 {
            self.apply_pose(target, sink);
        } else if steps == 0 && self.previous.is_none() {
            // Nothing traversed, but the displayed pose needs refreshing
            // (initial placement and reconfiguration replays).
            self.apply_pose(target, sink);
        }

        self.state.last_absolute_angle = target;
    }

    fn apply_pose(&mut self, angle: f64, sink: &mut dyn StrokeSink) {
        let info = self
            .rotator
            .rotate(&self.gear, angle, &self.hole, self.state.tooth_offset);
        if let Some(prev) = &self.previous {
            if self.state.pen_down {
                sink.draw_segment(
                    self.viewport.to_canvas(prev.pen),
                    self.viewport.to_canvas(info.pen),
                );
            }
        }
        self.previous = Some(info);
        self.pose = Some(info);
    }

    /// In-place rotation: quantize the drag angle about the gear's own
    /// pivot into whole teeth. The orbital angle never changes here, and
    /// neither does the stroke continuity link.
    pub fn rotate_in_place(&mut self, input: AngleInput) {
        let pivot = match &self.previous {
            Some(prev) => prev.center,
            // The gear does not translate in this mode, so a provisional
            // pose at the unchanged angle yields the same pivot.
            None => {
                self.rotator
                    .rotate(&self.gear, self.state.last_absolute_angle, &self.hole, self.state.tooth_offset)
                    .center
            }
        };
        let mouse_angle = match input {
            AngleInput::Degrees(a) => normalize_degrees(a),
            AngleInput::Pointer(p) => pointer_angle(p, pivot),
        };
        let start = *self
            .state
            .drag_start_angle
            .get_or_insert(mouse_angle);

        let delta = ((mouse_angle - start) % 360.0 + 360.0) % 360.0;
        let step = self.gear.tooth_step_degrees();
        self.state.tooth_offset =
            ((delta / step).floor() as u32 + self.state.initial_tooth_offset) % self.gear.tooth_count;
        trace!(
            "in-place: delta {delta:.3} -> tooth offset {}",
            self.state.tooth_offset
        );

        self.pose = Some(self.rotator.rotate(
            &self.gear,
            self.state.last_absolute_angle,
            &self.hole,
            self.state.tooth_offset,
        ));
    }

    /// Apply a keyboard shortcut action.
    pub fn apply_shortcut(&mut self, action: ShortcutAction, sink: &mut dyn StrokeSink) {
        match action {
            ShortcutAction::NudgeForward => {
                let target = self.state.last_absolute_angle + NUDGE_DEGREES;
                self.move_gear(AngleInput::Degrees(target), sink);
            }
            ShortcutAction::NudgeBackward => {
                let target = self.state.last_absolute_angle - NUDGE_DEGREES;
                self.move_gear(AngleInput::Degrees(target), sink);
            }
            ShortcutAction::ToothStepForward => self.tooth_step(1.0),
            ShortcutAction::ToothStepBackward => self.tooth_step(-1.0),
            ShortcutAction::PenUp => {
                self.state.pen_down = false;
                self.previous = None;
            }
            ShortcutAction::PenDown => {
                self.state.pen_down = true;
                self.previous = None;
            }
            ShortcutAction::InPlaceOn => {
                self.state.mode = DragMode::InPlace;
                self.previous = None;
            }
            ShortcutAction::InPlaceOff => {
                self.state.mode = DragMode::Free;
                self.previous = None;
            }
        }
    }

    /// One permanent tooth step: an instantaneous in-place drag of exactly
    /// one tooth (plus a tie-breaker), committed immediately.
    fn tooth_step(&mut self, direction: f64) {
        let step = direction * self.gear.tooth_step_degrees() + TOOTH_STEP_TIE_BREAKER;
        // Explicit angles measure from a zero reference, so the nudge lands
        // in the first quantization step past the boundary.
        self.state.drag_start_angle = Some(0.0);
        self.rotate_in_place(AngleInput::Degrees(step));
        self.state.initial_tooth_offset = self.state.tooth_offset;
        self.state.drag_start_angle = None;
        self.previous = None;
    }

    /// Swap the fixed shape: rebuild the rotation function, reset meshing,
    /// and replay the pose at the current angle.
    pub fn set_fixed_shape(
        &mut self,
        kind: FixedShapeKind,
        sizes: &[f64],
        sink: &mut dyn StrokeSink,
    ) -> Result<(), ShapeError> {
        self.rotator = build_rotator(kind, sizes)?;
        debug!("fixed shape changed to {kind:?}");
        self.reset_meshing();
        self.replay(sink);
        Ok(())
    }

    /// Swap the rotating gear: rebuild its options and holes, reset
    /// meshing, and replay the pose at the current angle.
    pub fn set_rotating_gear(
        &mut self,
        tooth_count: u32,
        sink: &mut dyn StrokeSink,
    ) -> Result<(), ShapeError> {
        self.gear = GearOptions::with_tooth_count(tooth_count)?;
        self.hole = self.gear.default_hole();
        debug!("rotating gear changed to {tooth_count} teeth");
        self.reset_meshing();
        self.replay(sink);
        Ok(())
    }

    /// Swap the pen hole. The next advance picks it up; no segment bridges
    /// the old hole to the new one.
    pub fn set_hole(&mut self, hole: HoleOptions) {
        self.previous = None;
        self.hole = hole;
    }

    fn reset_meshing(&mut self) {
        self.state.tooth_offset = 0;
        self.state.initial_tooth_offset = 0;
        self.previous = None;
    }

    fn replay(&mut self, sink: &mut dyn StrokeSink) {
        let wrapped = self.state.tracker.last_wrapped.unwrap_or(0.0);
        self.move_gear(AngleInput::Degrees(wrapped), sink);
    }

    /// Dispatch a bus event into the session.
    pub fn handle_event(
        &mut self,
        event: &Event,
        sink: &mut dyn StrokeSink,
    ) -> Result<(), ShapeError> {
        match event {
            Event::DragStart => {
                self.begin_drag();
                Ok(())
            }
            Event::DragEnd => {
                self.end_drag();
                Ok(())
            }
            Event::GearSelected { role: GearRole::Fixed, kind, sizes } => {
                self.set_fixed_shape(*kind, sizes, sink)
            }
            Event::GearSelected { role: GearRole::Rotating, sizes, .. } => {
                let teeth = *sizes.first().ok_or(ShapeError::SizeCount {
                    shape: "rotating gear",
                    expected: 1,
                    got: sizes.len(),
                })? as u32;
                self.set_rotating_gear(teeth, sink)
            }
            Event::HoleSelected(hole) => {
                self.set_hole(*hole);
                Ok(())
            }
        }
    }
}
