//! Gesture states and the pointer-down routing table.
//!
//! A press is matched against [`RULES`] in order; the first rule that
//! produces an outcome wins. Label grabs come first so a label can always be
//! moved, whatever mode the canvas is in.

use shared::ObjectId;

use super::PointerId;

/// What the active pointers are currently doing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Moving the label of a point with a single pointer
    DraggingLabel { point_id: ObjectId, pointer: PointerId },
    /// Moving the whole diagram (pan mode or two fingers)
    Panning,
    /// Collecting samples of a freehand stroke
    DrawingStroke { pointer: PointerId },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::DraggingLabel { .. } => "dragging_label",
            GestureState::Panning => "panning",
            GestureState::DrawingStroke { .. } => "drawing_stroke",
        }
    }
}

/// Everything a rule may look at when a pointer goes down
#[derive(Debug, Clone, Copy)]
pub struct PressContext<'a> {
    /// Point whose label box contains the press
    pub label_hit: Option<&'a str>,
    /// Point whose grab box contains the press
    pub point_hit: Option<&'a str>,
    pub drawing_mode: bool,
    pub pan_mode: bool,
    /// Active pointers including the one just pressed
    pub pointer_count: usize,
}

/// Routing decision for a press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    DragLabel(ObjectId),
    SelectPoint(ObjectId),
    Pan,
    Draw,
    Ignore,
}

/// One entry of the routing table
pub struct GestureRule {
    pub name: &'static str,
    pub apply: fn(&PressContext) -> Option<PressOutcome>,
}

pub const RULES: &[GestureRule] = &[
    GestureRule {
        name: "label",
        apply: |ctx| ctx.label_hit.map(|id| PressOutcome::DragLabel(id.to_string())),
    },
    GestureRule {
        name: "select",
        apply: |ctx| {
            if ctx.drawing_mode || ctx.pan_mode || ctx.pointer_count != 1 {
                return None;
            }
            ctx.point_hit.map(|id| PressOutcome::SelectPoint(id.to_string()))
        },
    },
    GestureRule {
        name: "pan",
        apply: |ctx| (ctx.pan_mode || ctx.pointer_count >= 2).then_some(PressOutcome::Pan),
    },
    GestureRule {
        name: "draw",
        apply: |ctx| ctx.drawing_mode.then_some(PressOutcome::Draw),
    },
];

/// First matching rule's outcome, [`PressOutcome::Ignore`] when none match
pub fn dispatch(ctx: &PressContext) -> PressOutcome {
    RULES
        .iter()
        .find_map(|rule| {
            let outcome = (rule.apply)(ctx)?;
            tracing::debug!("Press routed by '{}' rule", rule.name);
            Some(outcome)
        })
        .unwrap_or(PressOutcome::Ignore)
}
