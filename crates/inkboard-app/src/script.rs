//! Gesture script format.

use inkboard_core::{Element, InteractionConfig, ToolKind, Viewport};
use kurbo::Point;
use serde::{Deserialize, Serialize};

fn default_canvas_size() -> [f64; 2] {
    [1024.0, 768.0]
}

/// A replayable session: starting state plus a list of input steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Interaction tuning; defaults apply when absent.
    #[serde(default)]
    pub config: Option<InteractionConfig>,
    /// Board contents before the first step.
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Size of the exported SVG, in screen pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: [f64; 2],
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One input event. Pointer coordinates are in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    Modifiers { shift: bool },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Pan by a screen delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom by `factor` around a screen point.
    Zoom { x: f64, y: f64, factor: f64 },
    /// Commit text at the last text-tool click.
    Text { content: String },
    /// Change the style used for new elements.
    Style {
        #[serde(default)]
        stroke_width: Option<u32>,
        #[serde(default)]
        opacity: Option<f64>,
        #[serde(default)]
        font_size: Option<f64>,
    },
    SelectAll,
    ClearSelection,
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
    Cancel,
}

impl Step {
    /// Screen point of a pointer step.
    pub fn point(&self) -> Option<Point> {
        match self {
            Step::Down { x, y } | Step::Move { x, y } | Step::Up { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_script() {
        let script = Script::from_json(r#"{ "steps": [] }"#).unwrap();
        assert!(script.config.is_none());
        assert!(script.elements.is_empty());
        assert_eq!(script.canvas_size, [1024.0, 768.0]);
    }

    #[test]
    fn test_parse_steps() {
        let json = r#"{
            "steps": [
                { "op": "tool", "tool": "rectangle" },
                { "op": "modifiers", "shift": true },
                { "op": "down", "x": 1.0, "y": 2.0 },
                { "op": "style", "stroke_width": 4 },
                { "op": "select_all" },
                { "op": "bring_to_front" }
            ]
        }"#;
        let script = Script::from_json(json).unwrap();
        assert_eq!(script.steps[0], Step::Tool { tool: ToolKind::Rectangle });
        assert_eq!(script.steps[2].point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(
            script.steps[3],
            Step::Style {
                stroke_width: Some(4),
                opacity: None,
                font_size: None
            }
        );
        assert_eq!(script.steps[5], Step::BringToFront);
    }

    #[test]
    fn test_unknown_op_is_an_error() {
        assert!(Script::from_json(r#"{ "steps": [{ "op": "teleport" }] }"#).is_err());
    }
}
