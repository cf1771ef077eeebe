//! Script execution.

use crate::script::{Script, Step};
use inkboard_core::{Board, ConfigError, Interaction, Modifiers};
use inkboard_render::{RenderError, SvgSurface, Theme, paint_frame};
use kurbo::{Point, Size, Vec2};
use peniko::Color;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[source] serde_json::Error),
    #[error("Board serialization failed: {0}")]
    Board(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Read and parse a script file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Script, ReplayError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Script::from_json(&json).map_err(ReplayError::Script)
}

/// A board and the interaction state driving it.
#[derive(Debug)]
pub struct Replay {
    pub interaction: Interaction,
    pub board: Board,
    size: Size,
}

impl Replay {
    /// Set up the starting state of a script.
    pub fn new(script: &Script) -> Result<Self, ReplayError> {
        let config = script.config.clone().unwrap_or_default();
        config.validate()?;
        let mut interaction = Interaction::new(config);
        if let Some(viewport) = &script.viewport {
            let target = interaction.viewport_mut();
            target.offset = viewport.offset;
            target.set_zoom(viewport.zoom());
        }

        let mut board = Board::new();
        for element in &script.elements {
            if let Err(err) = board.insert(element.clone()) {
                log::warn!("Skipping element {}: {err}", element.id);
            }
        }

        let [width, height] = script.canvas_size;
        Ok(Self {
            interaction,
            board,
            size: Size::new(width, height),
        })
    }

    /// Run every step of `script` from its starting state.
    pub fn run(script: &Script) -> Result<Self, ReplayError> {
        let mut replay = Self::new(script)?;
        for step in &script.steps {
            replay.apply(step);
        }
        log::info!("Replayed {} steps, {} elements on board", script.steps.len(), replay.board.len());
        Ok(replay)
    }

    /// Feed one step to the interaction core.
    pub fn apply(&mut self, step: &Step) {
        log::debug!("Step {step:?}");
        // The core reads a snapshot while the board receives the mutations
        let snapshot = self.board.elements().to_vec();
        let ix = &mut self.interaction;
        let board = &mut self.board;
        match step {
            Step::Tool { tool } => ix.set_tool(*tool, board),
            Step::Modifiers { shift } => ix.set_modifiers(Modifiers { shift: *shift }),
            Step::Down { .. } | Step::Move { .. } | Step::Up { .. } => {
                let Some(point) = step.point() else {
                    return;
                };
                match step {
                    Step::Down { .. } => ix.pointer_down(&snapshot, point, board),
                    Step::Move { .. } => ix.pointer_move(point),
                    _ => ix.pointer_up(&snapshot, point, board),
                }
            }
            Step::Pan { dx, dy } => ix.viewport_mut().pan(Vec2::new(*dx, *dy)),
            Step::Zoom { x, y, factor } => ix.viewport_mut().zoom_at(Point::new(*x, *y), *factor),
            Step::Text { content } => {
                if ix.commit_text(&snapshot, content, board).is_none() {
                    log::warn!("Text step ignored: no pending text anchor or empty content");
                }
            }
            Step::Style {
                stroke_width,
                opacity,
                font_size,
            } => {
                let style = ix.style_mut();
                if let Some(width) = stroke_width {
                    style.style = style.style.clone().with_stroke_width(*width);
                }
                if let Some(opacity) = opacity {
                    style.style = style.style.clone().with_opacity(*opacity);
                }
                if let Some(size) = font_size
                    && size.is_finite()
                    && *size > 0.0
                {
                    style.font_size = *size;
                }
            }
            Step::SelectAll => ix.select_all(&snapshot, board),
            Step::ClearSelection => ix.clear_selection(board),
            Step::BringToFront => ix.bring_to_front(&snapshot, board),
            Step::SendToBack => ix.send_to_back(&snapshot, board),
            Step::BringForward => ix.bring_forward(&snapshot, board),
            Step::SendBackward => ix.send_backward(&snapshot, board),
            Step::Cancel => ix.cancel(),
        }
    }

    /// Render the current frame as SVG.
    pub fn render_svg(&self) -> Result<String, ReplayError> {
        let frame = self.interaction.compose_frame(self.board.elements());
        let mut surface = SvgSurface::new(self.size).with_background(Color::from_rgba8(250, 250, 250, 255));
        paint_frame(&frame, &mut surface, &Theme::default());
        Ok(surface.finish()?)
    }

    /// Board contents as JSON.
    pub fn board_json(&self) -> Result<String, ReplayError> {
        self.board.to_json().map_err(ReplayError::Board)
    }

    /// Write the board JSON to `path`.
    pub fn write_board(&self, path: &Path) -> Result<(), ReplayError> {
        let json = self.board_json()?;
        std::fs::write(path, json).map_err(|source| ReplayError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the current frame as SVG to `path`.
    pub fn write_svg(&self, path: &Path) -> Result<(), ReplayError> {
        let svg = self.render_svg()?;
        std::fs::write(path, svg).map_err(|source| ReplayError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
