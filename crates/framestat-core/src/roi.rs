use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{FramestatError, Result};

/// Axis-aligned region of interest in image pixel coordinates.
///
/// `min` bounds are inclusive, `max` bounds exclusive, so the covered area is
/// `(max_x - min_x) x (max_y - min_y)` pixels. A missing ROI (`Option::None`)
/// means "analyze the full image".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Roi {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Roi {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<Self> {
        if min_x >= max_x || min_y >= max_y {
            return Err(FramestatError::InvalidRoi(format!(
                "({min_x},{min_y},{max_x},{max_y}) must satisfy minX < maxX and minY < maxY"
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Build an ROI from two opposite corners given in any order.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Result<Self> {
        Self::new(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Re-check the ordering invariant, e.g. after deserializing.
    pub fn validated(&self) -> Result<Self> {
        Self::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Ensure the ROI lies inside an image of the given size.
    pub fn check_within(&self, width: usize, height: usize) -> Result<()> {
        self.validated()?;
        if self.max_x as usize > width || self.max_y as usize > height {
            return Err(FramestatError::InvalidRoi(format!(
                "{self} exceeds image dimensions ({width}x{height})"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl FromStr for Roi {
    type Err = FramestatError;

    /// Parse `"minX,minY,maxX,maxY"`. Only non-negative integers are accepted.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| {
                FramestatError::InvalidRoi(format!(
                    "'{s}' is not a list of integer coordinates ({e})"
                ))
            })?;
        if parts.len() != 4 {
            return Err(FramestatError::InvalidRoi(format!(
                "'{s}' needs exactly 4 values: minX,minY,maxX,maxY"
            )));
        }
        Self::new(parts[0], parts[1], parts[2], parts[3])
    }
}

/// Rectangle tracked while a selection is in progress. Unlike [`Roi`] it may
/// have zero area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl SelectionRect {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn spanning(anchor: (u32, u32), x: u32, y: u32) -> Self {
        Self {
            min_x: anchor.0.min(x),
            min_y: anchor.1.min(y),
            max_x: anchor.0.max(x),
            max_y: anchor.1.max(y),
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn to_roi(&self) -> Result<Roi> {
        Roi::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Pointer input delivered by the display surface, in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: u32, y: u32 },
    Move { x: u32, y: u32, button_held: bool },
    Up { x: u32, y: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Dragging {
        anchor: (u32, u32),
        rect: SelectionRect,
    },
    PendingConfirm {
        rect: SelectionRect,
    },
    Confirmed {
        roi: Roi,
    },
}

/// Turns a stream of pointer events into a confirmed [`Roi`].
///
/// Exactly one selection is tracked at a time. Events are processed one by
/// one; a new pointer-down discards whatever selection is in progress.
pub struct RoiSelector {
    state: SelectionState,
    bounds: Option<(u32, u32)>,
    subscribers: Vec<Box<dyn FnMut(Roi)>>,
}

impl Default for RoiSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RoiSelector {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            bounds: None,
            subscribers: Vec::new(),
        }
    }

    /// Clamp incoming pointer coordinates to an image of `width x height`.
    pub fn with_bounds(width: u32, height: u32) -> Self {
        let mut selector = Self::new();
        selector.set_bounds(Some((width, height)));
        selector
    }

    pub fn set_bounds(&mut self, bounds: Option<(u32, u32)>) {
        self.bounds = bounds;
    }

    /// Register a callback invoked with every confirmed ROI.
    pub fn subscribe(&mut self, callback: impl FnMut(Roi) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// True once a drag has finished and is waiting for confirm/cancel.
    pub fn selection_made(&self) -> bool {
        matches!(self.state, SelectionState::PendingConfirm { .. })
    }

    /// Rectangle to draw as feedback, if any.
    pub fn live_rect(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { rect, .. } | SelectionState::PendingConfirm { rect } => {
                Some(rect)
            }
            SelectionState::Confirmed { roi } => Some(SelectionRect {
                min_x: roi.min_x,
                min_y: roi.min_y,
                max_x: roi.max_x,
                max_y: roi.max_y,
            }),
        }
    }

    pub fn confirmed(&self) -> Option<Roi> {
        match self.state {
            SelectionState::Confirmed { roi } => Some(roi),
            _ => None,
        }
    }

    fn clamp(&self, x: u32, y: u32) -> (u32, u32) {
        match self.bounds {
            Some((w, h)) => (x.min(w), y.min(h)),
            None => (x, y),
        }
    }

    /// Apply one pointer event and return the live rectangle afterwards.
    pub fn handle(&mut self, event: PointerEvent) -> Option<SelectionRect> {
        self.state = match (self.state, event) {
            (_, PointerEvent::Down { x, y }) => {
                let (x, y) = self.clamp(x, y);
                SelectionState::Dragging {
                    anchor: (x, y),
                    rect: SelectionRect::at(x, y),
                }
            }
            (
                SelectionState::Dragging { anchor, .. },
                PointerEvent::Move {
                    x,
                    y,
                    button_held: true,
                },
            ) => {
                let (x, y) = self.clamp(x, y);
                SelectionState::Dragging {
                    anchor,
                    rect: SelectionRect::spanning(anchor, x, y),
                }
            }
            (
                SelectionState::Dragging { rect, .. },
                PointerEvent::Move {
                    button_held: false,
                    ..
                },
            ) => SelectionState::PendingConfirm { rect },
            (SelectionState::Dragging { anchor, .. }, PointerEvent::Up { x, y }) => {
                let (x, y) = self.clamp(x, y);
                SelectionState::PendingConfirm {
                    rect: SelectionRect::spanning(anchor, x, y),
                }
            }
            (state, _) => state,
        };
        self.live_rect()
    }

    /// Commit the pending rectangle.
    ///
    /// A zero-area rectangle (no drag happened) is rejected and the selector
    /// goes back to `Idle`; callers should then analyze the full image.
    pub fn confirm(&mut self) -> Result<Roi> {
        let rect = match self.state {
            SelectionState::PendingConfirm { rect } => rect,
            other => {
                return Err(FramestatError::InvalidRoi(format!(
                    "no finished selection to confirm (state: {other:?})"
                )))
            }
        };

        if rect.is_empty() {
            self.state = SelectionState::Idle;
            return Err(FramestatError::InvalidRoi(format!(
                "selection {}x{} has zero area",
                rect.width(),
                rect.height()
            )));
        }

        let roi = rect.to_roi()?;
        self.state = SelectionState::Confirmed { roi };
        debug!(%roi, "ROI confirmed");
        for callback in &mut self.subscribers {
            callback(roi);
        }
        Ok(roi)
    }

    /// Drop an unconfirmed selection.
    pub fn cancel(&mut self) {
        if matches!(
            self.state,
            SelectionState::Dragging { .. } | SelectionState::PendingConfirm { .. }
        ) {
            self.state = SelectionState::Idle;
        }
    }

    /// Clear a confirmed ROI so a new selection can start.
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }
}
