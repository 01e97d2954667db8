//! Scale Controller and the zoom state machine.
//!
//! Zoom never touches the data; it only stretches the value axis and the
//! bar width. Every input is clamped so the axis range stays positive.

use crate::series::DATA_MAX_SENTINEL;
use dairy_utils::round::round_1;
use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f64 = 0.4;
pub const ZOOM_MAX: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.2;
pub const ZOOM_DEFAULT: f64 = 1.0;

/// Space left above the tallest bar, as a factor of `dataMax`.
pub const AXIS_HEADROOM: f64 = 1.2;
/// Bar width at zoom 1.0, in percent of the category slot.
pub const BASE_COLUMN_WIDTH_PCT: f64 = 60.0;
pub const MAX_COLUMN_WIDTH_PCT: f64 = 90.0;

pub const CHART_HEIGHT: u32 = 400;
pub const FULLSCREEN_CHART_HEIGHT: u32 = 600;
pub const MIN_CHART_WIDTH_PX: u32 = 800;
pub const CATEGORY_WIDTH_PX: u32 = 80;

/// Current zoom level, always within `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    level: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            level: ZOOM_DEFAULT,
        }
    }
}

impl ZoomState {
    /// Start at `level`, clamped into range.
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_zoom(level),
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Step the level down by [`ZOOM_STEP`], stopping at [`ZOOM_MIN`].
    ///
    /// Returns false when already at the floor.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.level = round_1(self.level - ZOOM_STEP).max(ZOOM_MIN);
        true
    }

    /// Step the level up by [`ZOOM_STEP`], stopping at [`ZOOM_MAX`].
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.level = round_1(self.level + ZOOM_STEP).min(ZOOM_MAX);
        true
    }

    /// Back to 1.0; done whenever the filter mode changes.
    pub fn reset(&mut self) {
        self.level = ZOOM_DEFAULT;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level > ZOOM_MIN
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level < ZOOM_MAX
    }
}

fn clamp_zoom(level: f64) -> f64 {
    if level.is_finite() {
        level.clamp(ZOOM_MIN, ZOOM_MAX)
    } else {
        ZOOM_DEFAULT
    }
}

/// Geometry handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub axis_max: f64,
    pub column_width_pct: f64,
    pub chart_height: u32,
}

/// Derive axis bound and bar geometry from `data_max` and `zoom_level`.
///
/// A larger zoom level shrinks the axis range and widens bars, capped at
/// [`MAX_COLUMN_WIDTH_PCT`]. Non-positive or non-finite `data_max` falls
/// back to the sentinel, so `axis_max > 0` always.
pub fn compute_scale(data_max: f64, zoom_level: f64, fullscreen: bool) -> Scale {
    let level = clamp_zoom(zoom_level);
    let data_max = if data_max.is_finite() && data_max > 0.0 {
        data_max
    } else {
        DATA_MAX_SENTINEL
    };
    Scale {
        axis_max: (data_max * AXIS_HEADROOM) / level,
        column_width_pct: (BASE_COLUMN_WIDTH_PCT * level).min(MAX_COLUMN_WIDTH_PCT),
        chart_height: if fullscreen {
            FULLSCREEN_CHART_HEIGHT
        } else {
            CHART_HEIGHT
        },
    }
}

/// Minimum drawing width so each category keeps its slot; wider charts scroll.
pub fn min_chart_width(categories: usize) -> u32 {
    let wanted = u32::try_from(categories)
        .unwrap_or(u32::MAX)
        .saturating_mul(CATEGORY_WIDTH_PX);
    wanted.max(MIN_CHART_WIDTH_PX)
}
