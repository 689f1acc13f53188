//! Crop anchor derivation: focal points and position strings.
//!
//! The backend accepts a gravity token like `"left top"` or `"right"` inside
//! the resize group. Two sources feed it: an editor-set focal point on the
//! asset (fractional coordinates, bucketed into a 3×3 grid here) or an
//! explicit `"<horizontal>-<vertical>"` position override on the request.
//! The focal point wins when both are present.
//!
//! Canonical position ordering is horizontal-first (`left-top`, not
//! `top-left`) — see DESIGN.md for the history.

use crate::asset::FocalPoint;

/// Zone thresholds for focal-point bucketing: below the first third is the
/// low edge, past the second third is the high edge, the middle is center.
const ZONE_LOW: f64 = 0.33;
const ZONE_HIGH: f64 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

impl Horizontal {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Center,
    Bottom,
}

impl Vertical {
    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// A validated crop anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Position {
    /// Bucket a focal point into the 3×3 anchor grid.
    ///
    /// Each axis compares against the 0.33/0.66 thresholds independently:
    /// `{0.1, 0.1}` → left-top, `{0.5, 0.9}` → center-bottom.
    pub fn from_focal_point(focal: FocalPoint) -> Self {
        let horizontal = if focal.x < ZONE_LOW {
            Horizontal::Left
        } else if focal.x < ZONE_HIGH {
            Horizontal::Center
        } else {
            Horizontal::Right
        };
        let vertical = if focal.y < ZONE_LOW {
            Vertical::Top
        } else if focal.y < ZONE_HIGH {
            Vertical::Center
        } else {
            Vertical::Bottom
        };
        Self { horizontal, vertical }
    }

    /// Parse a `"<horizontal>-<vertical>"` position string like `"left-top"`.
    ///
    /// Anything that doesn't match the pattern exactly yields `None` and the
    /// gravity field is simply omitted — a bad override never fails a build.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, v) = s.split_once('-')?;
        Some(Self {
            horizontal: Horizontal::parse(h)?,
            vertical: Vertical::parse(v)?,
        })
    }

    /// The backend's gravity token: center components dropped, the rest
    /// joined with a space. True center yields `None` — anchoring at the
    /// center is the backend default, so emitting it would only churn URLs.
    pub fn gravity_token(self) -> Option<String> {
        match (self.horizontal, self.vertical) {
            (Horizontal::Center, Vertical::Center) => None,
            (h, Vertical::Center) => Some(h.as_str().to_string()),
            (Horizontal::Center, v) => Some(v.as_str().to_string()),
            (h, v) => Some(format!("{} {}", h.as_str(), v.as_str())),
        }
    }
}

/// Resolve the gravity token for a build: focal point first, then the
/// request's position override, then nothing.
pub fn resolve(focal: Option<FocalPoint>, position: Option<&str>) -> Option<String> {
    let position = match focal {
        Some(focal) => Some(Position::from_focal_point(focal)),
        None => position.filter(|p| !p.is_empty()).and_then(Position::parse),
    };
    position.and_then(Position::gravity_token)
}
