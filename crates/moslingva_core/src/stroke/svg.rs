//! Polyline to SVG serialization.
//!
//! Output shape:
//! `<svg xmlns=".." width="W" height="H" viewBox="0 0 W H"><path d="M x y L x y .." .../></svg>`
//!
//! The viewBox spans the full canvas so the glyph scales without distortion.

use super::{Polyline, StrokeError};
use serde::{Deserialize, Serialize};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const PATH_ATTRIBUTES: &str = r#"stroke="white" stroke-width="3" fill="none" stroke-linecap="round" stroke-linejoin="round""#;

/// Drawing surface extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

/// Serializes one stroke into a standalone SVG document.
///
/// Identical inputs always yield byte-identical output.
///
/// # Errors
/// - `StrokeError::InvalidCanvas` when width or height is zero.
pub fn serialize_polyline(polyline: &Polyline, canvas: CanvasSize) -> Result<String, StrokeError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(StrokeError::InvalidCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }

    let path_data = polyline
        .points()
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let command = if index == 0 { "M" } else { "L" };
            format!("{command} {} {}", coordinate(point.x), coordinate(point.y))
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!(
        r#"<svg xmlns="{SVG_NAMESPACE}" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><path d="{path_data}" {PATH_ATTRIBUTES}/></svg>"#,
        w = canvas.width,
        h = canvas.height,
    ))
}

fn coordinate(value: f64) -> f64 {
    // -0 would otherwise print as "-0".
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
