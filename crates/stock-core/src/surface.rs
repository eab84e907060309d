// File: crates/stock-core/src/surface.rs
// Summary: Drawing surface seam; paints path graphics onto a Skia canvas.

use skia_safe as skia;

use crate::glyph::{Graphic, PathSegment};

/// Anything that can paint a path graphic in its current coordinate frame.
pub trait Surface {
    fn draw_graphic(&mut self, graphic: &Graphic);
}

/// Convert path segments to a Skia path.
pub fn to_skia_path(segments: &[PathSegment]) -> skia::Path {
    let mut path = skia::Path::new();
    for seg in segments {
        match *seg {
            PathSegment::MoveTo(x, y) => {
                path.move_to((x as f32, y as f32));
            }
            PathSegment::LineTo(x, y) => {
                path.line_to((x as f32, y as f32));
            }
            PathSegment::Close => {
                path.close();
            }
        }
    }
    path
}

pub struct SkiaSurface<'a> {
    canvas: &'a skia::Canvas,
    anti_alias: bool,
}

impl<'a> SkiaSurface<'a> {
    pub fn new(canvas: &'a skia::Canvas) -> Self {
        // crisp glyphs already sit on pixel boundaries
        Self { canvas, anti_alias: false }
    }

    pub fn with_anti_alias(mut self, on: bool) -> Self {
        self.anti_alias = on;
        self
    }
}

impl Surface for SkiaSurface<'_> {
    fn draw_graphic(&mut self, graphic: &Graphic) {
        let path = to_skia_path(&graphic.segments);
        if let Some(fill) = graphic.attrs.fill {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(self.anti_alias);
            paint.set_style(skia::paint::Style::Fill);
            paint.set_color(fill);
            self.canvas.draw_path(&path, &paint);
        }
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(self.anti_alias);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(graphic.attrs.stroke_width);
        stroke.set_color(graphic.attrs.stroke);
        self.canvas.draw_path(&path, &stroke);
    }
}
