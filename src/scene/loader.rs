//! Load a city from a scene-description file
//!
//! ```text
//! c  id x y r stroke fill
//! r  id x y w h stroke fill
//! l  id x1 y1 x2 y2 color
//! t  id x y stroke fill anchor text...
//! ts family weight size
//! ```
//!
//! A `ts` line sets the style of every text that follows it.

use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use glam::Vec2;

use crate::city::{Circle, City, Line, Rectangle, Shape, Text, TextStyle};
use crate::core::error::{Result, VisError};
use crate::core::types::{ShapeId, TextAnchor};
use crate::geometry::Segment;

/// Line-by-line scene parser
#[derive(Debug, Default)]
pub struct SceneLoader {
    style: TextStyle,
    skipped: usize,
}

impl SceneLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines rejected so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Parse a whole scene, skipping malformed lines with a warning
    pub fn load_str(&mut self, source: &str) -> City {
        let mut city = City::new();
        for (idx, text) in source.lines().enumerate() {
            match self.parse_line(idx + 1, text) {
                Ok(Some(shape)) => city.append(shape),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "skipping scene line");
                    self.skipped += 1;
                }
            }
        }
        tracing::info!(shapes = city.len(), skipped = self.skipped, "scene loaded");
        city
    }

    pub fn load_file(&mut self, path: &Path) -> Result<City> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.load_str(&content))
    }

    /// Parse one line; style lines and blanks produce no shape
    pub fn parse_line(&mut self, line: usize, text: &str) -> Result<Option<Shape>> {
        let text = text.trim();
        let mut tokens = Fields {
            line,
            inner: text.split_whitespace(),
        };
        let Some(verb) = tokens.inner.next() else {
            return Ok(None);
        };

        let shape = match verb {
            "c" => Shape::Circle(Circle {
                id: tokens.id()?,
                center: tokens.point()?,
                radius: tokens.num("radius")?,
                stroke: tokens.word("stroke")?,
                fill: tokens.word("fill")?,
            }),
            "r" => Shape::Rectangle(Rectangle {
                id: tokens.id()?,
                origin: tokens.point()?,
                width: tokens.num("width")?,
                height: tokens.num("height")?,
                stroke: tokens.word("stroke")?,
                fill: tokens.word("fill")?,
            }),
            "l" => {
                let id = tokens.id()?;
                let start = tokens.point()?;
                let end = tokens.point()?;
                Shape::Line(Line {
                    id,
                    segment: Segment::new(start, end),
                    color: tokens.word("color")?,
                })
            }
            "t" => {
                let id = tokens.id()?;
                let position = tokens.point()?;
                let stroke = tokens.word("stroke")?;
                let fill = tokens.word("fill")?;
                let anchor = TextAnchor::from_flag(&tokens.word("anchor")?);
                let content = tokens.inner.by_ref().collect::<Vec<_>>().join(" ");
                Shape::Text(Text {
                    id,
                    position,
                    stroke,
                    fill,
                    anchor,
                    content,
                    style: self.style.clone(),
                })
            }
            "ts" => {
                self.style = TextStyle {
                    family: tokens.word("font family")?,
                    weight: tokens.word("font weight")?,
                    size: tokens.num("font size")?,
                };
                return Ok(None);
            }
            other => {
                return Err(VisError::malformed(line, format!("unknown shape '{other}'")));
            }
        };

        Ok(Some(shape))
    }
}

struct Fields<'a> {
    line: usize,
    inner: SplitWhitespace<'a>,
}

impl Fields<'_> {
    fn word(&mut self, what: &str) -> Result<String> {
        self.inner
            .next()
            .map(str::to_string)
            .ok_or_else(|| VisError::malformed(self.line, format!("missing {what}")))
    }

    fn num<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.word(what)?;
        token
            .parse()
            .map_err(|_| VisError::malformed(self.line, format!("{what} '{token}' is not a number")))
    }

    fn id(&mut self) -> Result<ShapeId> {
        Ok(ShapeId(self.num("id")?))
    }

    fn point(&mut self) -> Result<Vec2> {
        Ok(Vec2::new(self.num("x")?, self.num("y")?))
    }
}

/// Parse a scene from a string with a fresh loader
pub fn load_scene(source: &str) -> City {
    SceneLoader::new().load_str(source)
}
