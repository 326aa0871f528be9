//! Parse query lines into bomb commands
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! a i j [h|v]        anteparo over ids i..=j
//! d x y [sfx]        destroy
//! p x y color [sfx]  paint
//! cln x y dx dy [sfx] clone
//! ```

use std::str::{FromStr, SplitWhitespace};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VisError};
use crate::core::types::{Orientation, ShapeId};
use crate::geometry::Point2D;

/// A single bomb command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BombCommand {
    Anteparo {
        first: ShapeId,
        last: ShapeId,
        orientation: Orientation,
    },
    Destroy {
        point: Point2D,
    },
    Paint {
        point: Point2D,
        color: String,
    },
    Clone {
        point: Point2D,
        offset: Vec2,
    },
}

impl BombCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BombCommand::Anteparo { .. } => "anteparo",
            BombCommand::Destroy { .. } => "destroy",
            BombCommand::Paint { .. } => "paint",
            BombCommand::Clone { .. } => "clone",
        }
    }

    /// Observer point of the visibility-driven commands
    pub fn observer(&self) -> Option<Point2D> {
        match self {
            BombCommand::Anteparo { .. } => None,
            BombCommand::Destroy { point }
            | BombCommand::Paint { point, .. }
            | BombCommand::Clone { point, .. } => Some(*point),
        }
    }
}

/// A parsed command with its source line and optional output suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLine {
    pub line: usize,
    pub command: BombCommand,
    pub suffix: Option<String>,
}

struct Tokens<'a> {
    line: usize,
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_str(&mut self, what: &str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| VisError::malformed(self.line, format!("missing {what}")))
    }

    fn next_num<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_str(what)?;
        token
            .parse()
            .map_err(|_| VisError::malformed(self.line, format!("{what} '{token}' is not a number")))
    }

    fn next_point(&mut self) -> Result<Point2D> {
        Ok(Vec2::new(self.next_num("x")?, self.next_num("y")?))
    }

    fn optional(&mut self) -> Option<String> {
        self.inner.next().map(str::to_string)
    }
}

/// Parse one line; blank lines and `#` comments yield `None`
pub fn parse_line(line: usize, text: &str) -> Result<Option<QueryLine>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = Tokens {
        line,
        inner: text.split_whitespace(),
    };
    let verb = tokens.next_str("command")?;

    let (command, suffix) = match verb {
        "a" => {
            let first = ShapeId(tokens.next_num("first id")?);
            let last = ShapeId(tokens.next_num("last id")?);
            let orientation = tokens
                .optional()
                .map(|flag| Orientation::from_flag(&flag))
                .unwrap_or(Orientation::Vertical);
            (
                BombCommand::Anteparo {
                    first,
                    last,
                    orientation,
                },
                None,
            )
        }
        "d" => {
            let point = tokens.next_point()?;
            (BombCommand::Destroy { point }, tokens.optional())
        }
        "p" => {
            let point = tokens.next_point()?;
            let color = tokens.next_str("color")?.to_string();
            (BombCommand::Paint { point, color }, tokens.optional())
        }
        "cln" => {
            let point = tokens.next_point()?;
            let offset = Vec2::new(tokens.next_num("dx")?, tokens.next_num("dy")?);
            (BombCommand::Clone { point, offset }, tokens.optional())
        }
        other => {
            return Err(VisError::malformed(line, format!("unknown command '{other}'")));
        }
    };

    Ok(Some(QueryLine {
        line,
        command,
        suffix,
    }))
}

/// Parse a whole query file, one entry per non-blank line
///
/// Line numbers are 1-based. Malformed lines come back as errors in place
/// so the caller decides whether to skip them.
pub fn parse_query(source: &str) -> Vec<Result<QueryLine>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, text)| parse_line(idx + 1, text).transpose())
        .collect()
}
