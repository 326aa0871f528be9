//! Command execution - applies bomb commands to the city

use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::command::diagnostics::DiagnosticSink;
use crate::command::parser::{BombCommand, QueryLine};
use crate::core::config::{config, VisibilityConfig};
use crate::core::error::Result;
use crate::core::types::ShapeId;
use crate::geometry::Point2D;
use crate::visibility::{convert_to_barriers, crossing_barriers, VisibilityContext};

/// Result of executing one command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub command: String,
    pub line: Option<usize>,
    pub observer: Option<Point2D>,
    /// Shapes destroyed, painted, cloned or converted
    pub affected: Vec<ShapeId>,
    /// Shapes created by the command (barriers or clones)
    pub created: Vec<ShapeId>,
    /// `(original, clone)` pairs, clone commands only
    pub clones: Vec<(ShapeId, ShapeId)>,
}

impl CommandOutcome {
    fn new(command: &BombCommand) -> Self {
        Self {
            command: command.name().to_string(),
            observer: command.observer(),
            ..Default::default()
        }
    }
}

/// Summary of a whole command stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<CommandOutcome>,
    pub skipped: usize,
    pub highest_id: ShapeId,
}

/// Applies bomb commands one at a time
///
/// Holds no state between commands; every visibility context lives only for
/// the command that built it.
pub struct BombProcessor<'a> {
    config: VisibilityConfig,
    sink: Option<&'a mut dyn DiagnosticSink>,
}

impl<'a> BombProcessor<'a> {
    /// Processor using the global config
    pub fn new() -> Self {
        Self::with_config(config().clone())
    }

    pub fn with_config(config: VisibilityConfig) -> Self {
        Self { config, sink: None }
    }

    /// Record every computed region into `sink`
    pub fn with_sink(mut self, sink: &'a mut dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Execute a single command against the city
    ///
    /// Commands that match nothing are a no-op, not an error.
    pub fn execute(
        &mut self,
        city: &mut City,
        command: &BombCommand,
        label: Option<&str>,
    ) -> Result<CommandOutcome> {
        let mut outcome = CommandOutcome::new(command);

        match command {
            BombCommand::Anteparo {
                first,
                last,
                orientation,
            } => {
                for (source, created) in convert_to_barriers(city, *first, *last, *orientation) {
                    outcome.affected.push(source);
                    outcome.created.extend(created);
                }
                for (a, b) in crossing_barriers(city, &outcome.created) {
                    tracing::warn!(%a, %b, "barriers cross, visibility may be wrong near them");
                }
            }
            BombCommand::Destroy { point } => {
                outcome.affected = self.select(city, *point, label)?;
                for id in &outcome.affected {
                    if let Some(shape) = city.remove_by_id(*id) {
                        tracing::debug!(%id, kind = shape.kind().name(), "destroyed");
                    }
                }
            }
            BombCommand::Paint { point, color } => {
                outcome.affected = self.select(city, *point, label)?;
                for id in &outcome.affected {
                    if let Some(shape) = city.get_mut(*id) {
                        shape.set_color(color);
                        tracing::debug!(%id, kind = shape.kind().name(), color, "painted");
                    }
                }
            }
            BombCommand::Clone { point, offset } => {
                outcome.affected = self.select(city, *point, label)?;

                let mut copies = Vec::new();
                copies.try_reserve(outcome.affected.len())?;
                for id in &outcome.affected {
                    let new_id = city.next_id();
                    copies.push(city.require(*id)?.cloned_with(new_id, *offset));
                    outcome.clones.push((*id, new_id));
                    outcome.created.push(new_id);
                }
                for copy in copies {
                    city.append(copy);
                }
            }
        }

        tracing::info!(
            command = command.name(),
            affected = outcome.affected.len(),
            created = outcome.created.len(),
            "command executed"
        );
        Ok(outcome)
    }

    /// Build the visibility context for `observer` and list the shapes it selects
    fn select(&mut self, city: &City, observer: Point2D, label: Option<&str>) -> Result<Vec<ShapeId>> {
        let ctx = VisibilityContext::build(city, observer, &self.config)?;
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.record(label, ctx.region());
        }
        Ok(ctx.visible_shapes(city))
    }

    /// Execute a parsed query stream in order
    ///
    /// Recoverable errors (malformed lines, missing shapes) are logged and the
    /// command skipped; anything else stops the run.
    pub fn run<I>(&mut self, city: &mut City, lines: I) -> Result<RunReport>
    where
        I: IntoIterator<Item = Result<QueryLine>>,
    {
        let mut report = RunReport::default();

        for entry in lines {
            let executed = entry.and_then(|query| {
                self.execute(city, &query.command, query.suffix.as_deref())
                    .map(|outcome| CommandOutcome {
                        line: Some(query.line),
                        ..outcome
                    })
            });

            match executed {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "skipping command");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        report.highest_id = city.highest_id();
        Ok(report)
    }
}

impl Default for BombProcessor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{BarrierShape, Circle, Shape};
    use crate::command::diagnostics::RegionLog;
    use crate::command::parser::parse_query;
    use crate::geometry::Segment;
    use glam::Vec2;

    fn circle(id: u32, x: f32, y: f32) -> Shape {
        Shape::Circle(Circle {
            id: ShapeId(id),
            center: Vec2::new(x, y),
            radius: 5.0,
            stroke: "black".into(),
            fill: "white".into(),
        })
    }

    /// Two circles, the second hidden behind a wall from the left
    fn walled_city() -> City {
        let mut city = City::new();
        city.append(circle(1, 20.0, 50.0));
        city.append(circle(2, 90.0, 50.0));
        city.append(Shape::Barrier(BarrierShape {
            id: ShapeId(3),
            segment: Segment::from_coords(60.0, 0.0, 60.0, 100.0),
            color: "gray".into(),
        }));
        city
    }

    #[test]
    fn test_execute_paint_only_visible() {
        let mut city = walled_city();
        let mut processor = BombProcessor::with_config(VisibilityConfig::default());
        let command = BombCommand::Paint {
            point: Vec2::new(0.0, 50.0),
            color: "red".into(),
        };

        let outcome = processor.execute(&mut city, &command, None).unwrap();

        assert_eq!(outcome.affected, vec![ShapeId(1), ShapeId(3)]);
        match city.get(ShapeId(2)).unwrap() {
            Shape::Circle(c) => assert_eq!(c.fill, "white"),
            other => panic!("unexpected {other:?}"),
        }
        match city.get(ShapeId(1)).unwrap() {
            Shape::Circle(c) => {
                assert_eq!(c.fill, "red");
                assert_eq!(c.stroke, "red");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_execute_clone_assigns_fresh_ids() {
        let mut city = walled_city();
        let mut processor = BombProcessor::with_config(VisibilityConfig::default());
        let command = BombCommand::Clone {
            point: Vec2::new(0.0, 50.0),
            offset: Vec2::new(0.0, 200.0),
        };

        let outcome = processor.execute(&mut city, &command, None).unwrap();

        assert_eq!(outcome.clones, vec![(ShapeId(1), ShapeId(4)), (ShapeId(3), ShapeId(5))]);
        assert_eq!(city.len(), 5);
        match city.get(ShapeId(4)).unwrap() {
            Shape::Circle(c) => assert_eq!(c.center, Vec2::new(20.0, 250.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_run_skips_malformed_and_records_regions() {
        let mut city = walled_city();
        let mut log = RegionLog::new();
        let report = {
            let mut processor =
                BombProcessor::with_config(VisibilityConfig::default()).with_sink(&mut log);
            processor
                .run(&mut city, parse_query("d 0\nd 0 50 -\na 2 2 h\n"))
                .unwrap()
        };

        assert_eq!(report.skipped, 1);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].line, Some(2));
        assert_eq!(report.outcomes[0].affected, vec![ShapeId(1), ShapeId(3)]);
        assert_eq!(report.outcomes[1].created, vec![ShapeId(4)]);
        assert_eq!(report.highest_id, ShapeId(4));
        assert_eq!(log.len(), 1);
        assert_eq!(log.records[0].label.as_deref(), Some("-"));
    }
}
