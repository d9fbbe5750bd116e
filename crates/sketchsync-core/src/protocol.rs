//! The line-oriented mutation protocol.
//!
//! Each line is one complete, whitespace-tokenized command:
//!
//! ```text
//! add <id> <count> <variant> <geometry...> <rgb>
//! move <id> <dx> <dy>
//! recolor <id> <rgb>
//! delete <id>
//! ```
//!
//! For `ellipse`, `rectangle`, and `segment` the geometry is `x1 y1 x2 y2`;
//! a `polyline` carries one `segment x1 y1 x2 y2 <rgb>` group per constituent
//! followed by the polyline's own trailing `<rgb>`. Decoding is strict on
//! token count and integer parse; encoding via [`Display`](std::fmt::Display)
//! is the exact inverse.

use crate::shapes::{Ellipse, Polyline, Rectangle, Rgb, Segment, Shape};
use crate::sketch::Sketch;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a line failed to decode. Callers log these and drop the line; a bad
/// line never takes down a connection.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown shape variant `{0}`")]
    UnknownVariant(String),
    #[error("wrong field count for `{0}`")]
    FieldCount(&'static str),
    #[error("invalid integer field: {0}")]
    BadInt(#[from] std::num::ParseIntError),
}

/// One decoded mutation line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { id: u32, count: u32, shape: Shape },
    Move { id: u32, dx: i32, dy: i32 },
    Recolor { id: u32, color: Rgb },
    Delete { id: u32 },
}

impl Command {
    /// The shape id this command targets.
    pub fn id(&self) -> u32 {
        match self {
            Command::Add { id, .. }
            | Command::Move { id, .. }
            | Command::Recolor { id, .. }
            | Command::Delete { id } => *id,
        }
    }

    /// Apply this mutation to a sketch.
    ///
    /// `move`/`recolor`/`delete` on an unknown id are silent no-ops:
    /// concurrent delete/mutate races between clients are expected and
    /// benign under the broadcast-relay model.
    pub fn apply(&self, sketch: &mut Sketch) {
        match self {
            Command::Add { id, count, shape } => {
                sketch.add(*id, shape.clone(), *count);
            }
            Command::Move { id, dx, dy } => {
                if let Some(shape) = sketch.shape_mut(*id) {
                    shape.move_by(*dx, *dy);
                } else {
                    log::debug!("move for unknown shape id {id}");
                }
            }
            Command::Recolor { id, color } => {
                if let Some(shape) = sketch.shape_mut(*id) {
                    shape.set_color(*color);
                } else {
                    log::debug!("recolor for unknown shape id {id}");
                }
            }
            Command::Delete { id } => {
                if sketch.remove(*id).is_none() {
                    log::debug!("delete for unknown shape id {id}");
                }
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add { id, count, shape } => write!(f, "add {id} {count} {shape}"),
            Command::Move { id, dx, dy } => write!(f, "move {id} {dx} {dy}"),
            Command::Recolor { id, color } => write!(f, "recolor {id} {color}"),
            Command::Delete { id } => write!(f, "delete {id}"),
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let Some((&command, fields)) = tokens.split_first() else {
            return Err(ProtocolError::Empty);
        };
        match command {
            "add" => {
                if fields.len() < 2 {
                    return Err(ProtocolError::FieldCount("add"));
                }
                let id = fields[0].parse()?;
                let count = fields[1].parse()?;
                let shape = parse_shape(&fields[2..])?;
                Ok(Command::Add { id, count, shape })
            }
            "move" => {
                if fields.len() != 3 {
                    return Err(ProtocolError::FieldCount("move"));
                }
                Ok(Command::Move {
                    id: fields[0].parse()?,
                    dx: fields[1].parse()?,
                    dy: fields[2].parse()?,
                })
            }
            "recolor" => {
                if fields.len() != 2 {
                    return Err(ProtocolError::FieldCount("recolor"));
                }
                Ok(Command::Recolor {
                    id: fields[0].parse()?,
                    color: Rgb::from_packed(fields[1].parse()?),
                })
            }
            "delete" => {
                if fields.len() != 1 {
                    return Err(ProtocolError::FieldCount("delete"));
                }
                Ok(Command::Delete {
                    id: fields[0].parse()?,
                })
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse the `<variant> <geometry...> <rgb>` tail of an `add` line. Every
/// token must be consumed.
fn parse_shape(tokens: &[&str]) -> Result<Shape, ProtocolError> {
    let Some((&variant, geom)) = tokens.split_first() else {
        return Err(ProtocolError::FieldCount("add"));
    };
    match variant {
        "ellipse" => {
            let (x1, y1, x2, y2, color) = parse_corners(geom, "ellipse")?;
            Ok(Shape::Ellipse(Ellipse::new(x1, y1, x2, y2, color)))
        }
        "rectangle" => {
            let (x1, y1, x2, y2, color) = parse_corners(geom, "rectangle")?;
            Ok(Shape::Rectangle(Rectangle::new(x1, y1, x2, y2, color)))
        }
        "segment" => {
            let (x1, y1, x2, y2, color) = parse_corners(geom, "segment")?;
            Ok(Shape::Segment(Segment::new(x1, y1, x2, y2, color)))
        }
        "polyline" => {
            let mut segments = Vec::new();
            let mut rest = geom;
            while rest.first() == Some(&"segment") {
                if rest.len() < 6 {
                    return Err(ProtocolError::FieldCount("polyline"));
                }
                let (x1, y1, x2, y2, color) = parse_corners(&rest[1..6], "polyline")?;
                segments.push(Segment::new(x1, y1, x2, y2, color));
                rest = &rest[6..];
            }
            // At least one segment group, then exactly the trailing color.
            if segments.is_empty() || rest.len() != 1 {
                return Err(ProtocolError::FieldCount("polyline"));
            }
            let color = Rgb::from_packed(rest[0].parse()?);
            Ok(Shape::Polyline(Polyline::from_segments(segments, color)))
        }
        other => Err(ProtocolError::UnknownVariant(other.to_string())),
    }
}

/// Parse exactly `x1 y1 x2 y2 <rgb>`.
fn parse_corners(
    geom: &[&str],
    variant: &'static str,
) -> Result<(i32, i32, i32, i32, Rgb), ProtocolError> {
    if geom.len() != 5 {
        return Err(ProtocolError::FieldCount(variant));
    }
    Ok((
        geom[0].parse()?,
        geom[1].parse()?,
        geom[2].parse()?,
        geom[3].parse()?,
        Rgb::from_packed(geom[4].parse()?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(line: &str) -> Command {
        let cmd: Command = line.parse().expect("line should decode");
        assert_eq!(cmd.to_string(), line);
        cmd
    }

    #[test]
    fn test_add_rectangle_roundtrip() {
        let cmd = roundtrip("add 1 1 rectangle 10 10 50 50 -16777216");
        let Command::Add { id, count, shape } = cmd else {
            panic!("expected add");
        };
        assert_eq!((id, count), (1, 1));
        assert_eq!(shape.color(), Rgb::BLACK);
        assert!(matches!(shape, Shape::Rectangle(_)));
    }

    #[test]
    fn test_add_ellipse_and_segment_roundtrip() {
        roundtrip("add 2 5 ellipse 0 0 40 20 -65536");
        roundtrip("add 3 6 segment -5 -5 12 30 -16711936");
    }

    #[test]
    fn test_add_polyline_roundtrip() {
        roundtrip(
            "add 4 4 polyline segment 0 0 5 5 -16777216 segment 5 5 9 2 -16777216 -16777216",
        );
    }

    #[test]
    fn test_rectangle_corners_normalized_on_decode() {
        let cmd: Command = "add 1 1 rectangle 50 50 10 10 -16777216".parse().unwrap();
        let Command::Add { shape, .. } = cmd else {
            panic!("expected add");
        };
        // Encoding reflects the normalized corners.
        assert_eq!(shape.to_string(), "rectangle 10 10 50 50 -16777216");
    }

    #[test]
    fn test_simple_commands_roundtrip() {
        roundtrip("move 7 5 -5");
        roundtrip("recolor 7 -16776961");
        roundtrip("delete 7");
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(matches!(
            "scribble 1 2 3".parse::<Command>(),
            Err(ProtocolError::UnknownCommand(_))
        ));
        assert!(matches!("".parse::<Command>(), Err(ProtocolError::Empty)));
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(matches!(
            "add 1 1 triangle 0 0 10 10 -16777216".parse::<Command>(),
            Err(ProtocolError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_strict_field_counts() {
        assert!(matches!(
            "move 1 2".parse::<Command>(),
            Err(ProtocolError::FieldCount("move"))
        ));
        assert!(matches!(
            "move 1 2 3 4".parse::<Command>(),
            Err(ProtocolError::FieldCount("move"))
        ));
        assert!(matches!(
            "delete".parse::<Command>(),
            Err(ProtocolError::FieldCount("delete"))
        ));
        assert!(matches!(
            "add 1 1 rectangle 0 0 10 10".parse::<Command>(),
            Err(ProtocolError::FieldCount("rectangle"))
        ));
        // Polyline with a dangling segment header.
        assert!(matches!(
            "add 1 1 polyline segment 0 0 1 1 -16777216 segment -16777216"
                .parse::<Command>(),
            Err(ProtocolError::FieldCount("polyline"))
        ));
    }

    #[test]
    fn test_non_integer_field_rejected() {
        assert!(matches!(
            "move one 2 3".parse::<Command>(),
            Err(ProtocolError::BadInt(_))
        ));
    }

    #[test]
    fn test_unknown_id_mutations_are_noops() {
        let mut sketch = Sketch::new();
        "add 1 1 rectangle 10 10 50 50 -16777216"
            .parse::<Command>()
            .unwrap()
            .apply(&mut sketch);
        let before = sketch.clone();
        for line in ["move 9 5 5", "recolor 9 -65536", "delete 9"] {
            line.parse::<Command>().unwrap().apply(&mut sketch);
        }
        assert_eq!(sketch, before);
    }

    #[test]
    fn test_end_to_end_add_then_move() {
        let mut sketch = Sketch::new();
        "add 1 1 rectangle 10 10 50 50 -16777216"
            .parse::<Command>()
            .unwrap()
            .apply(&mut sketch);
        "move 1 5 5".parse::<Command>().unwrap().apply(&mut sketch);
        let Some(Shape::Rectangle(rect)) = sketch.shape(1) else {
            panic!("expected rectangle under id 1");
        };
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (15, 15, 55, 55));
    }

    #[test]
    fn test_convergence_under_same_line_order() {
        let lines = [
            "add 1 1 ellipse 0 0 40 20 -65536",
            "add 2 2 polyline segment 0 0 5 5 -16777216 -16777216",
            "move 1 10 10",
            "recolor 2 -16711936",
            "delete 1",
            "add 3 3 rectangle 2 2 8 8 -1",
            "move 99 1 1",
        ];
        let mut a = Sketch::new();
        let mut b = Sketch::new();
        for line in lines {
            let cmd: Command = line.parse().unwrap();
            cmd.apply(&mut a);
            cmd.apply(&mut b);
        }
        assert_eq!(a, b);
        assert_eq!(a.shape_count(), 3);
        assert_eq!(a.len(), 2);
    }
}
