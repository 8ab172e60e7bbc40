use log::warn;
use serde::{Deserialize, Serialize};

use crate::bitmap::{Bitmap, Ink};
use crate::error::PlotError;
use crate::geometry::Point;

/// One recorded mark, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotCommand {
    Point { x: i32, y: i32 },
    Line { x0: i32, y0: i32, x1: i32, y1: i32 },
}

impl PlotCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PlotCommand::Point { .. } => "point",
            PlotCommand::Line { .. } => "line",
        }
    }

    pub fn args(&self) -> Vec<i32> {
        match *self {
            PlotCommand::Point { x, y } => vec![x, y],
            PlotCommand::Line { x0, y0, x1, y1 } => vec![x0, y0, x1, y1],
        }
    }

    fn from_named(command: &NamedCommand) -> Option<Self> {
        match (command.name.as_str(), command.args.as_slice()) {
            ("point", &[x, y]) => Some(PlotCommand::Point { x, y }),
            ("line", &[x0, y0, x1, y1]) => Some(PlotCommand::Line { x0, y0, x1, y1 }),
            _ => None,
        }
    }

    /// Draw with `map` turning cell coordinates into target pixels.
    pub fn draw(&self, target: &mut Bitmap, color: Ink, map: impl Fn(i32, i32) -> Point) {
        match *self {
            PlotCommand::Point { x, y } => {
                let p = map(x, y);
                target.plot(p.x, p.y, color);
            }
            PlotCommand::Line { x0, y0, x1, y1 } => {
                target.line(map(x0, y0), map(x1, y1), color);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NamedCommand {
    name: String,
    args: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DrawingFile {
    resolution: [i32; 2],
    #[serde(default)]
    date: String,
    commands: Vec<NamedCommand>,
}

/// A drawing ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDrawing {
    pub filename: String,
    pub data: String,
}

/// Serialise `commands` as indented JSON, named after `timestamp`.
pub fn encode(commands: &[PlotCommand], resolution: [i32; 2], timestamp: u64) -> Result<EncodedDrawing, PlotError> {
    let file = DrawingFile {
        resolution,
        date: timestamp.to_string(),
        commands: commands
            .iter()
            .map(|c| NamedCommand {
                name: c.name().to_owned(),
                args: c.args(),
            })
            .collect(),
    };
    Ok(EncodedDrawing {
        filename: format!("{timestamp}.json"),
        data: serde_json::to_string_pretty(&file)?,
    })
}

/// Parse a drawing. Commands with an unknown name or the wrong number of
/// arguments are skipped.
pub fn decode(json: &str) -> Result<Vec<PlotCommand>, PlotError> {
    let file: DrawingFile = serde_json::from_str(json)?;
    Ok(file
        .commands
        .iter()
        .filter_map(|named| {
            let command = PlotCommand::from_named(named);
            if command.is_none() {
                warn!("Skipping command {:?} with args {:?}", named.name, named.args);
            }
            command
        })
        .collect())
}
