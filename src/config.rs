use serde::{Deserialize, Serialize};

/// Which piece the host is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceKind {
    #[default]
    Pull,
    Plot,
}

impl PieceKind {
    pub const ALL: [PieceKind; 2] = [PieceKind::Pull, PieceKind::Plot];

    pub fn label(&self) -> &'static str {
        match self {
            PieceKind::Pull => "Pull",
            PieceKind::Plot => "Plot",
        }
    }
}

/// Host settings, persisted through eframe storage between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct HostConfig {
    pub piece: PieceKind,
    /// Screen pixels per canvas pixel.
    pub scale: f32,
    /// Path last typed into the plot "Open" field.
    pub open_path: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            piece: PieceKind::Pull,
            scale: 8.0,
            open_path: "drawings/default.json".to_owned(),
        }
    }
}

/// Boot parameters for the pull piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullConfig {
    pub width: u32,
    pub height: u32,
    /// Width of the 1-row history strip; two pixels per turn.
    pub history_width: u32,
    /// Frames between outline blink toggles while placing.
    pub blink_interval: u32,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            history_width: 64,
            blink_interval: 60,
        }
    }
}
