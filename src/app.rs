use std::path::Path;

use log::{info, warn};

use crate::bitmap::Bitmap;
use crate::config::{HostConfig, PieceKind, PullConfig};
use crate::input::{InputHandler, Pen};
use crate::piece::{Cursor, Piece};
use crate::plot::PlotPiece;
use crate::pull::PullPiece;
use crate::renderer::Renderer;
use crate::util::time;

enum ActivePiece {
    Pull(PullPiece),
    Plot(PlotPiece),
}

impl ActivePiece {
    fn boot(kind: PieceKind) -> Self {
        info!("Booting {} piece", kind.label());
        match kind {
            PieceKind::Pull => Self::Pull(PullPiece::new(&PullConfig::default())),
            PieceKind::Plot => Self::Plot(PlotPiece::new()),
        }
    }

    fn as_piece(&self) -> &dyn Piece {
        match self {
            Self::Pull(piece) => piece,
            Self::Plot(piece) => piece,
        }
    }

    fn as_piece_mut(&mut self) -> &mut dyn Piece {
        match self {
            Self::Pull(piece) => piece,
            Self::Plot(piece) => piece,
        }
    }
}

/// Everything needed to run one piece: the piece, its pen and its screen.
struct Host {
    kind: PieceKind,
    piece: ActivePiece,
    pen: Pen,
    screen: Bitmap,
    paint_count: u64,
    renderer: Renderer,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("kind", &self.kind)
            .field("piece", &self.piece.as_piece().name())
            .field("paint_count", &self.paint_count)
            .finish_non_exhaustive()
    }
}

impl Host {
    fn new(ctx: &egui::Context, kind: PieceKind) -> Self {
        let piece = ActivePiece::boot(kind);
        let (w, h) = piece.as_piece().resolution();
        Self {
            kind,
            piece,
            pen: Pen::new(),
            screen: Bitmap::blank(w, h),
            paint_count: 0,
            renderer: Renderer::new(ctx),
        }
    }

    /// Run one frame of the piece against the canvas at `rect`.
    fn tick(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect, scale: f32) {
        self.pen.begin_tick();
        InputHandler::new(rect, scale).process_input(ctx, &mut self.pen);

        let piece = self.piece.as_piece_mut();
        for event in self.pen.events().to_vec() {
            piece.act(event, &self.pen);
        }
        piece.sim(&self.pen);
        if piece.paint(&mut self.screen, &self.pen, self.paint_count) {
            self.renderer.upload(&self.screen);
        }
        self.paint_count += 1;

        self.renderer.render(painter, rect);
    }

    fn cursor_icon(&self) -> egui::CursorIcon {
        match self.piece.as_piece().cursor() {
            Cursor::Precise => egui::CursorIcon::Crosshair,
            Cursor::Tiny => egui::CursorIcon::Cell,
            Cursor::Hidden => egui::CursorIcon::None,
        }
    }
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PieceApp {
    config: HostConfig,
    // Pieces hold live pixel state and a GPU texture; they are rebooted on start
    #[serde(skip)]
    host: Option<Host>,
    #[serde(skip)]
    status: String,
}

impl PieceApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.host = Some(Host::new(&cc.egui_ctx, app.config.piece));
        app
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("pieces").show(ctx, |ui| {
            ui.heading("Pieces");
            ui.separator();

            for kind in PieceKind::ALL {
                if ui.selectable_label(self.config.piece == kind, kind.label()).clicked()
                    && self.config.piece != kind
                {
                    self.config.piece = kind;
                    self.host = Some(Host::new(ctx, kind));
                    self.status.clear();
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Scale:");
                ui.add(egui::Slider::new(&mut self.config.scale, 2.0..=16.0));
            });

            let Some(host) = &mut self.host else {
                return;
            };
            match &mut host.piece {
                ActivePiece::Pull(piece) => {
                    let log = piece.turn_log();
                    ui.label(format!("Turns: {} / {}", log.len(), log.capacity()));
                    ui.label(format!("State: {}", piece.controller().state().name()));
                }
                ActivePiece::Plot(piece) => {
                    ui.label(format!("Commands: {}", piece.commands().len()));
                    if ui.button("Save").clicked() {
                        self.status = match piece.save_to(Path::new("."), time::timestamp_secs()) {
                            Ok(path) => format!("Saved {}", path.display()),
                            Err(err) => {
                                warn!("Save failed: {err}");
                                err.to_string()
                            }
                        };
                    }
                    ui.text_edit_singleline(&mut self.config.open_path);
                    if ui.button("Open").clicked() {
                        self.status = match piece.open(Path::new(&self.config.open_path)) {
                            Ok(count) => format!("Opened {count} commands"),
                            Err(err) => {
                                warn!("Open failed: {err}");
                                err.to_string()
                            }
                        };
                        host.pen.mark_changed();
                    }
                }
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
    }
}

impl eframe::App for PieceApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.side_panel(ctx);

        let scale = self.config.scale;
        let host = self.host.get_or_insert_with(|| Host::new(ctx, self.config.piece));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (w, h) = host.piece.as_piece().resolution();
            let size = egui::vec2(w as f32 * scale, h as f32 * scale);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());

            host.tick(ctx, &painter, response.rect, scale);

            if response.hovered() {
                ctx.set_cursor_icon(host.cursor_icon());
            }
        });

        // Pieces decide for themselves whether a frame is dirty
        ctx.request_repaint();
    }
}
