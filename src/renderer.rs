// src/renderer.rs
use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions};

use crate::bitmap::Bitmap;

/// Uploads piece frames to the GPU and draws them scaled up.
pub struct Renderer {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    uploads: usize,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl Renderer {
    /// Creates a new renderer bound to the egui context
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            texture: None,
            uploads: 0,
        }
    }

    /// Number of frames sent to the texture so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Replace the texture contents with `screen`.
    ///
    /// Nearest filtering keeps every canvas pixel a crisp square.
    pub fn upload(&mut self, screen: &Bitmap) {
        let image = ColorImage::from_rgba_unmultiplied(
            [screen.width() as usize, screen.height() as usize],
            screen.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(self.ctx.load_texture("piece-screen", image, TextureOptions::NEAREST));
            }
        }
        self.uploads += 1;
    }

    /// Draw the last uploaded frame over `rect`.
    pub fn render(&self, painter: &egui::Painter, rect: egui::Rect) {
        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}
