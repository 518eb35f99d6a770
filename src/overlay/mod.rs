//! Overlay Presentation Layer
//!
//! Holds one graphic per tracked text block and draws them over the camera
//! view. Graphics read the shared coordinate frame at draw time; the overlay
//! is the only writer.

pub mod canvas;
pub mod frame;
pub mod graphic;
pub mod surface;
pub mod widgets;

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info};

use crate::assets::BadgeCache;
use crate::overlay::frame::{CoordinateFrame, SharedFrame};
use crate::overlay::graphic::TextGraphic;
use crate::overlay::surface::Surface;
use crate::overlay::widgets::OverlayStyle;
use crate::vision::TextRegion;

/// Request for the host to redraw the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintRequest {
    /// A graphic was added
    GraphicAdded(u32),
    /// Graphics were removed
    GraphicsRemoved,
    /// The coordinate frame changed
    FrameChanged,
}

/// Collection of graphics drawn over the camera view
pub struct GraphicOverlay {
    frame: SharedFrame,
    badges: Arc<BadgeCache>,
    graphics: Vec<TextGraphic>,
    next_id: u32,
    repaint_sender: Sender<RepaintRequest>,
    repaint_receiver: Receiver<RepaintRequest>,
}

impl GraphicOverlay {
    /// Create an empty overlay
    pub fn new(frame: CoordinateFrame, badges: Arc<BadgeCache>) -> Self {
        let (repaint_sender, repaint_receiver) = unbounded();
        Self {
            frame: frame.shared(),
            badges,
            graphics: Vec::new(),
            next_id: 0,
            repaint_sender,
            repaint_receiver,
        }
    }

    /// Get a receiver for repaint requests
    pub fn repaint_receiver(&self) -> Receiver<RepaintRequest> {
        self.repaint_receiver.clone()
    }

    /// Drain pending repaint requests, returning how many were queued
    pub fn take_repaint_requests(&self) -> usize {
        self.repaint_receiver.try_iter().count()
    }

    fn post_invalidate(&self, request: RepaintRequest) {
        let _ = self.repaint_sender.send(request);
    }

    /// Current coordinate frame
    pub fn frame(&self) -> CoordinateFrame {
        *self.frame.read()
    }

    /// Replace the coordinate frame
    pub fn set_frame(&self, frame: CoordinateFrame) {
        *self.frame.write() = frame;
        debug!("Coordinate frame set to {:?}", frame);
        self.post_invalidate(RepaintRequest::FrameChanged);
    }

    /// Recompute the frame after a sensor or view resolution change
    pub fn set_sizes(&self, sensor: (u32, u32), view: (u32, u32)) -> Result<()> {
        let frame = CoordinateFrame::from_sizes(sensor, view)?;
        info!(
            "Mapping sensor {}x{} to view {}x{}",
            sensor.0, sensor.1, view.0, view.1
        );
        self.set_frame(frame);
        Ok(())
    }

    /// Add a graphic for a detected block and request a redraw
    pub fn add_block(&mut self, block: TextRegion) -> Result<u32> {
        let mut graphic = TextGraphic::new(Some(block), self.frame.clone(), &self.badges)?;
        let id = self.next_id;
        self.next_id += 1;
        graphic.set_id(id);

        self.graphics.push(graphic);
        self.post_invalidate(RepaintRequest::GraphicAdded(id));
        Ok(id)
    }

    /// Remove a graphic by id
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.graphics.len();
        self.graphics.retain(|g| g.id() != id);
        let removed = self.graphics.len() != before;
        if removed {
            self.post_invalidate(RepaintRequest::GraphicsRemoved);
        }
        removed
    }

    /// Remove all graphics
    pub fn clear(&mut self) {
        self.graphics.clear();
        self.post_invalidate(RepaintRequest::GraphicsRemoved);
    }

    pub fn graphics(&self) -> &[TextGraphic] {
        &self.graphics
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    /// Draw every graphic in insertion order; later graphics paint on top
    pub fn draw(&self, surface: &mut dyn Surface, style: &OverlayStyle) {
        for graphic in &self.graphics {
            graphic.draw(surface, style);
        }
    }

    /// First graphic whose bounds contain the view-space point
    pub fn graphic_at(&self, x: f32, y: f32) -> Option<&TextGraphic> {
        self.graphics.iter().find(|g| g.contains(x, y))
    }
}
