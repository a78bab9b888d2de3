use super::lightbox::{Lightbox, LightboxAction};
use super::view::{View, ViewController};
use crate::trip::Trip;

/// The trip currently open in the gallery, and its lightbox.
#[derive(Debug, Default)]
pub struct GallerySession {
    trip: Option<Trip>,
    images: Vec<String>,
    lightbox: Lightbox,
}

impl GallerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the open trip and switches to the gallery view.
    pub fn open(&mut self, trip: Trip, views: &mut ViewController) {
        self.images = trip.images.clone();
        self.trip = Some(trip);
        self.lightbox = Lightbox::default();
        views.show(View::Gallery);
    }

    pub fn trip(&self) -> Option<&Trip> {
        self.trip.as_ref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn open_image(&mut self, index: usize) {
        self.lightbox.open(index);
    }

    pub fn close_image(&mut self) {
        self.lightbox.close();
    }

    pub fn navigate(&mut self, step: isize) {
        self.lightbox.navigate(step, self.images.len());
    }

    pub fn apply(&mut self, action: LightboxAction) {
        self.lightbox.apply(action, self.images.len());
    }

    /// Image the lightbox shows, if it is open on a valid index.
    pub fn current_image(&self) -> Option<&str> {
        if !self.lightbox.is_open() {
            return None;
        }
        self.lightbox.current(&self.images)
    }
}
