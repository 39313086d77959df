//! One editing session over one photo.
//!
//! An [`EditSession`] ties together the gallery, its preview cache, the
//! selection controller and the colour-correction tool. Presentation talks to
//! the session only:
//!
//! - gallery cells call [`EditSession::preview`];
//! - taps call [`EditSession::pick`] / [`EditSession::deselect`];
//! - sliders call [`EditSession::set_value`];
//! - the editor view shows [`EditSession::render`].
//!
//! The rendering surface is held through a [`Weak`] handle, so the session
//! never keeps a closed view alive.

use crate::{Gallery, GalleryError, GalleryResult, PreviewCache, SelectionController, SelectionObserver};
use looks_core::Image;
use looks_ops::{CompositeFilter, Filter};
use looks_tools::{ColourCorrection, Parameter, Parameterized, Tool};
use std::sync::{Arc, Weak};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A view that displays previews and redraws on request.
pub trait RenderSurface: Send + Sync {
    /// Discards displayed previews and asks for them again.
    fn reload(&self);
}

/// Gallery, previews, selection and tool for one photo.
pub struct EditSession {
    gallery: Arc<Gallery>,
    base: Option<Image>,
    cache: PreviewCache,
    selection: SelectionController,
    tool: ColourCorrection,
    surface: Option<Weak<dyn RenderSurface>>,
}

impl EditSession {
    /// Session with full-size previews and a default tool.
    pub fn new(gallery: Arc<Gallery>, initial: usize) -> GalleryResult<Self> {
        let selection = SelectionController::new(gallery.len(), initial)?;
        Ok(Self {
            gallery,
            base: None,
            cache: PreviewCache::new(),
            selection,
            tool: ColourCorrection::new(),
            surface: None,
        })
    }

    /// Renders previews from a thumbnail no larger than `max_dim`.
    pub fn with_preview_size(mut self, max_dim: u32) -> Self {
        self.cache = PreviewCache::with_thumbnail(max_dim);
        if let Some(base) = &self.base {
            self.cache.set_base_image(base);
        }
        self
    }

    /// Replaces the tool.
    pub fn with_tool(mut self, tool: ColourCorrection) -> Self {
        self.tool = tool;
        self
    }

    /// Connects a rendering surface without taking ownership of it.
    pub fn set_surface<S: RenderSurface + 'static>(&mut self, surface: &Arc<S>) {
        let weak = Arc::downgrade(surface);
        self.surface = Some(weak as Weak<dyn RenderSurface>);
    }

    /// Registers a selection observer; it immediately receives the applied
    /// look as `(applied, applied)`.
    pub fn attach(&mut self, observer: impl SelectionObserver + 'static) {
        self.selection.attach(observer);
    }

    /// Sets the photo being edited.
    ///
    /// Every cached preview is dropped before this returns, then the surface
    /// is asked to reload if it is still alive.
    pub fn set_base_image(&mut self, image: Image) {
        self.cache.set_base_image(&image);
        self.base = Some(image);
        match self.surface.as_ref().and_then(Weak::upgrade) {
            Some(surface) => surface.reload(),
            None => trace!("no live render surface"),
        }
    }

    /// The photo being edited.
    pub fn base_image(&self) -> Option<&Image> {
        self.base.as_ref()
    }

    /// Preview of look `index`, rendered at most once per base image.
    pub fn preview(&self, index: usize) -> GalleryResult<Image> {
        let look = self.gallery.look(index)?;
        self.cache.get_or_render(look.as_ref())
    }

    /// Picks look `index`.
    pub fn pick(&mut self, index: usize) -> GalleryResult<()> {
        self.selection.pick(index)
    }

    /// Highlights look `index` without changing what is rendered.
    pub fn highlight(&mut self, index: usize) -> GalleryResult<()> {
        self.selection.highlight(index)
    }

    /// Returns to the applied look.
    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Applies the picked look. Returns its index.
    pub fn commit(&mut self) -> usize {
        self.selection.commit()
    }

    /// Sets a tool parameter on the normalized scale; returns the applied
    /// (clamped) value.
    pub fn set_value(&mut self, value: f64, parameter: Parameter) -> GalleryResult<f64> {
        Ok(self.tool.set_value(value, parameter)?)
    }

    /// Current normalized value of a tool parameter.
    pub fn value(&self, parameter: Parameter) -> f64 {
        self.tool.value(parameter)
    }

    /// Pipeline for the shown look followed by the tool.
    pub fn pipeline(&self) -> GalleryResult<CompositeFilter> {
        let look = self.gallery.look(self.selection.current())?;
        Ok(CompositeFilter::new(look.name())
            .then_shared(Arc::clone(look))
            .extend(&self.tool.filter()))
    }

    /// Full-size render of the shown look with the tool applied.
    pub fn render(&self) -> GalleryResult<Image> {
        let base = self.base.as_ref().ok_or(GalleryError::NoBaseImage)?;
        let pipeline = self.pipeline()?;
        debug!(look = pipeline.name(), stages = pipeline.len(), "render");
        Ok(pipeline.apply(base)?)
    }

    /// The look gallery.
    pub fn gallery(&self) -> &Arc<Gallery> {
        &self.gallery
    }

    /// The preview cache.
    pub fn cache(&self) -> &PreviewCache {
        &self.cache
    }

    /// The selection controller.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// The colour-correction tool.
    pub fn tool(&self) -> &ColourCorrection {
        &self.tool
    }

    /// Mutable access to the tool.
    pub fn tool_mut(&mut self) -> &mut ColourCorrection {
        &mut self.tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use looks_core::PixelLayout;
    use looks_ops::PhotoEffect;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Surface {
        reloads: AtomicUsize,
    }

    impl RenderSurface for Surface {
        fn reload(&self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn photo(level: f32) -> Image {
        Image::filled(6, 4, PixelLayout::Rgba, &[level, 0.4, 0.3, 1.0]).unwrap()
    }

    fn session() -> EditSession {
        let gallery = Gallery::from_effects(&[PhotoEffect::Original, PhotoEffect::Mono, PhotoEffect::Chrome]).unwrap();
        EditSession::new(Arc::new(gallery), 0).unwrap()
    }

    #[test]
    fn test_surface_reload_and_weak() {
        let mut s = session();
        let surface = Arc::new(Surface::default());
        s.set_surface(&surface);
        s.set_base_image(photo(0.5));
        assert_eq!(surface.reloads.load(Ordering::SeqCst), 1);
        assert_eq!(Arc::strong_count(&surface), 1);

        drop(surface);
        s.set_base_image(photo(0.6));
        assert!(s.base_image().is_some());
    }

    #[test]
    fn test_preview_invalidated_by_new_photo() {
        let mut s = session();
        s.set_base_image(photo(0.5));
        let before = s.preview(2).unwrap();
        s.set_base_image(photo(0.9));
        assert!(!s.cache().contains("Chrome"));
        let after = s.preview(2).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_preview_errors() {
        let s = session();
        assert!(matches!(s.preview(0), Err(GalleryError::NoBaseImage)));
        assert!(matches!(s.preview(3), Err(GalleryError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_render_uses_shown_look_and_tool() {
        let mut s = session();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        s.attach(move |i: usize, p: usize| sink.lock().unwrap().push((i, p)));
        s.set_base_image(photo(0.5));

        let original = s.render().unwrap();
        for (a, b) in original.data().iter().zip(photo(0.5).data()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }

        s.pick(1).unwrap();
        let mono = s.render().unwrap();
        let px = mono.pixel(0, 0);
        assert_relative_eq!(px[0], px[2], epsilon = 1e-6);

        assert_relative_eq!(s.set_value(50.0, Parameter::Brightness).unwrap(), 50.0);
        let brighter = s.render().unwrap();
        assert_relative_eq!(brighter.pixel(0, 0)[0], px[0] + 0.5, epsilon = 1e-5);

        s.deselect();
        assert_eq!(*log.lock().unwrap(), vec![(0, 0), (1, 0), (0, 0)]);
        assert_eq!(s.pipeline().unwrap().name(), "Original");
    }

    #[test]
    fn test_render_propagates_filter_error() {
        let mut s = session();
        s.set_base_image(Image::new(2, 2, PixelLayout::Gray));
        let err = s.render().unwrap_err();
        assert!(matches!(err, GalleryError::Render(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_thumbnail_previews() {
        let mut s = session().with_preview_size(2);
        s.set_base_image(photo(0.5));
        assert_eq!(s.preview(1).unwrap().dimensions(), (2, 2));
        assert_eq!(s.render().unwrap().dimensions(), (6, 4));
    }
}
