// Stroke capture: turns pointer samples into grid writes.
//
// down  -> arm the stroke, paint the cell under the pointer
// move  -> rasterize from the previous sample to this one, paint every cell
// up    -> report the raw samples of the stroke
// Esc   -> abandon the stroke and wipe the whole canvas

use std::mem;

use tracing::{debug, trace};

use crate::config::PencilConfig;
use crate::events::{Emitter, EventKind, ListenerId, PencilEvent};
use crate::grid::PixelGrid;
use crate::input::{Device, InputEvent, InputSource, Key, Listeners, PointerEvent, Propagation};
use crate::raster::rasterize;
use crate::surface::RenderSurface;
use crate::types::{Color, GridCoord, GridExtent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pointer went down; no move seen yet.
    Armed,
    Drawing,
}

/// The stroke controller. Owns the grid, the stroke in progress and both collaborators.
pub struct Pencil<S: RenderSurface, I: InputSource> {
    surface: S,
    input: I,
    grid: PixelGrid,
    collection: Vec<GridCoord>,
    state: InteractionState,
    /// Last sample of the stroke in progress.
    current: Option<GridCoord>,
    /// Listeners attached for the stroke in progress; empty when idle.
    stroke_listeners: Listeners,
    enabled: bool,
    pixel_size: u32,
    color: Color,
    events: Emitter,
}

impl<S: RenderSurface, I: InputSource> Pencil<S, I> {
    /// Starts disabled with an empty grid; call [`Pencil::enable`] to start listening.
    pub fn new(surface: S, input: I, config: PencilConfig) -> Self {
        Self {
            surface,
            input,
            grid: PixelGrid::new(),
            collection: Vec::new(),
            state: InteractionState::Idle,
            current: None,
            stroke_listeners: Listeners::empty(),
            enabled: false,
            pixel_size: config.pixel_size.max(1),
            color: config.color,
            events: Emitter::new(),
        }
    }

    /// Dispatch one raw event. Events whose listener is not attached right now are ignored,
    /// exactly as if they had never been delivered.
    pub fn handle(&mut self, event: InputEvent) -> Propagation {
        if !self.listening().contains(event.listener()) {
            return Propagation::Continue;
        }
        match event {
            InputEvent::Down(pointer) => {
                self.on_pointer_down(pointer);
                Propagation::Continue
            },
            InputEvent::Move(pointer) => self.on_pointer_move(pointer),
            InputEvent::Up(device) => {
                self.on_pointer_up(device);
                Propagation::Continue
            },
            InputEvent::KeyDown(key) => {
                self.on_key_down(key);
                Propagation::Continue
            },
        }
    }

    /// Everything currently attached on behalf of this pencil.
    pub fn listening(&self) -> Listeners {
        let entry = if self.enabled { Listeners::ENTRY } else { Listeners::empty() };
        entry | self.stroke_listeners
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent) {
        if self.state != InteractionState::Idle {
            return;
        }

        let listeners = Listeners::stroke(event.device);
        self.input.subscribe(listeners);
        self.stroke_listeners = listeners;
        self.state = InteractionState::Armed;
        self.collection.clear();

        let pixel = self.pixel_from_event(&event);
        debug!(x = pixel.x, y = pixel.y, device = ?event.device, "stroke armed");
        self.current = Some(pixel);
        self.draw_pixel(pixel);
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Propagation {
        match self.state {
            InteractionState::Idle => return Propagation::Continue,
            InteractionState::Armed => {
                debug!("stroke drawing");
                self.state = InteractionState::Drawing;
            },
            InteractionState::Drawing => {},
        }

        let pixel = self.pixel_from_event(&event);
        let previous = self.current.unwrap_or(pixel);
        self.collection.push(pixel);

        let path = rasterize(pixel, previous);
        trace!(x = pixel.x, y = pixel.y, cells = path.len(), "stroke sample");
        for cell in path {
            self.draw_pixel(cell);
        }
        self.current = Some(pixel);

        Propagation::PreventDefault
    }

    /// Ends the stroke. Only a stroke that actually moved reports a result;
    /// a plain tap keeps its single cell and reports nothing.
    pub fn on_pointer_up(&mut self, device: Device) {
        if self.state == InteractionState::Idle {
            return;
        }
        if !self.stroke_listeners.contains(InputEvent::Up(device).listener()) {
            return;
        }

        let was_drawing = self.state == InteractionState::Drawing;
        self.end_stroke();
        if !was_drawing {
            debug!("stroke ended without moving");
            return;
        }

        let result = mem::take(&mut self.collection);
        debug!(samples = result.len(), "stroke finished");
        self.events.emit(&PencilEvent::Result { result });
    }

    /// Escape cancels the stroke and clears the whole canvas, not just this stroke.
    pub fn on_key_down(&mut self, key: Key) {
        if key != Key::Escape || self.state == InteractionState::Idle {
            return;
        }
        if !self.stroke_listeners.contains(Listeners::KEY_DOWN) {
            return;
        }

        debug!(samples = self.collection.len(), "stroke cancelled");
        self.end_stroke();
        self.collection.clear();
        self.clear();
    }

    fn end_stroke(&mut self) {
        self.input.unsubscribe(self.stroke_listeners);
        self.stroke_listeners = Listeners::empty();
        self.state = InteractionState::Idle;
        self.current = None;
    }

    fn pixel_from_event(&self, event: &PointerEvent) -> GridCoord {
        let (left, top) = self.surface.origin();
        let size = self.pixel_size as f64;
        GridCoord::new(
            ((event.client_x - left) / size).floor() as i32,
            ((event.client_y - top) / size).floor() as i32,
        )
    }

    /// Write `coord` with the current color and paint it; out-of-range cells are skipped.
    fn draw_pixel(&mut self, coord: GridCoord) {
        if self.grid.set(coord, self.color, self.extent()) {
            self.surface.fill_cell(coord.x, coord.y, self.color, self.pixel_size);
        }
    }

    fn clear_surface(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.clear_region(width, height);
    }

    fn redraw(&mut self) {
        self.clear_surface();
        for (coord, color) in self.grid.iter() {
            self.surface.fill_cell(coord.x, coord.y, color, self.pixel_size);
        }
    }

    /// Replace the drawing with a copy of `pixels` and repaint everything.
    pub fn load_pixels(&mut self, pixels: &PixelGrid) {
        self.grid.load(pixels);
        debug!(cells = self.grid.len(), "pixels loaded");
        self.redraw();
    }

    /// Snapshot of the drawing; it does not follow later strokes.
    pub fn pixels(&self) -> PixelGrid {
        self.grid.snapshot()
    }

    /// Raw samples of the stroke in progress (empty once a stroke has been reported).
    pub fn collection(&self) -> &[GridCoord] {
        &self.collection
    }

    /// Erase every cell and wipe the surface.
    pub fn clear(&mut self) {
        self.clear_surface();
        self.grid.clear();
        debug!("pixels cleared");
    }

    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.input.subscribe(Listeners::ENTRY);
        self.enabled = true;
        debug!("pencil enabled");
    }

    /// Stops new strokes from starting. A stroke already in progress runs to its end.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.input.unsubscribe(Listeners::ENTRY);
        self.enabled = false;
        debug!("pencil disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the cell size and repaint everything at the new scale.
    pub fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size.max(1);
        debug!(pixel_size = self.pixel_size, "pixel size changed");
        self.redraw();
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn extent(&self) -> GridExtent {
        GridExtent::from_surface(self.surface.width(), self.surface.height(), self.pixel_size)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&PencilEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn into_parts(self) -> (S, I, PixelGrid) {
        (self.surface, self.input, self.grid)
    }
}
