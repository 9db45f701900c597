// Synchronous observer list for pencil events.
// Handlers run in registration order, on the thread that finished the stroke.

use crate::types::GridCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A stroke finished; carries the raw samples of that stroke.
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PencilEvent {
    Result { result: Vec<GridCoord> },
}

impl PencilEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PencilEvent::Result { .. } => EventKind::Result,
        }
    }
}

/// Returned by [`Emitter::on`]; pass it to [`Emitter::off`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

pub type Handler = Box<dyn FnMut(&PencilEvent)>;

#[derive(Default)]
pub struct Emitter {
    handlers: Vec<(ListenerId, EventKind, Handler)>,
    next_id: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&PencilEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not registered (or already removed).
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &PencilEvent) {
        let kind = event.kind();
        for (_, handler_kind, handler) in self.handlers.iter_mut() {
            if *handler_kind == kind {
                handler(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").field("handlers", &self.handlers.len()).finish()
    }
}
