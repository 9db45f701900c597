// The input side of the pencil: which raw events it wants to hear about, and what they look like.
//
// Hosts own event delivery. The pencil only attaches and detaches listener sets
// through an `InputSource`, and hosts forward the events that are attached.

bitflags::bitflags! {
    /// Event kinds a listener can be attached for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        const MOUSE_DOWN  = 1 << 0;
        const TOUCH_START = 1 << 1;
        const MOUSE_MOVE  = 1 << 2;
        const MOUSE_UP    = 1 << 3;
        const TOUCH_MOVE  = 1 << 4;
        const TOUCH_END   = 1 << 5;
        const KEY_DOWN    = 1 << 6;
    }
}

impl Listeners {
    /// Attached while the pencil is enabled.
    pub const ENTRY: Listeners = Listeners::MOUSE_DOWN.union(Listeners::TOUCH_START);

    /// Attached for the duration of one stroke. Touch strokes never listen to the keyboard.
    pub fn stroke(device: Device) -> Listeners {
        match device {
            Device::Mouse => Listeners::MOUSE_MOVE | Listeners::MOUSE_UP | Listeners::KEY_DOWN,
            Device::Touch => Listeners::TOUCH_MOVE | Listeners::TOUCH_END,
        }
    }
}

pub trait InputSource {
    fn subscribe(&mut self, listeners: Listeners);
    fn unsubscribe(&mut self, listeners: Listeners);
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn subscribe(&mut self, listeners: Listeners) {
        (**self).subscribe(listeners)
    }

    fn unsubscribe(&mut self, listeners: Listeners) {
        (**self).unsubscribe(listeners)
    }
}

/// Plain record of what is currently attached. Hosts consult it before forwarding an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscriptions {
    attached: Listeners,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> Listeners {
        self.attached
    }

    pub fn is_subscribed(&self, listeners: Listeners) -> bool {
        self.attached.contains(listeners)
    }

    /// Whether a host should deliver `event` right now.
    pub fn wants(&self, event: &InputEvent) -> bool {
        self.is_subscribed(event.listener())
    }
}

impl InputSource for Subscriptions {
    fn subscribe(&mut self, listeners: Listeners) {
        self.attached.insert(listeners);
    }

    fn unsubscribe(&mut self, listeners: Listeners) {
        self.attached.remove(listeners);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Mouse,
    Touch,
}

/// A pointer sample in client coordinates (before subtracting the surface origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub device: Device,
}

impl PointerEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y, device: Device::Mouse }
    }

    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y, device: Device::Touch }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other(u32),
}

impl From<u32> for Key {
    /// Raw key codes; 27 is Escape.
    fn from(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            other => Key::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Down(PointerEvent),
    Move(PointerEvent),
    Up(Device),
    KeyDown(Key),
}

impl InputEvent {
    /// The listener that has to be attached for this event to be delivered.
    pub fn listener(&self) -> Listeners {
        match self {
            InputEvent::Down(PointerEvent { device: Device::Mouse, .. }) => Listeners::MOUSE_DOWN,
            InputEvent::Down(PointerEvent { device: Device::Touch, .. }) => Listeners::TOUCH_START,
            InputEvent::Move(PointerEvent { device: Device::Mouse, .. }) => Listeners::MOUSE_MOVE,
            InputEvent::Move(PointerEvent { device: Device::Touch, .. }) => Listeners::TOUCH_MOVE,
            InputEvent::Up(Device::Mouse) => Listeners::MOUSE_UP,
            InputEvent::Up(Device::Touch) => Listeners::TOUCH_END,
            InputEvent::KeyDown(_) => Listeners::KEY_DOWN,
        }
    }
}

/// What the host should do with the native event after the pencil handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// Suppress scrolling / text selection while a stroke is in progress.
    PreventDefault,
}
