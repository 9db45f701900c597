// Headless end-to-end strokes: the pencil driven with recording collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use pixel_pencil::{
    Color, Device, EventKind, GridCoord, InputEvent, InputSource, InteractionState, Key, Listeners, Pencil,
    PencilConfig, PencilEvent, PixelGrid, PointerEvent, RenderSurface,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear(u32, u32),
    Fill(i32, i32, Color, u32),
}

/// Records every call; `origin` mimics a canvas that is not at the top-left of the page.
struct RecordingSurface {
    width: u32,
    height: u32,
    origin: (f64, f64),
    calls: Vec<Call>,
}

impl RecordingSurface {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height, origin: (0.0, 0.0), calls: Vec::new() }
    }

    fn fills(&self) -> Vec<GridCoord> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Fill(x, y, _, _) => Some(GridCoord::new(*x, *y)),
                Call::Clear(..) => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn origin(&self) -> (f64, f64) {
        self.origin
    }

    fn clear_region(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Clear(width, height));
    }

    fn fill_cell(&mut self, x: i32, y: i32, color: Color, cell_size: u32) {
        self.calls.push(Call::Fill(x, y, color, cell_size));
    }
}

/// Counts attachments per listener so leaks show up as non-zero balances.
#[derive(Default)]
struct CountingInput {
    balance: Vec<(Listeners, i32)>,
    log: Vec<(bool, Listeners)>,
}

impl CountingInput {
    fn balance_of(&self, listener: Listeners) -> i32 {
        self.balance.iter().filter(|(l, _)| *l == listener).map(|(_, n)| *n).sum()
    }

    fn attached(&self) -> Listeners {
        self.balance.iter().filter(|(_, n)| *n > 0).fold(Listeners::empty(), |acc, (l, _)| acc | *l)
    }

    fn bump(&mut self, listeners: Listeners, delta: i32) {
        for flag in listeners.iter() {
            match self.balance.iter_mut().find(|(l, _)| *l == flag) {
                Some((_, n)) => *n += delta,
                None => self.balance.push((flag, delta)),
            }
        }
    }
}

impl InputSource for CountingInput {
    fn subscribe(&mut self, listeners: Listeners) {
        self.log.push((true, listeners));
        self.bump(listeners, 1);
    }

    fn unsubscribe(&mut self, listeners: Listeners) {
        self.log.push((false, listeners));
        self.bump(listeners, -1);
    }
}

type TestPencil = Pencil<RecordingSurface, CountingInput>;

fn pencil(width: u32, height: u32, config: PencilConfig) -> TestPencil {
    let mut pencil = Pencil::new(RecordingSurface::new(width, height), CountingInput::default(), config);
    pencil.enable();
    pencil
}

fn collect_results(pencil: &mut TestPencil) -> Rc<RefCell<Vec<Vec<GridCoord>>>> {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = results.clone();
    pencil.on(EventKind::Result, move |event| {
        let PencilEvent::Result { result } = event;
        sink.borrow_mut().push(result.clone());
    });
    results
}

fn mouse_down(x: f64, y: f64) -> InputEvent {
    InputEvent::Down(PointerEvent::mouse(x, y))
}

fn mouse_move(x: f64, y: f64) -> InputEvent {
    InputEvent::Move(PointerEvent::mouse(x, y))
}

#[test]
fn ten_by_ten_stroke_end_to_end() {
    let mut pencil = pencil(10, 10, PencilConfig::default());
    let results = collect_results(&mut pencil);

    pencil.handle(mouse_down(0.0, 0.0));
    pencil.handle(mouse_move(5.0, 0.0));
    pencil.handle(InputEvent::Up(Device::Mouse));

    let pixels = pencil.pixels();
    assert_eq!(pixels.len(), 6);
    assert!((0..=5).all(|x| pixels.get(GridCoord::new(x, 0)) == Some(Color::BLACK)));
    assert_eq!(*results.borrow(), vec![vec![GridCoord::new(5, 0)]]);

    pencil.clear();
    assert!(pencil.pixels().is_empty());
    assert_eq!(pencil.surface().calls.last(), Some(&Call::Clear(10, 10)));
}

#[test]
fn path_keeps_every_sample_in_order() {
    let mut pencil = pencil(100, 100, PencilConfig::default());
    let results = collect_results(&mut pencil);
    let samples = [(3.0, 3.0), (3.0, 3.0), (40.0, 7.0), (12.0, 90.0), (0.0, 0.0)];

    pencil.handle(mouse_down(1.0, 1.0));
    for (i, &(x, y)) in samples.iter().enumerate() {
        pencil.handle(mouse_move(x, y));
        assert_eq!(pencil.collection().len(), i + 1);
    }
    assert_eq!(pencil.collection().last(), Some(&GridCoord::new(0, 0)));
    pencil.handle(InputEvent::Up(Device::Mouse));

    let expected: Vec<_> = samples.iter().map(|&(x, y)| GridCoord::new(x as i32, y as i32)).collect();
    assert_eq!(*results.borrow(), vec![expected]);
    assert!(pencil.collection().is_empty());

    // The next stroke starts from an empty path.
    pencil.handle(mouse_down(50.0, 50.0));
    pencil.handle(mouse_move(51.0, 50.0));
    assert_eq!(pencil.collection(), &[GridCoord::new(51, 50)]);
}

#[test]
fn fast_motion_leaves_no_gaps() {
    let mut pencil = pencil(64, 64, PencilConfig::default());
    pencil.handle(mouse_down(2.0, 60.0));
    pencil.handle(mouse_move(9.0, 3.0));
    pencil.handle(mouse_move(60.0, 20.0));
    pencil.handle(InputEvent::Up(Device::Mouse));

    // Every cell between consecutive samples got painted, not just the samples.
    let pixels = pencil.pixels();
    assert_eq!(pencil.surface().fills().len(), 1 + 58 + 52);
    for coord in pixel_pencil::rasterize(GridCoord::new(9, 3), GridCoord::new(2, 60))
        .into_iter()
        .chain(pixel_pencil::rasterize(GridCoord::new(60, 20), GridCoord::new(9, 3)))
    {
        assert!(pixels.contains(coord), "missing {coord:?}");
    }
}

#[test]
fn listeners_are_paired_across_many_strokes() {
    let mut pencil = pencil(20, 20, PencilConfig::default());

    for round in 0..5 {
        pencil.handle(mouse_down(1.0, 1.0));
        if round % 2 == 0 {
            pencil.handle(mouse_move(4.0, 4.0));
        }
        pencil.handle(InputEvent::Up(Device::Mouse));

        pencil.handle(InputEvent::Down(PointerEvent::touch(2.0, 2.0)));
        pencil.handle(InputEvent::Move(PointerEvent::touch(6.0, 2.0)));
        pencil.handle(InputEvent::Up(Device::Touch));

        pencil.handle(mouse_down(3.0, 3.0));
        pencil.handle(InputEvent::KeyDown(Key::Escape));
    }

    let input = pencil.input();
    assert_eq!(input.attached(), Listeners::ENTRY);
    for flag in Listeners::all().iter() {
        let expected = if Listeners::ENTRY.contains(flag) { 1 } else { 0 };
        assert_eq!(input.balance_of(flag), expected, "{flag:?}");
    }
    // Touch strokes never asked for the keyboard.
    assert!(input.log.iter().all(|(_, l)| !(l.contains(Listeners::TOUCH_MOVE) && l.contains(Listeners::KEY_DOWN))));

    pencil.disable();
    assert!(pencil.input().attached().is_empty());
}

#[test]
fn surface_origin_offsets_pointer_positions() {
    let mut surface = RecordingSurface::new(40, 40);
    surface.origin = (100.0, 50.0);
    let mut pencil = Pencil::new(surface, CountingInput::default(), PencilConfig::default().with_pixel_size(4));
    pencil.enable();

    pencil.handle(mouse_down(109.0, 63.0));
    assert_eq!(pencil.pixels().len(), 1);
    assert!(pencil.pixels().contains(GridCoord::new(2, 3)));
    assert_eq!(pencil.surface().calls, vec![Call::Fill(2, 3, Color::BLACK, 4)]);

    // Left of the canvas: negative cells are dropped, nothing is painted.
    pencil.handle(mouse_move(90.0, 63.0));
    assert_eq!(pencil.surface().fills().len(), 1 + 3);
    assert!(pencil.pixels().iter().all(|(coord, _)| coord.x >= 0));
}

#[test]
fn escape_wipes_earlier_strokes_too() {
    let red = Color::rgb(255, 0, 0);
    let mut pencil = pencil(10, 10, PencilConfig::default().with_color(red));
    let results = collect_results(&mut pencil);

    pencil.handle(mouse_down(0.0, 0.0));
    pencil.handle(mouse_move(9.0, 9.0));
    pencil.handle(InputEvent::Up(Device::Mouse));
    assert_eq!(pencil.pixels().len(), 10);

    pencil.handle(mouse_down(0.0, 9.0));
    pencil.handle(mouse_move(9.0, 0.0));
    pencil.handle(InputEvent::KeyDown(Key::Escape));

    assert_eq!(pencil.state(), InteractionState::Idle);
    assert!(pencil.pixels().is_empty());
    assert_eq!(results.borrow().len(), 1);
    assert_eq!(pencil.surface().calls.last(), Some(&Call::Clear(10, 10)));
}

#[test]
fn load_then_snapshot_round_trip() {
    let mut pencil = pencil(8, 8, PencilConfig::default().with_pixel_size(2));
    let source: PixelGrid = [
        (GridCoord::new(0, 0), Color::rgb(1, 2, 3)),
        (GridCoord::new(3, 3), Color::rgb(4, 5, 6)),
    ]
    .into_iter()
    .collect();

    pencil.load_pixels(&source);
    let calls = &pencil.surface().calls;
    assert_eq!(calls[0], Call::Clear(8, 8));
    let mut fills = pencil.surface().fills();
    fills.sort();
    assert_eq!(fills, vec![GridCoord::new(0, 0), GridCoord::new(3, 3)]);

    let mut snapshot = pencil.pixels();
    assert_eq!(snapshot, source);
    snapshot.clear();
    assert_eq!(pencil.pixels().len(), 2);

    // Drawing over a loaded cell overwrites it in the current color.
    pencil.handle(mouse_down(1.0, 1.0));
    assert_eq!(pencil.pixels().get(GridCoord::new(0, 0)), Some(Color::BLACK));
}
