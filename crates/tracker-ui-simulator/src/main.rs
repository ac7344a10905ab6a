//! Desktop simulator for the tracker UI widget core.
//!
//! Opens an SDL2 window through `embedded-graphics-simulator` and drives a
//! demo screen with the stock controls and dialogs, so capture, repeat and
//! orientation handling can be tried without a device.
//!
//! # Usage
//!
//! ```text
//! tracker-ui-simulator [keys.cfg]
//! ```
//!
//! The optional key map sets the orientation, pixel doubling and the
//! remapping of the hardware buttons, which are simulated by F1 to F12
//! (button codes 0xC1 upwards).
//!
//! # Key bindings
//!
//! | Key             | Action                          |
//! |-----------------|---------------------------------|
//! | Up / Down       | Move the list selection         |
//! | 0-9, keypad     | Type a value in Quick choose    |
//! | Return / Escape | Answer the open dialog          |
//! | Q               | Quit (when no dialog is open)   |

mod sdl_display;

use std::time::{Duration, Instant};

use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton as SdlMouseButton};
use log::{debug, error, info, warn};

use tracker_ui::dialog::RESPONSE_OK;
use tracker_ui::event::vk;
use tracker_ui::{
    Button, Context, Control, ControlId, DisplayDevice, Event, EventId, EventListener,
    EventResult, GroupSelectionDialog, KeyMapConfig, ListBox, MouseAction, MouseButton, Point,
    QuickChooseDialog, RadioGroup, Screen, Scrollbar, Size, StaticText, UiString,
};

use crate::sdl_display::SdlDisplay;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Logical screen size.
const SCREEN_SIZE: Size = Size::new(320, 240);

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Hold time before the first repeat tick.
const REPEAT_DELAY: Duration = Duration::from_millis(500);

/// Interval between repeat ticks.
const REPEAT_INTERVAL: Duration = Duration::from_millis(60);

/// Code of the first simulated hardware button (F1).
const HARDWARE_BUTTON_BASE: u16 = 0xC1;

const ID_LIST: ControlId = ControlId(100);
const ID_SLIDER: ControlId = ControlId(101);
const ID_WAVEFORM: ControlId = ControlId(102);
const ID_GROUP_BUTTON: ControlId = ControlId(103);
const ID_QUICK_BUTTON: ControlId = ControlId(104);
const ID_STATUS: ControlId = ControlId(105);
const ID_GROUP_DIALOG: ControlId = ControlId(200);
const ID_QUICK_DIALOG: ControlId = ControlId(201);

const WAVEFORMS: [&str; 4] = ["Sine", "Square", "Saw", "Noise"];
const PATTERN_COUNT: i32 = 20;

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Collects notifications during a dispatch; they are acted on afterwards,
/// when the screen can be borrowed again.
#[derive(Default)]
struct Notes {
    pending: Vec<(ControlId, Event)>,
}

impl EventListener for Notes {
    fn handle_event(&mut self, sender: ControlId, event: &Event) -> EventResult {
        self.pending.push((sender, *event));
        EventResult::Handled
    }
}

// ---------------------------------------------------------------------------
// Demo screen
// ---------------------------------------------------------------------------

fn build_screen() -> Screen {
    let mut screen = Screen::new(SCREEN_SIZE);

    let mut list = ListBox::new(ID_LIST, Point::new(8, 8), Size::new(120, 100));
    for i in 0..PATTERN_COUNT {
        list.add_item(&format!("Pattern {:02}", i));
    }
    list.set_selected(0);
    screen.add_control(list);

    let mut slider = Scrollbar::new(ID_SLIDER, Point::new(8, 120), 200, true);
    slider.set_bar_size(65536 / 4, false);
    screen.add_control(slider);

    let mut waveform = RadioGroup::new(ID_WAVEFORM, Point::new(140, 8), Size::new(100, 60));
    for name in WAVEFORMS {
        waveform.add_item(name);
    }
    waveform.fit_size();
    screen.add_control(waveform);

    screen.add_control(
        Button::new(ID_GROUP_BUTTON, Point::new(140, 80), Size::new(100, 16))
            .with_label("Waveform..."),
    );
    screen.add_control(
        Button::new(ID_QUICK_BUTTON, Point::new(140, 100), Size::new(100, 16))
            .with_label("Pattern..."),
    );
    screen.add_control(StaticText::new(ID_STATUS, Point::new(8, 224), "Ready"));

    screen
}

fn set_status(screen: &mut Screen, text: &str) {
    info!("{}", text);
    if let Some(status) = screen.control_as_mut::<StaticText>(ID_STATUS) {
        status.set_text(text);
    }
}

/// React to the notifications of one dispatch.
fn handle_notes(screen: &mut Screen, notes: &mut Notes) {
    for (sender, event) in notes.pending.drain(..) {
        debug!("{:?} from {:?}", event, sender);
        match (sender, event.id) {
            (ID_LIST, EventId::Selection) => {
                let item = screen
                    .control_as::<ListBox>(ID_LIST)
                    .and_then(|l| l.selected_item())
                    .map(|item| item.to_string())
                    .unwrap_or_default();
                set_status(screen, &format!("Selected {}", item));
            }
            (ID_WAVEFORM, EventId::Selection) => {
                let choice = event.value().unwrap_or_default().max(0) as usize;
                set_status(screen, &format!("Waveform {}", WAVEFORMS[choice % WAVEFORMS.len()]));
            }
            (ID_SLIDER, id) => {
                let Some(slider) = screen.control_as_mut::<Scrollbar>(ID_SLIDER) else {
                    continue;
                };
                let step = slider.bar_size() / 4;
                match id {
                    EventId::BarScrollUp => slider.set_bar_position(slider.bar_position() - step, true),
                    EventId::BarScrollDown => slider.set_bar_position(slider.bar_position() + step, true),
                    _ => {}
                }
                let percent = slider.bar_position() * 100 / 65536;
                set_status(screen, &format!("Slider at {}%", percent));
            }
            (ID_GROUP_BUTTON, EventId::LMouseUp) => {
                let mut dialog =
                    GroupSelectionDialog::new(ID_GROUP_DIALOG, SCREEN_SIZE, "Select waveform", &WAVEFORMS);
                if let Some(waveform) = screen.control_as::<RadioGroup>(ID_WAVEFORM) {
                    dialog.set_selection(waveform.choice());
                }
                screen.show_modal(dialog);
            }
            (ID_QUICK_BUTTON, EventId::LMouseUp) => {
                let mut dialog = QuickChooseDialog::new(
                    ID_QUICK_DIALOG,
                    SCREEN_SIZE,
                    "Jump to pattern",
                    0,
                    PATTERN_COUNT - 1,
                    1,
                );
                if let Some(selected) = screen.control_as::<ListBox>(ID_LIST).and_then(|l| l.selected()) {
                    dialog.set_value(selected as i32);
                }
                screen.show_modal(dialog);
            }
            (ID_GROUP_DIALOG, EventId::DialogResponse) => {
                let Some(modal) = screen.close_modal() else {
                    continue;
                };
                if event.value() == Some(RESPONSE_OK)
                    && let Some(dialog) = modal.downcast_ref::<GroupSelectionDialog>()
                {
                    let selection = dialog.selection();
                    if let Some(waveform) = screen.control_as_mut::<RadioGroup>(ID_WAVEFORM) {
                        waveform.set_choice(selection);
                    }
                    set_status(screen, &format!("Waveform {}", WAVEFORMS[selection % WAVEFORMS.len()]));
                }
            }
            (ID_QUICK_DIALOG, EventId::DialogResponse) => {
                let Some(modal) = screen.close_modal() else {
                    continue;
                };
                if event.value() == Some(RESPONSE_OK)
                    && let Some(dialog) = modal.downcast_ref::<QuickChooseDialog>()
                {
                    let value = dialog.value();
                    if let Some(list) = screen.control_as_mut::<ListBox>(ID_LIST) {
                        list.set_selected(value.max(0) as usize);
                    }
                    set_status(screen, &format!("Jumped to pattern {:02}", value));
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Input translation
// ---------------------------------------------------------------------------

fn mouse_button(button: SdlMouseButton) -> Option<MouseButton> {
    match button {
        SdlMouseButton::Left => Some(MouseButton::Left),
        SdlMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Virtual key for an SDL key, applying the hardware button remapping.
fn virtual_key(keycode: Keycode, config: &KeyMapConfig) -> Option<i32> {
    const DIGITS: [Keycode; 10] = [
        Keycode::Num0, Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4,
        Keycode::Num5, Keycode::Num6, Keycode::Num7, Keycode::Num8, Keycode::Num9,
    ];
    const KEYPAD: [Keycode; 10] = [
        Keycode::Kp0, Keycode::Kp1, Keycode::Kp2, Keycode::Kp3, Keycode::Kp4,
        Keycode::Kp5, Keycode::Kp6, Keycode::Kp7, Keycode::Kp8, Keycode::Kp9,
    ];
    const HARDWARE: [Keycode; 12] = [
        Keycode::F1, Keycode::F2, Keycode::F3, Keycode::F4, Keycode::F5, Keycode::F6,
        Keycode::F7, Keycode::F8, Keycode::F9, Keycode::F10, Keycode::F11, Keycode::F12,
    ];

    if let Some(i) = HARDWARE.iter().position(|k| *k == keycode) {
        let code = HARDWARE_BUTTON_BASE + i as u16;
        return match config.remap(code) {
            Some(mapping) => {
                debug!("Button {:#X} -> {:?}", code, mapping);
                Some(mapping.virtual_key_code as i32)
            }
            None => Some(code as i32),
        };
    }
    if let Some(i) = DIGITS.iter().position(|k| *k == keycode) {
        return Some(0x30 + i as i32);
    }
    if let Some(i) = KEYPAD.iter().position(|k| *k == keycode) {
        return Some(vk::NUMPAD0 + i as i32);
    }
    match keycode {
        Keycode::Return | Keycode::KpEnter => Some(vk::RETURN),
        Keycode::Escape => Some(vk::ESCAPE),
        Keycode::Backspace => Some(vk::BACK),
        Keycode::Up => Some(vk::UP),
        Keycode::Down => Some(vk::DOWN),
        Keycode::PageUp => Some(vk::PRIOR),
        Keycode::PageDown => Some(vk::NEXT),
        _ => None,
    }
}

/// Key handling: dialogs take every key, otherwise the list does.
fn dispatch_key(screen: &mut Screen, key: i32, notes: &mut Notes) {
    let event = Event::with_value(EventId::KeyDown, key);
    if screen.has_modal() {
        screen.dispatch(&event, notes);
    } else if let Some(list) = screen.control_mut(ID_LIST) {
        list.dispatch(&event, &mut Context::new(notes));
    }
}

/// Auto-repeat for a held mouse button.
struct RepeatTimer {
    held: Option<(MouseButton, Point)>,
    next_tick: Instant,
}

impl RepeatTimer {
    fn new() -> Self {
        Self {
            held: None,
            next_tick: Instant::now(),
        }
    }

    fn press(&mut self, button: MouseButton, point: Point) {
        self.held = Some((button, point));
        self.next_tick = Instant::now() + REPEAT_DELAY;
    }

    fn moved(&mut self, point: Point) {
        if let Some((_, p)) = self.held.as_mut() {
            *p = point;
        }
    }

    fn release(&mut self) {
        self.held = None;
    }

    fn held_button(&self) -> Option<MouseButton> {
        self.held.map(|(b, _)| b)
    }

    /// Repeat event due now, if any.
    fn tick(&mut self, now: Instant) -> Option<Event> {
        let (button, point) = self.held?;
        if now < self.next_tick {
            return None;
        }
        self.next_tick = now + REPEAT_INTERVAL;
        Some(Event::with_point(EventId::mouse(button, MouseAction::Repeat), point))
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn load_config() -> KeyMapConfig {
    let Some(path) = std::env::args().nth(1) else {
        return KeyMapConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => match KeyMapConfig::parse(&text) {
            Ok(config) => {
                info!("Loaded key map from {}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring {}: {}", path, e);
                KeyMapConfig::default()
            }
        },
        Err(e) => {
            warn!("Cannot read {}: {}", path, e);
            KeyMapConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    info!("Starting tracker UI simulator");

    let config = load_config();
    let scale = if config.double_pixels { 2 } else { 1 };
    info!(
        "Display: {}x{} {:?} (scale {}x)",
        SCREEN_SIZE.width, SCREEN_SIZE.height, config.orientation, scale
    );

    let mut display = match SdlDisplay::new(SCREEN_SIZE, config.orientation, scale) {
        Ok(display) => display,
        Err(e) => {
            error!("Cannot open display: {}", e);
            return;
        }
    };
    display.set_title(&UiString::from("Tracker UI"));

    let mut screen = build_screen();
    let mut notes = Notes::default();
    let mut repeat = RepeatTimer::new();

    if let Err(e) = screen.paint_all(&mut display) {
        error!("Paint error: {}", e);
    }
    // The SDL window is created by the first present; events need it.
    display.present();

    'running: loop {
        let frame_start = Instant::now();

        let events: Vec<SimulatorEvent> = display.events().collect();
        for event in events {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q && !screen.has_modal() {
                        break 'running;
                    }
                    if let Some(key) = virtual_key(keycode, &config) {
                        dispatch_key(&mut screen, key, &mut notes);
                    }
                }

                SimulatorEvent::MouseButtonDown { mouse_btn, point } => {
                    let Some(button) = mouse_button(mouse_btn) else {
                        continue;
                    };
                    let point = Point::from(point);
                    repeat.press(button, point);
                    let event = Event::with_point(EventId::mouse(button, MouseAction::Down), point);
                    screen.dispatch_physical(&display, &event, &mut notes);
                }

                SimulatorEvent::MouseButtonUp { mouse_btn, point } => {
                    let Some(button) = mouse_button(mouse_btn) else {
                        continue;
                    };
                    if repeat.held_button() == Some(button) {
                        repeat.release();
                    }
                    let event =
                        Event::with_point(EventId::mouse(button, MouseAction::Up), Point::from(point));
                    screen.dispatch_physical(&display, &event, &mut notes);
                }

                SimulatorEvent::MouseMove { point } => {
                    let point = Point::from(point);
                    repeat.moved(point);
                    let id = match repeat.held_button() {
                        Some(button) => EventId::mouse(button, MouseAction::Drag),
                        None => EventId::MouseMove,
                    };
                    screen.dispatch_physical(&display, &Event::with_point(id, point), &mut notes);
                }

                _ => {}
            }
            handle_notes(&mut screen, &mut notes);
        }

        if let Some(event) = repeat.tick(Instant::now()) {
            screen.dispatch_physical(&display, &event, &mut notes);
            handle_notes(&mut screen, &mut notes);
        }

        if let Err(e) = screen.flush(&mut display) {
            error!("Flush error: {}", e);
            break 'running;
        }
        display.present();

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    display.shut_down();
    info!("Simulator exiting");
}
