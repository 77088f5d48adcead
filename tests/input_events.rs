//! End-to-end tests for the event funnel driven through the headless backend

use glam::{UVec2, Vec2};
use winit::dpi::PhysicalPosition;
use winit::event::ElementState;
use winit::keyboard::{KeyCode as NativeKey, ModifiersState, PhysicalKey};

use casement::{
    Event, HeadlessBackend, HeadlessDriver, KeyAction, KeyCode, Modifiers, MouseButton,
    RawWindowEvent, Window, WindowConfig, WindowSystem,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup() -> (WindowSystem, HeadlessDriver) {
    init_tracing();
    let backend = HeadlessBackend::new();
    let driver = backend.driver();
    (WindowSystem::new(backend), driver)
}

fn drain(window: &mut Window) -> Vec<Event> {
    std::iter::from_fn(|| window.next_event()).collect()
}

#[test]
fn test_key_and_mouse_scenario() {
    let (system, driver) = setup();
    let mut window = system.create_window("Test", UVec2::new(800, 600)).unwrap();
    let handle = window.handle();

    driver.send(
        handle,
        RawWindowEvent::Key {
            key: PhysicalKey::Code(NativeKey::KeyA),
            scancode: 38,
            state: ElementState::Pressed,
            repeat: false,
            modifiers: ModifiersState::empty(),
        },
    );
    driver.move_cursor(handle, 100.0, 50.0);
    driver.move_cursor(handle, 110.0, 55.0);

    system.poll_input();

    let events = drain(&mut window);
    assert_eq!(
        events,
        vec![
            Event::Key {
                code: KeyCode::A,
                scancode: 38,
                modifiers: Modifiers::empty(),
                action: KeyAction::Press,
            },
            Event::MouseMove {
                position: Vec2::new(100.0, 50.0),
                delta: Vec2::ZERO,
            },
            Event::MouseMove {
                position: Vec2::new(110.0, 55.0),
                delta: Vec2::new(10.0, 5.0),
            },
        ]
    );

    // Fully drained: the queue reports absent, not an error
    assert_eq!(window.next_event(), None);
}

#[test]
fn test_events_stay_with_their_window() {
    let (system, driver) = setup();
    let mut left = system.create_window("left", UVec2::new(320, 240)).unwrap();
    let mut right = system.create_window("right", UVec2::new(320, 240)).unwrap();

    driver.send(left.handle(), RawWindowEvent::Text { character: 'l' });
    driver.send(right.handle(), RawWindowEvent::Text { character: 'r' });
    driver.send(left.handle(), RawWindowEvent::Text { character: '!' });

    system.poll_input();

    assert_eq!(
        drain(&mut left),
        vec![
            Event::Text { character: 'l' },
            Event::Text { character: '!' },
        ]
    );
    assert_eq!(drain(&mut right), vec![Event::Text { character: 'r' }]);
}

#[test]
fn test_press_then_hold_then_release() {
    let (system, driver) = setup();
    let mut window = system.create_window("hold", UVec2::new(800, 600)).unwrap();
    let handle = window.handle();

    driver.press_key(handle, NativeKey::KeyW, ModifiersState::empty());
    system.poll_input();

    let events = drain(&mut window);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        Event::Key {
            code: KeyCode::W,
            action: KeyAction::Press,
            ..
        }
    ));
    assert!(matches!(
        events[1],
        Event::Key {
            code: KeyCode::W,
            action: KeyAction::Hold,
            ..
        }
    ));

    // Still down: exactly one more hold per poll
    system.poll_input();
    let events = drain(&mut window);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        Event::Key {
            action: KeyAction::Hold,
            ..
        }
    ));

    driver.release_key(handle, NativeKey::KeyW, ModifiersState::empty());
    system.poll_input();
    let events = drain(&mut window);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        Event::Key {
            code: KeyCode::W,
            action: KeyAction::Release,
            ..
        }
    ));
}

#[test]
fn test_focus_accessor_matches_stream() {
    let (system, driver) = setup();
    let mut window = system.create_window("focus", UVec2::new(640, 480)).unwrap();
    assert!(!window.has_focus());

    driver.send(window.handle(), RawWindowEvent::Focus { focused: true });
    system.poll_input();

    // The accessor agrees with the queued event
    assert!(window.has_focus());
    assert_eq!(drain(&mut window), vec![Event::Focus { focused: true }]);

    driver.send(window.handle(), RawWindowEvent::Focus { focused: false });
    system.poll_input();
    assert!(!window.has_focus());
    assert_eq!(drain(&mut window), vec![Event::Focus { focused: false }]);
}

#[test]
fn test_mouse_button_event() {
    let (system, driver) = setup();
    let mut window = system.create_window("click", UVec2::new(640, 480)).unwrap();

    driver.send(
        window.handle(),
        RawWindowEvent::MouseButton {
            button: winit::event::MouseButton::Left,
            state: ElementState::Pressed,
            modifiers: ModifiersState::CONTROL,
            position: PhysicalPosition::new(42.0, 24.0),
        },
    );
    system.poll_input();

    assert_eq!(
        drain(&mut window),
        vec![Event::MouseButton {
            button: MouseButton::Left,
            modifiers: Modifiers::CTRL,
            action: KeyAction::Press,
            position: Vec2::new(42.0, 24.0),
        }]
    );
}

#[test]
fn test_close_request_and_title() {
    let (system, driver) = setup();
    let mut window = system
        .create_window_with_config(&WindowConfig {
            title: "Original".to_string(),
            width: 1024,
            height: 768,
            ..WindowConfig::default()
        })
        .unwrap();

    assert_eq!(window.title(), "Original");
    assert_eq!(window.size(), UVec2::new(1024, 768));
    assert!(!window.close_requested());

    window.set_title("Renamed");
    assert_eq!(window.title(), "Renamed");
    // The setter reached the native side too
    assert_eq!(driver.title(window.handle()), Some("Renamed".to_string()));

    driver.request_close(window.handle());
    assert!(window.close_requested());
}

#[test]
fn test_drop_destroys_native_window() {
    let (system, driver) = setup();
    let window = system.create_window("doomed", UVec2::new(100, 100)).unwrap();
    let handle = window.handle();
    assert!(driver.is_open(handle));

    drop(window);
    assert!(!driver.is_open(handle));

    // The registry entry is gone as well: polling is a no-op, not a panic
    system.poll_input();
}

#[test]
fn test_set_icon_decodes_image() {
    let (system, driver) = setup();
    let mut window = system.create_window("icon", UVec2::new(640, 480)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]))
        .save(&path)
        .unwrap();

    window.set_icon(&path).unwrap();
    assert_eq!(driver.icon_size(window.handle()), Some((2, 3)));
}

#[test]
fn test_set_icon_reports_decode_failure() {
    let (system, _driver) = setup();
    let mut window = system.create_window("icon", UVec2::new(640, 480)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-an-image.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    assert!(window.set_icon(&path).is_err());
}

#[test]
fn test_cursor_visibility_reaches_backend() {
    let (system, driver) = setup();
    let mut window = system.create_window("cursor", UVec2::new(640, 480)).unwrap();

    assert!(driver.cursor_visible(window.handle()));
    window.set_cursor_visible(false);
    assert!(!driver.cursor_visible(window.handle()));
    window.set_cursor_visible(true);
    assert!(driver.cursor_visible(window.handle()));
}

#[test]
fn test_monitor_enumeration() {
    let (system, _driver) = setup();
    let monitors = system.monitors();
    assert!(!monitors.is_empty());
    for monitor in monitors {
        let dpi = monitor.dpi();
        assert!(dpi.x > 0.0 && dpi.y > 0.0);
    }
}
