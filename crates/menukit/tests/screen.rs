//! Integration tests for the screen adapter.
//!
//! These drive a [`Screen`] through host callbacks the way a game engine
//! would and check what reaches the widgets.

use menukit::widgets::{
    Panel, Slider, SliderChanged, SliderCommitted, TextCommitted, TextField,
};
use menukit::{
    Event, EventContext, GuiDescription, Host, Key, Modifiers, MouseButton, Point, Rect, Screen,
    Size, Widget, WidgetId,
};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<Event>>>;

/// Widget that records every event it receives.
struct Recorder {
    log: EventLog,
}

impl Widget for Recorder {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn can_resize(&self) -> bool {
        true
    }

    fn event(&mut self, event: &Event, _ctx: &mut EventContext) {
        self.log.borrow_mut().push(event.clone());
    }
}

/// Host that counts fallbacks and consumes Escape.
#[derive(Debug, Default)]
struct CountingHost {
    clicks: u32,
    scrolls: u32,
    keys: u32,
    scroll_result: bool,
}

impl Host for CountingHost {
    fn mouse_clicked(&mut self, _x: f64, _y: f64, _button: MouseButton) -> bool {
        self.clicks += 1;
        false
    }

    fn mouse_scrolled(&mut self, _x: f64, _y: f64, _amount: f64) -> bool {
        self.scrolls += 1;
        self.scroll_result
    }

    fn key_pressed(&mut self, key: Key, _scan_code: i32, _modifiers: Modifiers) -> bool {
        self.keys += 1;
        key == Key::Escape
    }
}

fn left() -> MouseButton {
    MouseButton::Left
}

/// 200x100 root panel on an 800x600 screen, so the container is at (300, 250).
fn screen_with<F>(build: F) -> Screen<CountingHost>
where
    F: FnOnce(&mut GuiDescription, WidgetId),
{
    let mut description = GuiDescription::new();
    let root = description
        .tree_mut()
        .insert_root(Box::new(Panel::new()), Size::new(200, 100));
    description.set_root_panel(root);
    build(&mut description, root);
    let mut screen = Screen::new(description, CountingHost::default());
    screen.init(800, 600);
    screen
}

fn add_slider(description: &mut GuiDescription, root: WidgetId, at: Rect) -> WidgetId {
    let slider = Slider::horizontal(0, 100).expect("valid range");
    description
        .tree_mut()
        .add_child(root, Box::new(slider), at)
        .expect("root exists")
}

fn slider_values<M: Any>(screen: &mut Screen<CountingHost>, value: fn(&M) -> i32) -> Vec<i32> {
    screen
        .take_messages()
        .iter()
        .filter_map(|m| m.downcast_ref::<M>())
        .map(value)
        .collect()
}

// =============================================================================
// Coordinate translation
// =============================================================================

#[test]
fn test_click_reaches_root_in_container_coordinates() {
    let log = EventLog::default();
    let mut description = GuiDescription::new();
    let root = description.tree_mut().insert_root(
        Box::new(Recorder {
            log: Rc::clone(&log),
        }),
        Size::new(200, 100),
    );
    description.set_root_panel(root);
    let mut screen = Screen::standalone(description);
    screen.init(800, 600);

    assert_eq!((screen.left(), screen.top()), (300, 250));
    screen.mouse_clicked(310.0, 260.0, left());
    assert_eq!(
        log.borrow().as_slice(),
        &[Event::MouseDown {
            position: Point::new(10, 10),
            button: MouseButton::Left,
        }]
    );
    assert_eq!(screen.last_responder(), Some(root));
}

#[test]
fn test_click_reaches_child_in_local_coordinates() {
    let log = EventLog::default();
    let sink = Rc::clone(&log);
    let mut screen = screen_with(move |description, root| {
        description
            .tree_mut()
            .add_child(root, Box::new(Recorder { log: sink }), Rect::new(20, 30, 50, 50))
            .expect("root exists");
    });
    screen.mouse_clicked(325.9, 285.2, left());
    screen.mouse_released(326.0, 286.0, left());
    assert_eq!(
        log.borrow().as_slice(),
        &[
            Event::MouseDown {
                position: Point::new(5, 5),
                button: MouseButton::Left,
            },
            Event::MouseUp {
                position: Point::new(6, 6),
                button: MouseButton::Left,
            },
            Event::Click {
                position: Point::new(6, 6),
                button: MouseButton::Left,
            },
        ]
    );
}

// =============================================================================
// Responder tracking
// =============================================================================

#[test]
fn test_slider_click_commits_once() {
    let mut slider = None;
    let mut screen = screen_with(|description, root| {
        slider = Some(add_slider(description, root, Rect::new(10, 10, 108, 18)));
    });
    let slider = slider.expect("slider added");

    screen.mouse_clicked(364.0, 265.0, left());
    assert_eq!(screen.description().focus(), Some(slider));
    screen.mouse_released(364.0, 265.0, left());

    let messages = screen.take_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].downcast_ref(), Some(&SliderChanged { value: 50 }));
    assert_eq!(
        messages[1].downcast_ref(),
        Some(&SliderCommitted { value: 50 })
    );
    assert!(messages.iter().all(|m| m.source == slider));
}

#[test]
fn test_drag_outside_container_still_reaches_responder() {
    let mut slider = None;
    let mut screen = screen_with(|description, root| {
        slider = Some(add_slider(description, root, Rect::new(10, 10, 108, 18)));
    });
    let slider = slider.expect("slider added");

    screen.mouse_clicked(364.0, 265.0, left());
    assert_eq!(screen.last_responder(), Some(slider));
    screen.mouse_dragged(330.0, 265.0, left(), -34.0, 0.0);
    screen.mouse_dragged(5.0, 590.0, left(), -325.0, 325.0);
    screen.mouse_released(5.0, 590.0, left());
    assert_eq!(screen.last_responder(), None);

    let core = screen
        .description()
        .tree()
        .get::<Slider>(slider)
        .expect("slider in tree")
        .core();
    assert_eq!(core.value(), 0);
    assert!(!core.is_dragging());

    assert_eq!(
        slider_values::<SliderChanged>(&mut screen, |m| m.value),
        vec![16, 0]
    );
}

#[test]
fn test_release_away_from_last_drag_commits_release_value() {
    let mut screen = screen_with(|description, root| {
        add_slider(description, root, Rect::new(10, 10, 108, 18));
    });

    // Slider-local x maps to value x - 4 on this 108px slider.
    screen.mouse_clicked(320.0, 265.0, left());
    screen.mouse_dragged(354.0, 265.0, left(), 34.0, 0.0);
    screen.mouse_released(374.0, 265.0, left());

    let messages: Vec<_> = screen
        .take_messages()
        .iter()
        .map(|m| {
            m.downcast_ref::<SliderChanged>()
                .map(|c| ("changed", c.value))
                .or_else(|| {
                    m.downcast_ref::<SliderCommitted>()
                        .map(|c| ("committed", c.value))
                })
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            Some(("changed", 40)),
            Some(("committed", 40)),
            Some(("changed", 60)),
            Some(("committed", 60)),
        ]
    );
}

#[test]
fn test_release_outside_container_commits_without_click() {
    let mut screen = screen_with(|description, root| {
        add_slider(description, root, Rect::new(10, 10, 108, 18));
    });

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_dragged(900.0, 265.0, left(), 536.0, 0.0);
    screen.mouse_released(900.0, 265.0, left());
    assert_eq!(
        slider_values::<SliderCommitted>(&mut screen, |m| m.value),
        vec![100]
    );
}

#[test]
fn test_extreme_host_coordinates_saturate() {
    let mut slider = None;
    let mut screen = screen_with(|description, root| {
        slider = Some(add_slider(description, root, Rect::new(10, 10, 108, 18)));
    });
    let slider = slider.expect("slider added");

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_dragged(-1e12, 1e12, left(), -1e12, 1e12);
    screen.mouse_dragged(f64::MAX, f64::MIN, left(), 0.0, 0.0);
    screen.mouse_released(f64::MAX, f64::MIN, left());
    let mut canvas = menukit::RecordingCanvas::new();
    screen.render(&mut canvas, -1e12, 1e12, 0.0);

    let core = screen
        .description()
        .tree()
        .get::<Slider>(slider)
        .expect("slider in tree")
        .core();
    assert_eq!(core.value(), 100);
    assert_eq!(
        slider_values::<SliderCommitted>(&mut screen, |m| m.value),
        vec![100]
    );
}

#[test]
fn test_second_click_during_press_does_not_rehit() {
    let mut slider = None;
    let mut screen = screen_with(|description, root| {
        slider = Some(add_slider(description, root, Rect::new(10, 10, 108, 18)));
    });
    let slider = slider.expect("slider added");

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_clicked(305.0, 340.0, MouseButton::Right);
    assert_eq!(screen.last_responder(), Some(slider));
}

#[test]
fn test_release_without_responder_goes_to_root() {
    let mut screen = screen_with(|_, _| {});
    assert!(screen.mouse_released(310.0, 260.0, left()));
    assert!(screen.mouse_dragged(310.0, 260.0, left(), 1.0, 1.0));
    assert_eq!(screen.last_responder(), None);
}

// =============================================================================
// Focus
// =============================================================================

#[test]
fn test_click_elsewhere_commits_text_field() {
    let mut field = None;
    let mut screen = screen_with(|description, root| {
        let text_field = TextField::new().value("old");
        field = Some(
            description
                .tree_mut()
                .add_child(root, Box::new(text_field), Rect::new(10, 60, 120, 20))
                .expect("root exists"),
        );
    });
    let field = field.expect("field added");

    screen.mouse_clicked(320.0, 315.0, left());
    screen.mouse_released(320.0, 315.0, left());
    assert_eq!(screen.description().focus(), Some(field));

    assert!(screen.key_pressed(Key::Backspace, 14, Modifiers::empty()));
    assert!(screen.char_typed('!'));

    screen.mouse_clicked(480.0, 260.0, left());
    assert_eq!(screen.description().focus(), None);

    let committed: Vec<_> = screen
        .take_messages()
        .iter()
        .filter_map(|m| m.downcast_ref::<TextCommitted>())
        .map(|m| m.value.clone())
        .collect();
    assert_eq!(committed, vec!["ol!".to_string()]);
}

#[test]
fn test_click_inside_focused_widget_keeps_focus() {
    let mut slider = None;
    let mut screen = screen_with(|description, root| {
        slider = Some(add_slider(description, root, Rect::new(10, 10, 108, 18)));
    });
    let slider = slider.expect("slider added");

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_released(364.0, 265.0, left());
    screen.mouse_clicked(370.0, 266.0, left());
    assert_eq!(screen.description().focus(), Some(slider));
    assert_eq!(screen.host().clicks, 2);
}

#[test]
fn test_keyboard_goes_to_focused_slider() {
    let mut screen = screen_with(|description, root| {
        add_slider(description, root, Rect::new(10, 10, 108, 18));
    });

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_released(364.0, 265.0, left());
    screen.take_messages();

    assert!(screen.key_pressed(Key::Right, 333, Modifiers::empty()));
    assert!(screen.key_pressed(Key::Right, 333, Modifiers::empty()));
    assert!(screen.key_released(Key::Right, 333, Modifiers::empty()));
    assert_eq!(
        slider_values::<SliderChanged>(&mut screen, |m| m.value),
        vec![51, 52]
    );

    assert!(screen.key_pressed(Key::Left, 331, Modifiers::CONTROL));
    assert!(screen.key_released(Key::Up, 328, Modifiers::empty()));
    assert_eq!(
        slider_values::<SliderCommitted>(&mut screen, |m| m.value),
        vec![0]
    );
}

#[test]
fn test_host_key_handling_takes_priority() {
    let mut screen = screen_with(|description, root| {
        add_slider(description, root, Rect::new(10, 10, 108, 18));
    });

    screen.mouse_clicked(364.0, 265.0, left());
    screen.mouse_released(364.0, 265.0, left());
    screen.take_messages();

    assert!(screen.key_pressed(Key::Escape, 1, Modifiers::empty()));
    assert_eq!(screen.host().keys, 1);
    assert!(screen.take_messages().is_empty());
}

// =============================================================================
// Scrolling
// =============================================================================

#[test]
fn test_scroll_hit_goes_to_widget_and_commits_on_tick() {
    let mut screen = screen_with(|description, root| {
        add_slider(description, root, Rect::new(10, 10, 108, 18));
    });

    assert!(screen.mouse_scrolled(320.0, 265.0, 1.0));
    assert!(screen.mouse_scrolled(320.0, 265.0, 1.0));
    assert_eq!(screen.host().scrolls, 0);
    for _ in 0..5 {
        screen.tick();
    }
    assert_eq!(
        slider_values::<SliderCommitted>(&mut screen, |m| m.value),
        vec![4]
    );
}

#[test]
fn test_scroll_miss_falls_back_to_host() {
    let mut screen = screen_with(|_, _| {});
    assert!(!screen.mouse_scrolled(5.0, 5.0, 1.0));
    screen.host_mut().scroll_result = true;
    assert!(screen.mouse_scrolled(5.0, 5.0, -1.0));
    assert_eq!(screen.host().scrolls, 2);
    assert!(screen.take_messages().is_empty());
}

// =============================================================================
// No root panel
// =============================================================================

#[test]
fn test_without_root_everything_falls_back_to_host() {
    let mut screen = Screen::new(GuiDescription::new(), CountingHost::default());
    screen.init(800, 600);
    assert!(!screen.mouse_clicked(10.0, 10.0, left()));
    assert!(!screen.mouse_released(10.0, 10.0, left()));
    assert!(!screen.mouse_dragged(10.0, 10.0, left(), 0.0, 0.0));
    assert!(!screen.mouse_scrolled(10.0, 10.0, 1.0));
    assert!(!screen.char_typed('x'));
    assert_eq!(screen.host().clicks, 1);
    assert_eq!(screen.host().scrolls, 1);
    assert_eq!(screen.last_responder(), None);
}
