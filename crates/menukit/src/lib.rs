//! menukit: widget-based menu screens for a host game engine.
//!
//! The host owns the window and render loop and forwards its screen
//! callbacks to a [`Screen`]. The screen routes them into a widget tree held
//! by a [`GuiDescription`].
//!
//! ```
//! use menukit::widgets::{Panel, Slider, SliderCommitted};
//! use menukit::{GuiDescription, MouseButton, Rect, Screen, Size};
//!
//! let mut description = GuiDescription::new();
//! let tree = description.tree_mut();
//! let root = tree.insert_root(Box::new(Panel::new()), Size::new(200, 100));
//! let slider = Slider::horizontal(0, 100).expect("valid range");
//! tree.add_child(root, Box::new(slider), Rect::new(10, 10, 108, 18))
//!     .expect("root exists");
//! description.set_root_panel(root);
//!
//! let mut screen = Screen::standalone(description);
//! screen.init(800, 600);
//! screen.mouse_clicked(364.0, 265.0, MouseButton::Left);
//! screen.mouse_released(364.0, 265.0, MouseButton::Left);
//!
//! let committed: Vec<i32> = screen
//!     .take_messages()
//!     .iter()
//!     .filter_map(|m| m.downcast_ref::<SliderCommitted>())
//!     .map(|c| c.value)
//!     .collect();
//! assert_eq!(committed, vec![50]);
//! ```

pub use menukit_core::*;
pub use menukit_widgets as widgets;

mod screen;

pub use screen::{Host, NullHost, Screen};
