//! Widget implementations for menukit screens.

pub mod button;
pub mod label;
pub mod labeled_slider;
pub mod panel;
pub mod slider;
pub mod slider_core;
pub mod text_field;

pub use button::{Button, ButtonClicked};
pub use label::Label;
pub use labeled_slider::{LabelFormatter, LabeledSlider};
pub use panel::Panel;
pub use slider::Slider;
pub use slider_core::{
    SliderChanged, SliderCommitted, SliderCore, SliderError, SliderPhase, SliderUpdate,
    ValueListener, SCROLL_COMMIT_COOLDOWN_TICKS,
};
pub use text_field::{TextChanged, TextCommitted, TextField};
