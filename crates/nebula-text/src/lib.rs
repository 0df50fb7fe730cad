//! Cycling headline text for the nebula landing page.
//!
//! A [`TextCycle`] steps through a fixed word list on a timer. After every
//! step it measures the new word with a [`Measure`] implementation and springs
//! its container width toward the result, while a [`Presence`] cross-fades the
//! outgoing word out before the incoming one fades in.

mod cycle;
mod measure;
mod presence;
mod widget;

pub use cycle::TextCycle;
pub use measure::{CellMeasurer, Measure};
pub use presence::{Layer, Presence};
pub use widget::CycleView;
