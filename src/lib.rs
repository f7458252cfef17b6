//! Animated, pointer-following eyes on a 2D drawing surface.
//!
//! A board holds eyes whose pupils track the pointer and whose lids blink at
//! random. In edit mode each eye can be selected, dragged and resized through
//! its bounding box and margin handles. Drawing goes through the [`surface`]
//! trait, so the host decides what a frame becomes; the crate ships a
//! recording surface used by the tests and the headless demo binary.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`point`] | 2D value type and debug labels |
//! | [`rect`] | Bounding boxes, margin ring, three-level containment |
//! | [`eye`] | Eye geometry, blink and drag state machines, rendering |
//! | [`board`] | Ordered eyes, selection, pointer routing, frame drawing |
//! | [`render_loop`] | Tick scheduling against a host and the frame counter |
//! | [`input`] | Pointer events in surface coordinates, queued between ticks |
//! | [`driver`] | Tokio interval that pumps input and ticks |
//! | [`surface`] | Drawing surface trait, local frames, recording surface |
//! | [`layout`] | Default grid of eyes |
//! | [`config`] | Environment configuration |
//! | [`color`] | Theme colors and alpha helper |
//! | [`consts`] | Shared geometry and timing constants |

pub mod board;
pub mod color;
pub mod config;
pub mod consts;
pub mod driver;
pub mod eye;
pub mod input;
pub mod layout;
pub mod point;
pub mod rect;
pub mod render_loop;
pub mod surface;
