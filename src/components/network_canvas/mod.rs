//! Decorative "neural network" particle animation.
//!
//! A population of floating nodes joined by pulsing connections, drawn on an
//! HTML canvas:
//! - spring-damped floating motion around per-node anchors
//! - nodes fading in and out as the population drifts within a band
//! - pointer push/pull, click shockwaves, and an optional pointer trail
//! - free scatter or fixed feed-forward layers, chosen by [`NetworkConfig`]
//!
//! The simulation (`state`) has no browser dependencies; the canvas glue lives
//! in `surface`, `frame_loop` and `render`.
//!
//! # Example
//!
//! ```ignore
//! view! { <NetworkCanvas id="hero-network" config=NetworkConfig::layered() /> }
//! ```

mod component;
mod config;
mod frame_loop;
mod particles;
mod physics;
mod render;
mod state;
mod surface;
mod topology;
mod types;

pub use component::NetworkCanvas;
pub use config::NetworkConfig;
