//! Sprite scene graph.
//!
//! A scene is a tree of [`Sprite`] nodes. Leaf kinds carry pre-packed geometry
//! ([`PackPicture`], [`PackPolygon`]); [`PackAnimation`] nodes own a table of
//! child slots and place them per frame. Pack data is immutable and shared
//! through `Arc`, so many sprite instances can reference the same asset.
//!
//! Transforms and colors are combined root-to-leaf with [`compose`].

pub mod error;
pub mod pack;
pub mod sprite;
pub mod trans;

pub use error::*;
pub use pack::*;
pub use sprite::*;
pub use trans::*;
