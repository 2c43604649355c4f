// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `glint`.
//
// `glint` is free software: you can redistribute it and/or modify it under the terms of
// either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `glint` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Lesser General Public License or the Mozilla Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `glint`. If not, see <https://www.gnu.org/licenses/>.

//! A minimal OpenGL bootstrap: combined shader-source documents in, linked
//! shader programs out.
//!
//! A single document carries the GLSL for every pipeline stage, separated
//! by `#shader` marker lines. [`ShaderSource`] splits such a document into
//! per-stage source text, and [`Program`] compiles and links the stages
//! against a [`glow`] context, with compile and link status checked and
//! failures surfaced together with the driver's diagnostics.
//!
//! The crate's binary opens a window, builds the bundled document and
//! draws a triangle with it; the library itself carries no windowing code.
//! Every GL-issuing function takes the context explicitly and requires it
//! to be current on the calling thread.
//!
//! [`glow`]: https://crates.io/crates/glow

mod error;
mod program;
mod source;

pub use error::Error;
pub use program::{gl_error, Program};
pub use source::{ShaderSource, ShaderStage};
