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

//! Building of executable shader programs.

use crate::{Error, ShaderSource, ShaderStage};

use glow::HasContext;

use std::fmt;
use std::mem;

/// A linked, usable shader program.
///
/// The wrapped driver object stays alive until [`Program::delete`] is
/// called; the context it was built against must still be current at that
/// point.
pub struct Program<H: HasContext + ?Sized> {
    raw: H::Program,
}

impl<H: HasContext + ?Sized> fmt::Debug for Program<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program").finish_non_exhaustive()
    }
}

impl<H: HasContext + ?Sized> Program<H> {
    /// Compile both stages of `source` and link them into a program.
    ///
    /// Compile and link status are queried explicitly; a failure carries
    /// the stage identity and the driver's info log. The intermediate
    /// stage objects are detached and deleted before this returns, whether
    /// or not the build succeeds; only the linked program outlives it.
    ///
    /// # Safety
    ///
    /// The context must be current on this thread.
    pub unsafe fn build(context: &H, source: &ShaderSource) -> Result<Self, Error> {
        let vertex = compile_stage(context, ShaderStage::Vertex, &source.vertex)?;
        let _drop_vertex = CallOnDrop(|| context.delete_shader(vertex));

        let fragment = compile_stage(context, ShaderStage::Fragment, &source.fragment)?;
        let _drop_fragment = CallOnDrop(|| context.delete_shader(fragment));

        let program = context.create_program().map_err(Error::Gl)?;
        let drop_program = CallOnDrop(|| context.delete_program(program));

        context.attach_shader(program, vertex);
        context.attach_shader(program, fragment);
        let _detach = CallOnDrop(|| {
            context.detach_shader(program, vertex);
            context.detach_shader(program, fragment);
        });

        context.link_program(program);
        if !context.get_program_link_status(program) {
            return Err(Error::Link {
                log: context.get_program_info_log(program),
            });
        }

        // Advisory; failures surface through the driver's log output.
        context.validate_program(program);

        tracing::debug!("linked shader program");

        mem::forget(drop_program);
        Ok(Self { raw: program })
    }

    /// Bind this program as the active one for drawing.
    ///
    /// # Safety
    ///
    /// The context must be current on this thread.
    pub unsafe fn activate(&self, context: &H) {
        context.use_program(Some(self.raw));
    }

    /// Resolve the location of a named vertex attribute.
    ///
    /// # Safety
    ///
    /// The context must be current on this thread.
    pub unsafe fn attrib_location(&self, context: &H, name: &str) -> Result<u32, Error> {
        context
            .get_attrib_location(self.raw, name)
            .ok_or_else(|| Error::Gl(format!("failed to get attribute location for {name}")))
    }

    /// Release the driver object.
    ///
    /// # Safety
    ///
    /// The context must be current on this thread.
    pub unsafe fn delete(self, context: &H) {
        context.delete_program(self.raw);
    }
}

/// Compile the source text for one stage into a driver shader object.
unsafe fn compile_stage<H: HasContext + ?Sized>(
    context: &H,
    stage: ShaderStage,
    source: &str,
) -> Result<H::Shader, Error> {
    let shader = context.create_shader(gl_stage(stage)).map_err(Error::Gl)?;
    let drop_shader = CallOnDrop(|| context.delete_shader(shader));

    context.shader_source(shader, source);
    context.compile_shader(shader);

    if !context.get_shader_compile_status(shader) {
        return Err(Error::Compile {
            stage,
            log: context.get_shader_info_log(shader),
        });
    }

    mem::forget(drop_shader);
    Ok(shader)
}

fn gl_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Log and clear any pending driver error.
pub fn gl_error(context: &(impl HasContext + ?Sized)) {
    let err = unsafe { context.get_error() };

    if err != glow::NO_ERROR {
        let error_str = match err {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
            _ => "Unknown GL error",
        };

        tracing::error!("GL error: {}", error_str)
    }
}

struct CallOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for CallOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}
