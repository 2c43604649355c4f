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

//! The bootstrap demo: open a window, build the shader document and draw a
//! triangle until the window is closed.

use glint::{gl_error, Error, Program, ShaderSource};

use glow::HasContext;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::SwapInterval;
use glutin_winit::{DisplayBuilder, GlWindow};

use raw_window_handle::HasRawWindowHandle;

use std::env;
use std::mem;
use std::num::NonZeroU32;
use std::path::PathBuf;

use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

const WINDOW_TITLE: &str = "glint";
const WINDOW_SIZE: (u32, u32) = (1024, 720);

/// The document loaded when no path is given on the command line.
const DEFAULT_DOCUMENT: &str = "res/shaders/basic.shader";

/// A single point of the triangle, as uploaded to the vertex buffer.
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Vertex {
    pos: [f32; 2],
}

const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [-1.0, -1.0] },
    Vertex { pos: [0.0, 1.0] },
    Vertex { pos: [1.0, -1.0] },
];

fn make_window_builder() -> WindowBuilder {
    WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let document = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT));

    let event_loop = EventLoop::new();

    // On Windows the window has to exist before a config can be chosen;
    // everywhere else it is finalized against the chosen config below.
    let window_builder = if cfg!(windows) {
        Some(make_window_builder())
    } else {
        None
    };

    // Pick the config with the best sample count.
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(window_builder)
        .build(&event_loop, ConfigTemplateBuilder::new(), |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .unwrap()
        })?;

    tracing::debug!(
        api = ?gl_config.api(),
        samples = gl_config.num_samples(),
        "selected GL config"
    );

    let window = match window {
        Some(window) => window,
        None => glutin_winit::finalize_window(&event_loop, make_window_builder(), &gl_config)?,
    };
    let window_handle = window.raw_window_handle();

    // Try a plain context first and fall back to GLES.
    let context_attributes = [
        ContextAttributesBuilder::new().build(Some(window_handle)),
        ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(window_handle)),
    ];

    let display = gl_config.display();
    let not_current = context_attributes
        .iter()
        .find_map(|attributes| unsafe { display.create_context(&gl_config, attributes).ok() })
        .ok_or("could not create a GL context")?;

    let attrs = window.build_surface_attributes(<_>::default());
    let surface = unsafe { display.create_window_surface(&gl_config, &attrs)? };
    let context = not_current.make_current(&surface)?;

    if let Err(error) =
        surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
    {
        tracing::warn!("failed to set vsync: {error:?}");
    }

    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s) as *const _)
    };

    // The bundled document targets GLSL 330 / 300 es.
    let version = gl.version();
    let has_supported_version = if version.is_embedded {
        version.major >= 3
    } else {
        version.major >= 4 || (version.major >= 3 && version.minor >= 3)
    };
    if !has_supported_version {
        return Err("OpenGL version 3.3 (or 3.0 ES) or higher is required".into());
    }

    let source = ShaderSource::load(&document)?;
    let program = unsafe { Program::build(&gl, &source)? };
    tracing::info!(document = %document.display(), "shader program ready");

    // Upload the triangle and wire its one attribute.
    let (vao, vbo) = unsafe {
        let vao = gl.create_vertex_array().map_err(Error::Gl)?;
        let vbo = gl.create_buffer().map_err(Error::Gl)?;

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&TRIANGLE),
            glow::STATIC_DRAW,
        );

        let location = program.attrib_location(&gl, "position")?;
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_f32(
            location,
            2,
            glow::FLOAT,
            false,
            mem::size_of::<Vertex>() as i32,
            0,
        );

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        gl_error(&gl);
        (vao, vbo)
    };

    let mut program = Some(program);

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    if size.width != 0 && size.height != 0 {
                        surface.resize(
                            &context,
                            NonZeroU32::new(size.width).unwrap(),
                            NonZeroU32::new(size.height).unwrap(),
                        );

                        unsafe {
                            gl.viewport(0, 0, size.width as i32, size.height as i32);
                        }
                    }
                }

                WindowEvent::CloseRequested => {
                    // Driver objects go before the context does.
                    if let Some(program) = program.take() {
                        unsafe {
                            gl.delete_buffer(vbo);
                            gl.delete_vertex_array(vao);
                            program.delete(&gl);
                        }
                    }

                    control_flow.set_exit();
                }

                _ => (),
            },

            Event::RedrawEventsCleared => {
                if let Some(program) = &program {
                    unsafe {
                        gl.clear_color(0.0, 0.0, 0.0, 1.0);
                        gl.clear(glow::COLOR_BUFFER_BIT);

                        program.activate(&gl);
                        gl.bind_vertex_array(Some(vao));
                        gl.draw_arrays(glow::TRIANGLES, 0, 3);
                        gl.bind_vertex_array(None);
                    }

                    gl_error(&gl);
                    window.request_redraw();

                    if let Err(error) = surface.swap_buffers(&context) {
                        tracing::error!("failed to swap buffers: {error:?}");
                        control_flow.set_exit();
                    }
                }
            }

            _ => (),
        }
    })
}
