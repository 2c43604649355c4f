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

//! Splitting of combined shader-source documents.
//!
//! A document carries the GLSL for every pipeline stage in a single file,
//! separated by marker lines:
//!
//! ```text
//! #shader vertex
//! <GLSL vertex source>
//! #shader fragment
//! <GLSL fragment source>
//! ```
//!
//! Any line containing `#shader` is a control line; everything else is
//! source text belonging to the section the last marker selected.

use crate::Error;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// The substring that makes a line a section marker rather than source.
const STAGE_MARKER: &str = "#shader";

/// One stage of the graphics pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,

    /// The fragment stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Per-stage sources split out of a combined document.
///
/// Both buffers always exist; a stage the document never declared is left
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    /// Source text for the vertex stage.
    pub vertex: String,

    /// Source text for the fragment stage.
    pub fragment: String,
}

impl ShaderSource {
    /// Split a combined document into per-stage sources.
    ///
    /// Marker lines containing `vertex` select the vertex section and
    /// marker lines containing `fragment` select the fragment section; a
    /// marker containing both keywords selects the vertex section, as the
    /// keywords are checked in that order. Every other line is appended
    /// verbatim, plus a newline, to the selected section.
    ///
    /// A marker naming no known stage is rejected, as is any non-blank
    /// line before the first marker; both errors carry the 1-based line
    /// number.
    pub fn parse(document: &str) -> Result<Self, Error> {
        let mut source = ShaderSource::default();
        let mut current = None;

        for (index, line) in document.lines().enumerate() {
            if line.contains(STAGE_MARKER) {
                current = Some(if line.contains("vertex") {
                    ShaderStage::Vertex
                } else if line.contains("fragment") {
                    ShaderStage::Fragment
                } else {
                    return Err(Error::UnknownStage { line: index + 1 });
                });
            } else {
                match current {
                    Some(stage) => {
                        let buffer = source.stage_mut(stage);
                        buffer.push_str(line);
                        buffer.push('\n');
                    }

                    // A blank line before the first marker carries no
                    // source text; anything else does.
                    None if line.trim().is_empty() => {}
                    None => return Err(Error::ContentBeforeMarker { line: index + 1 }),
                }
            }
        }

        tracing::debug!(
            vertex_len = source.vertex.len(),
            fragment_len = source.fragment.len(),
            "split shader document"
        );

        Ok(source)
    }

    /// Read a combined document from disk and split it.
    ///
    /// A missing document and an unreadable one are reported as distinct
    /// errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let document = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::DocumentNotFound {
                    path: path.to_owned(),
                }
            } else {
                Error::DocumentUnreadable {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;

        Self::parse(&document)
    }

    /// The source text for one stage.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(document: &str) -> ShaderSource {
        ShaderSource::parse(document).unwrap()
    }

    #[test]
    fn two_section_document() {
        let source = split("#shader vertex\nA\n#shader fragment\nB\n");
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn empty_section() {
        let source = split("#shader vertex\n#shader fragment\nX\n");
        assert_eq!(source.vertex, "");
        assert_eq!(source.fragment, "X\n");
    }

    #[test]
    fn vertex_only_document() {
        let source = split("#shader vertex\nvoid main() {}\n");
        assert_eq!(source.vertex, "void main() {}\n");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn section_order_is_irrelevant() {
        let a = split("#shader vertex\nA\nB\n#shader fragment\nC\n");
        let b = split("#shader fragment\nC\n#shader vertex\nA\nB\n");
        assert_eq!(a, b);
    }

    #[test]
    fn sections_reproduce_their_lines_exactly() {
        let vertex = [
            "#version 330 core",
            "",
            "layout(location = 0) in vec4 position;",
            "",
            "void main() {",
            "    gl_Position = position;",
            "}",
        ];
        let fragment = [
            "#version 330 core",
            "out vec4 color;",
            "void main() { color = vec4(1.0); }",
        ];
        let document = format!(
            "#shader vertex\n{}\n#shader fragment\n{}\n",
            vertex.join("\n"),
            fragment.join("\n"),
        );

        let source = split(&document);
        assert_eq!(source.vertex.lines().collect::<Vec<_>>(), vertex);
        assert_eq!(source.fragment.lines().collect::<Vec<_>>(), fragment);
    }

    #[test]
    fn marker_with_both_keywords_selects_vertex() {
        let source = split("#shader vertex fragment\nA\n");
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn unknown_stage_is_rejected() {
        match ShaderSource::parse("#shader geometry\nA\n") {
            Err(Error::UnknownStage { line: 1 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn content_before_the_first_marker_is_rejected() {
        match ShaderSource::parse("A\n#shader vertex\nB\n") {
            Err(Error::ContentBeforeMarker { line: 1 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_lines_before_the_first_marker_are_ignored() {
        let source = split("\n  \n#shader vertex\nA\n");
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn empty_document() {
        assert_eq!(split(""), ShaderSource::default());
    }

    #[test]
    fn stage_lookup_matches_the_fields() {
        let source = split("#shader vertex\nA\n#shader fragment\nB\n");
        assert_eq!(source.stage(ShaderStage::Vertex), "A\n");
        assert_eq!(source.stage(ShaderStage::Fragment), "B\n");
    }

    #[test]
    fn load_reports_missing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.shader");

        match ShaderSource::load(&path) {
            Err(Error::DocumentNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn load_splits_documents_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.shader");
        fs::write(&path, "#shader vertex\nA\n#shader fragment\nB\n").unwrap();

        let source = ShaderSource::load(&path).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }
}
