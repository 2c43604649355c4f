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

//! The error type for document loading, splitting and program building.

use crate::source::ShaderStage;

use std::io;
use std::path::PathBuf;

/// Errors produced while loading, splitting or building shaders.
///
/// None of these are recoverable: the expected response is to fix the
/// shader source or the environment and restart.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The shader document does not exist.
    #[error("shader document `{}` was not found", path.display())]
    DocumentNotFound {
        /// Path the document was expected at.
        path: PathBuf,
    },

    /// The shader document exists but could not be read.
    #[error("failed to read shader document `{}`: {source}", path.display())]
    DocumentUnreadable {
        /// Path of the document.
        path: PathBuf,

        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A `#shader` marker line named no known stage.
    #[error("line {line}: `#shader` marker names no known stage")]
    UnknownStage {
        /// 1-based line number of the marker.
        line: usize,
    },

    /// Source text appeared before the first `#shader` marker.
    #[error("line {line}: source text before the first `#shader` marker")]
    ContentBeforeMarker {
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A shader stage was rejected by the driver's compiler.
    #[error("failed to compile {stage} shader: {log}")]
    Compile {
        /// The stage whose source was rejected.
        stage: ShaderStage,

        /// The driver's info log.
        log: String,
    },

    /// The compiled stages could not be linked into a program.
    #[error("failed to link shader program: {log}")]
    Link {
        /// The driver's info log.
        log: String,
    },

    /// The driver failed to create an object.
    #[error("gl error: {0}")]
    Gl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_name_the_stage() {
        let error = Error::Compile {
            stage: ShaderStage::Vertex,
            log: "0:3(1): error: syntax error, unexpected IDENTIFIER".into(),
        };

        let message = error.to_string();
        assert!(message.contains("vertex"));
        assert!(message.contains("syntax error"));
    }

    #[test]
    fn link_errors_carry_the_log() {
        let error = Error::Link {
            log: "error: fragment shader input `uv` has no matching output".into(),
        };

        assert!(error.to_string().contains("no matching output"));
    }

    #[test]
    fn missing_documents_are_distinct_from_unreadable_ones() {
        let not_found = Error::DocumentNotFound {
            path: "res/shaders/basic.shader".into(),
        };
        let unreadable = Error::DocumentUnreadable {
            path: "res/shaders/basic.shader".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };

        assert!(not_found.to_string().contains("was not found"));
        assert!(unreadable.to_string().contains("failed to read"));
    }
}
