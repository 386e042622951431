/*
Copyright 2024 Rollen S. D'Souza

Redistribution and use in source and binary forms, with or without modification,
are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice, this
   list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
   this list of conditions and the following disclaimer in the documentation
   and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its contributors
   may be used to endorse or promote products derived from this software without
   specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS “AS IS” AND
ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR
ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
(INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON
ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
*/

//! Error module.
//!
//! Every fallible operation in this crate returns `Result<T, GraphError>`.
//! Nothing panics on malformed but foreseeable input; a failing mutation
//! leaves the graph exactly as it was before the call.

use crate::ids::FrameId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("frame `{0}` already exists")]
    FrameAlreadyExists(FrameId),

    #[error("frame `{0}` is not known to the graph")]
    UnknownFrame(FrameId),

    #[error("frame `{0}` cannot be removed while it still has incident edges")]
    FrameStillConnected(FrameId),

    #[error("an edge already exists between `{0}` and `{1}`")]
    EdgeAlreadyExists(FrameId, FrameId),

    #[error("no edge exists between `{0}` and `{1}`")]
    UnknownEdge(FrameId, FrameId),

    #[error("no transform path exists from `{0}` to `{1}`")]
    UnknownTransform(FrameId, FrameId),

    #[error("item was not found in frame `{0}`")]
    UnknownItem(FrameId),

    #[error("item is already attached to frame `{0}`")]
    FrameAlreadySet(FrameId),

    #[error("frame `{0}` has no items of the requested type")]
    NoItemsOfType(FrameId),

    #[error("`{0}` is not a valid frame id")]
    InvalidFrameId(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
