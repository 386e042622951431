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

//! Graph mutators module.
//!
//! Low-level, structural-only mutation of the vertex/edge maps: acquiring a
//! vertex handle and inserting a frame datum, or threading an edge pair into
//! the forward/backward adjacency lists. These never emit events or check
//! business-level invariants (duplicate ids, dangling removal); `Graph`'s
//! public methods in `super` do that and call down into these.

use crate::ids::VertexHandle;
use crate::utility::idregistry::IdentifierRegistry;

use super::{EdgeProps, FrameProps, Graph};

impl<FP: FrameProps, EP: EdgeProps> Graph<FP, EP> {
    pub(super) fn insert_vertex(&mut self, data: FP) -> VertexHandle {
        let handle = self
            .vertex_registry
            .acquire_id()
            .expect("vertex identifier registry exhausted");
        self.frame_index.insert(data.frame_id().clone(), handle);
        self.vertices.insert(handle, data);
        handle
    }

    pub(super) fn remove_vertex(&mut self, handle: VertexHandle) -> FP {
        let data = self
            .vertices
            .remove(&handle)
            .expect("remove_vertex called on an unknown handle");
        self.frame_index.remove(data.frame_id());
        let _ = self.vertex_registry.release_id(handle);
        data
    }

    pub(super) fn insert_directed_edge(&mut self, from: VertexHandle, to: VertexHandle, data: EP) {
        self.edges.insert((from, to), data);
        self.forward_edges.entry(from).or_default().push(to);
        self.backward_edges.entry(to).or_default().push(from);
    }

    pub(super) fn remove_directed_edge(&mut self, from: VertexHandle, to: VertexHandle) -> EP {
        let data = self
            .edges
            .remove(&(from, to))
            .expect("remove_directed_edge called on an unknown edge");
        if let Some(list) = self.forward_edges.get_mut(&from) {
            list.retain(|&v| v != to);
        }
        if let Some(list) = self.backward_edges.get_mut(&to) {
            list.retain(|&v| v != from);
        }
        data
    }
}
