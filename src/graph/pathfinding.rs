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

//! Graph path finding module.
//!
//! Finds a vertex-to-vertex walk via breadth-first traversal and reconstructs
//! it from a back-edge map recorded while walking, exactly as a plain
//! shortest-path BFS does; the reconstructed walk is then used to compose
//! the transitive transform edge by edge.

use std::collections::HashMap;

use crate::ids::VertexHandle;

use super::traversal::{breadth_first_traversal, GraphVisitor};
use super::{EdgeProps, FrameProps, Graph};

struct WalkBuilder {
    target: VertexHandle,
    back_edge: HashMap<VertexHandle, VertexHandle>,
    found: Option<VertexHandle>,
}

impl GraphVisitor for WalkBuilder {
    fn reset(&mut self) {
        self.back_edge.clear();
        self.found = None;
    }

    fn visit_vertex(&mut self, vertex: VertexHandle) {
        if vertex == self.target {
            self.found = Some(vertex);
        }
    }

    fn visit_edge(&mut self, from: VertexHandle, to: VertexHandle) {
        self.back_edge.entry(to).or_insert(from);
    }

    fn should_terminate(&self) -> bool {
        self.found.is_some()
    }
}

/// Returns the vertex sequence `from -> ... -> to` (inclusive of both ends)
/// if `to` is reachable from `from`, walking the forward adjacency.
pub fn find_path<FP: FrameProps, EP: EdgeProps>(
    graph: &Graph<FP, EP>,
    from: VertexHandle,
    to: VertexHandle,
) -> Option<Vec<VertexHandle>> {
    if from == to {
        return Some(vec![from]);
    }

    let mut builder = WalkBuilder {
        target: to,
        back_edge: HashMap::new(),
        found: None,
    };
    breadth_first_traversal(graph, from, &mut builder);

    builder.found?;

    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = *builder.back_edge.get(&current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
