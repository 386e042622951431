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

//! Graph traversal module.
//!
//! Breadth-first traversal over the directed adjacency built by
//! `addTransform`. Because every logical edge is stored as a forward/inverse
//! pair, walking only `forward_edges` still reaches every frame reachable by
//! an undirected walk of the logical graph. Neighbours are visited in
//! ascending `FrameId` order so that, when several shortest paths exist, the
//! one returned is deterministic.

use std::collections::{HashSet, VecDeque};

use crate::ids::VertexHandle;

use super::{EdgeProps, FrameProps, Graph};

/// Callback-style visitor driven by `breadth_first_traversal`.
pub trait GraphVisitor {
    fn reset(&mut self);
    fn visit_vertex(&mut self, vertex: VertexHandle);
    fn visit_edge(&mut self, from: VertexHandle, to: VertexHandle);
    fn should_terminate(&self) -> bool;
}

pub fn breadth_first_traversal<FP: FrameProps, EP: EdgeProps, V: GraphVisitor>(
    graph: &Graph<FP, EP>,
    source: VertexHandle,
    visitor: &mut V,
) {
    assert!(
        graph.vertices.contains_key(&source),
        "the breadth-first search must begin on a vertex in the graph"
    );

    visitor.reset();

    let mut queue = VecDeque::new();
    let mut covered = HashSet::new();

    queue.push_back((None, source));
    covered.insert(source);

    while !visitor.should_terminate() {
        let Some((maybe_from, vertex)) = queue.pop_front() else {
            break;
        };

        if let Some(from) = maybe_from {
            visitor.visit_edge(from, vertex);
        }
        visitor.visit_vertex(vertex);

        let mut neighbours: Vec<VertexHandle> = graph
            .forward_edges
            .get(&vertex)
            .cloned()
            .unwrap_or_default();
        neighbours.sort_by_key(|&v| graph.vertices.get(&v).map(|d| d.frame_id().clone()));

        for to in neighbours {
            if !covered.contains(&to) {
                covered.insert(to);
                queue.push_back((Some(vertex), to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::frame::Frame;
    use crate::ids::FrameId;
    use crate::transform::Transform;

    struct CountingVisitor {
        vertices: usize,
        edges: usize,
    }

    impl GraphVisitor for CountingVisitor {
        fn reset(&mut self) {
            self.vertices = 0;
            self.edges = 0;
        }
        fn visit_vertex(&mut self, _vertex: VertexHandle) {
            self.vertices += 1;
        }
        fn visit_edge(&mut self, _from: VertexHandle, _to: VertexHandle) {
            self.edges += 1;
        }
        fn should_terminate(&self) -> bool {
            false
        }
    }

    #[test]
    fn visits_only_reachable_vertices() {
        let mut g: Graph<Frame, Edge> = Graph::new();
        g.add_frame(FrameId::new("a")).unwrap();
        g.add_frame(FrameId::new("b")).unwrap();
        g.add_frame(FrameId::new("c")).unwrap();
        g.add_transform(
            &FrameId::new("a"),
            &FrameId::new("b"),
            Transform::identity(),
        )
        .unwrap();

        let mut visitor = CountingVisitor {
            vertices: 0,
            edges: 0,
        };
        let a = g.vertex_of(&FrameId::new("a")).unwrap();
        breadth_first_traversal(&g, a, &mut visitor);
        assert_eq!(visitor.vertices, 2);
        assert_eq!(visitor.edges, 1);

        let c = g.vertex_of(&FrameId::new("c")).unwrap();
        breadth_first_traversal(&g, c, &mut visitor);
        assert_eq!(visitor.vertices, 1);
        assert_eq!(visitor.edges, 0);
    }
}
