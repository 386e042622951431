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

//! Tree view module.
//!
//! A read-only, BFS-derived rooted tree projection of the graph: which
//! frames are whose children, and which edges didn't make it into the tree
//! (cross edges). Invalidated by any subsequent mutation; the caller is
//! responsible for not holding on to a stale one.

use std::collections::HashMap;

use crate::ids::{FrameId, VertexHandle};

use super::traversal::{breadth_first_traversal, GraphVisitor};
use super::{EdgeProps, FrameProps, Graph};

pub struct TreeView {
    root: FrameId,
    parent: HashMap<FrameId, FrameId>,
    children: HashMap<FrameId, Vec<FrameId>>,
    depth: HashMap<FrameId, usize>,
    cross_edges: Vec<(FrameId, FrameId)>,
}

impl TreeView {
    pub fn root(&self) -> &FrameId {
        &self.root
    }

    pub fn parent_of(&self, frame: &FrameId) -> Option<&FrameId> {
        self.parent.get(frame)
    }

    pub fn children_of(&self, frame: &FrameId) -> &[FrameId] {
        self.children.get(frame).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distance from the root in tree edges; `Some(0)` for the root itself,
    /// `None` for a frame outside this tree (a different connected component).
    pub fn depth_of(&self, frame: &FrameId) -> Option<usize> {
        self.depth.get(frame).copied()
    }

    pub fn cross_edges(&self) -> &[(FrameId, FrameId)] {
        &self.cross_edges
    }
}

struct TreeBuilder<FP: FrameProps> {
    vertices: HashMap<VertexHandle, FrameId>,
    parent: HashMap<VertexHandle, VertexHandle>,
    children: HashMap<VertexHandle, Vec<VertexHandle>>,
    depth: HashMap<VertexHandle, usize>,
    tree_edges: std::collections::HashSet<(VertexHandle, VertexHandle)>,
    _marker: std::marker::PhantomData<FP>,
}

impl<FP: FrameProps> GraphVisitor for TreeBuilder<FP> {
    fn reset(&mut self) {
        self.parent.clear();
        self.children.clear();
        self.tree_edges.clear();
    }

    fn visit_vertex(&mut self, _vertex: VertexHandle) {}

    fn visit_edge(&mut self, from: VertexHandle, to: VertexHandle) {
        self.parent.insert(to, from);
        self.children.entry(from).or_default().push(to);
        self.tree_edges.insert((from, to));

        let from_depth = *self.depth.get(&from).expect("parent visited before its children");
        self.depth.insert(to, from_depth + 1);
    }

    fn should_terminate(&self) -> bool {
        false
    }
}

pub fn build_tree<FP: FrameProps, EP: EdgeProps>(
    graph: &Graph<FP, EP>,
    root: VertexHandle,
) -> TreeView {
    let vertices: HashMap<VertexHandle, FrameId> = graph
        .vertices
        .iter()
        .map(|(&h, d)| (h, d.frame_id().clone()))
        .collect();

    let mut builder = TreeBuilder {
        vertices: vertices.clone(),
        parent: HashMap::new(),
        children: HashMap::new(),
        depth: HashMap::from([(root, 0)]),
        tree_edges: std::collections::HashSet::new(),
        _marker: std::marker::PhantomData,
    };
    breadth_first_traversal(graph, root, &mut builder);

    let mut cross_edges = Vec::new();
    for (&from, tos) in &graph.forward_edges {
        for &to in tos {
            if !builder.tree_edges.contains(&(from, to)) {
                cross_edges.push((vertices[&from].clone(), vertices[&to].clone()));
            }
        }
    }
    cross_edges.sort();

    TreeView {
        root: vertices[&root].clone(),
        parent: builder
            .parent
            .iter()
            .map(|(&c, &p)| (vertices[&c].clone(), vertices[&p].clone()))
            .collect(),
        children: builder
            .children
            .iter()
            .map(|(&p, cs)| {
                let mut names: Vec<FrameId> = cs.iter().map(|c| vertices[c].clone()).collect();
                names.sort();
                (vertices[&p].clone(), names)
            })
            .collect(),
        depth: builder
            .depth
            .iter()
            .map(|(&v, &d)| (vertices[&v].clone(), d))
            .collect(),
        cross_edges,
    }
}
