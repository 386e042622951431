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

//! Graph module.
//!
//! A generic directed graph of frames connected by edges, parameterised over
//! a frame-property type `FP` and an edge-property type `EP`. Stores both
//! forward and backward adjacency, and maintains a bijection between the
//! externally-addressed `FrameId` and an internally stable `VertexHandle`
//! allocated from an `ExplicitIntegralIdentifierRegistry` — this lets the
//! rest of the graph work with a cheap `Copy` handle while callers keep
//! addressing frames by name.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::error::{GraphError, GraphResult};
use crate::events::{Event, EventPublisher, SubscriberHandle};
use crate::frame::FrameProps;
use crate::edge::EdgeProps;
use crate::ids::{FrameId, VertexHandle};
use crate::transform::Transform;
use crate::utility::idregistry::ExplicitIntegralIdentifierRegistry;

pub mod mutators;
pub mod pathfinding;
pub mod traversal;
pub mod tree;

pub use tree::TreeView;

pub struct Graph<FP: FrameProps, EP: EdgeProps> {
    vertex_registry: ExplicitIntegralIdentifierRegistry,
    frame_index: HashMap<FrameId, VertexHandle>,
    vertices: HashMap<VertexHandle, FP>,
    edges: HashMap<(VertexHandle, VertexHandle), EP>,
    forward_edges: HashMap<VertexHandle, Vec<VertexHandle>>,
    backward_edges: HashMap<VertexHandle, Vec<VertexHandle>>,
    publisher: EventPublisher,
}

impl<FP: FrameProps, EP: EdgeProps> Default for Graph<FP, EP> {
    fn default() -> Self {
        Graph {
            vertex_registry: ExplicitIntegralIdentifierRegistry::default(),
            frame_index: HashMap::new(),
            vertices: HashMap::new(),
            edges: HashMap::new(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
            publisher: EventPublisher::new(),
        }
    }
}

impl<FP: FrameProps, EP: EdgeProps> Graph<FP, EP> {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Counts directed edges; a logical edge between two frames contributes
    /// two to this count (forward and inverse).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn publisher(&mut self) -> &mut EventPublisher {
        &mut self.publisher
    }

    pub fn subscribe(&mut self, subscriber: SubscriberHandle) {
        self.publisher.subscribe(subscriber);
    }

    pub fn unsubscribe(&mut self, subscriber: &SubscriberHandle) {
        self.publisher.unsubscribe(subscriber);
    }

    pub fn contains_frame(&self, id: &FrameId) -> bool {
        self.frame_index.contains_key(id)
    }

    pub fn vertex_of(&self, id: &FrameId) -> GraphResult<VertexHandle> {
        self.frame_index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownFrame(id.clone()))
    }

    pub fn frame(&self, id: &FrameId) -> GraphResult<&FP> {
        let handle = self.vertex_of(id)?;
        Ok(self.vertices.get(&handle).expect("vertex index is stale"))
    }

    pub fn frame_mut(&mut self, id: &FrameId) -> GraphResult<&mut FP> {
        let handle = self.vertex_of(id)?;
        Ok(self
            .vertices
            .get_mut(&handle)
            .expect("vertex index is stale"))
    }

    pub fn frame_ids(&self) -> impl Iterator<Item = &FrameId> {
        self.frame_index.keys()
    }

    /// Adds an isolated frame. Fails if the id is already present, or empty.
    pub fn add_frame_with(&mut self, id: FrameId, data: FP) -> GraphResult<VertexHandle> {
        if !id.is_valid() {
            warn!("rejected empty frame id");
            return Err(GraphError::InvalidFrameId(id.as_str().to_string()));
        }
        if self.frame_index.contains_key(&id) {
            warn!(%id, "frame already exists");
            return Err(GraphError::FrameAlreadyExists(id));
        }

        let handle = self.insert_vertex(data);
        trace!(%id, "frame added");
        self.publisher.notify(&Event::FrameAdded { frame: id });
        Ok(handle)
    }

    pub fn remove_frame(&mut self, id: &FrameId) -> GraphResult<FP> {
        let handle = self.vertex_of(id)?;

        let still_connected = self
            .forward_edges
            .get(&handle)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
            || self
                .backward_edges
                .get(&handle)
                .map(|v| !v.is_empty())
                .unwrap_or(false);

        if still_connected {
            warn!(%id, "refused to remove a frame with incident edges");
            return Err(GraphError::FrameStillConnected(id.clone()));
        }

        let data = self.remove_vertex(handle);
        trace!(%id, "frame removed");
        self.publisher.notify(&Event::FrameRemoved {
            frame: id.clone(),
        });
        Ok(data)
    }

    fn edge_exists(&self, from: VertexHandle, to: VertexHandle) -> bool {
        self.edges.contains_key(&(from, to))
    }

    /// Inserts a directed edge pair `origin -> target` (with `data`) and
    /// `target -> origin` (with `data.inverse_props()`). Frames named that
    /// do not yet exist are created implicitly via `make_frame`, each
    /// emitting its own `FrameAdded` first.
    pub fn add_edge_pair(
        &mut self,
        origin: &FrameId,
        target: &FrameId,
        data: EP,
        make_frame: impl Fn(&FrameId) -> FP,
    ) -> GraphResult<()> {
        if !origin.is_valid() || !target.is_valid() {
            return Err(GraphError::InvalidFrameId(
                if !origin.is_valid() {
                    origin.as_str()
                } else {
                    target.as_str()
                }
                .to_string(),
            ));
        }

        let origin_handle = match self.frame_index.get(origin) {
            Some(&h) => h,
            None => self.add_frame_with(origin.clone(), make_frame(origin))?,
        };
        let target_handle = match self.frame_index.get(target) {
            Some(&h) => h,
            None => self.add_frame_with(target.clone(), make_frame(target))?,
        };

        if self.edge_exists(origin_handle, target_handle) {
            warn!(%origin, %target, "edge already exists");
            return Err(GraphError::EdgeAlreadyExists(origin.clone(), target.clone()));
        }

        let inverse = data.inverse_props();
        self.insert_directed_edge(origin_handle, target_handle, data);
        self.insert_directed_edge(target_handle, origin_handle, inverse);

        trace!(%origin, %target, "edge pair added");
        self.publisher.notify(&Event::EdgeAdded {
            origin: origin.clone(),
            target: target.clone(),
        });
        self.publisher.notify(&Event::EdgeAdded {
            origin: target.clone(),
            target: origin.clone(),
        });
        Ok(())
    }

    pub fn update_edge_pair(
        &mut self,
        origin: &FrameId,
        target: &FrameId,
        transform: Transform,
    ) -> GraphResult<()> {
        let origin_handle = self.vertex_of(origin)?;
        let target_handle = self.vertex_of(target)?;

        if !self.edge_exists(origin_handle, target_handle) {
            return Err(GraphError::UnknownEdge(origin.clone(), target.clone()));
        }

        let forward = self.edges.get(&(origin_handle, target_handle)).unwrap();
        let updated_forward = forward.with_transform(transform);
        let updated_backward = updated_forward.inverse_props();

        self.edges
            .insert((origin_handle, target_handle), updated_forward);
        self.edges
            .insert((target_handle, origin_handle), updated_backward);

        trace!(%origin, %target, "edge pair updated");
        self.publisher.notify(&Event::EdgeModified {
            origin: origin.clone(),
            target: target.clone(),
        });
        Ok(())
    }

    pub fn remove_edge_pair(&mut self, origin: &FrameId, target: &FrameId) -> GraphResult<()> {
        let origin_handle = self.vertex_of(origin)?;
        let target_handle = self.vertex_of(target)?;

        if !self.edge_exists(origin_handle, target_handle) {
            return Err(GraphError::UnknownEdge(origin.clone(), target.clone()));
        }

        self.remove_directed_edge(origin_handle, target_handle);
        self.remove_directed_edge(target_handle, origin_handle);

        trace!(%origin, %target, "edge pair removed");
        self.publisher.notify(&Event::EdgeRemoved {
            origin: origin.clone(),
            target: target.clone(),
        });
        self.publisher.notify(&Event::EdgeRemoved {
            origin: target.clone(),
            target: origin.clone(),
        });
        Ok(())
    }

    pub fn get_edge(&self, origin: &FrameId, target: &FrameId) -> GraphResult<&EP> {
        let origin_handle = self.vertex_of(origin)?;
        let target_handle = self.vertex_of(target)?;
        self.edges
            .get(&(origin_handle, target_handle))
            .ok_or_else(|| GraphError::UnknownEdge(origin.clone(), target.clone()))
    }

    pub fn get_transform(&self, origin: &FrameId, target: &FrameId) -> GraphResult<Transform> {
        self.get_edge(origin, target).map(|e| e.transform().clone())
    }

    /// Composes a transform along the shortest path from `from` to `to`,
    /// deterministic-by-`FrameId` when multiple shortest paths exist.
    pub fn get_transitive_transform(
        &self,
        from: &FrameId,
        to: &FrameId,
    ) -> GraphResult<Transform> {
        let from_handle = self.vertex_of(from)?;
        let to_handle = self.vertex_of(to)?;

        if from_handle == to_handle {
            return Ok(Transform::identity());
        }

        let path = pathfinding::find_path(self, from_handle, to_handle)
            .ok_or_else(|| GraphError::UnknownTransform(from.clone(), to.clone()))?;

        let mut composed = Transform::identity();
        for pair in path.windows(2) {
            let edge = self
                .edges
                .get(&(pair[0], pair[1]))
                .expect("path edge must exist");
            composed = composed.compose(edge.transform());
        }
        Ok(composed)
    }

    pub fn get_tree(&self, root: &FrameId) -> GraphResult<TreeView> {
        let root_handle = self.vertex_of(root)?;
        Ok(tree::build_tree(self, root_handle))
    }

    /// Reverse of `vertex_of`; used by replay logic that walks vertex
    /// handles from a traversal and needs to report `FrameId`s to callers.
    pub fn frame_id_of(&self, handle: VertexHandle) -> Option<&FrameId> {
        self.vertices.get(&handle).map(|d| d.frame_id())
    }

    /// Every directed edge as a `(origin, target)` `FrameId` pair; a logical
    /// edge contributes both its forward and inverse entry, mirroring
    /// `num_edges`.
    pub fn forward_edge_frame_pairs(&self) -> Vec<(FrameId, FrameId)> {
        let mut pairs = Vec::new();
        for (&from, tos) in &self.forward_edges {
            let from_id = self.vertices[&from].frame_id().clone();
            for &to in tos {
                let to_id = self.vertices[&to].frame_id().clone();
                pairs.push((from_id.clone(), to_id));
            }
        }
        pairs
    }
}

/// Convenience surface matching the original `addFrame`/`addTransform`-style
/// naming one-for-one, available whenever `FP`/`EP` know how to build
/// themselves from a bare `FrameId`/`Transform`.
impl<FP, EP> Graph<FP, EP>
where
    FP: FrameProps + From<FrameId>,
    EP: EdgeProps + From<Transform>,
{
    pub fn add_frame(&mut self, id: FrameId) -> GraphResult<VertexHandle> {
        let data = FP::from(id.clone());
        self.add_frame_with(id, data)
    }

    pub fn add_transform(
        &mut self,
        origin: &FrameId,
        target: &FrameId,
        transform: Transform,
    ) -> GraphResult<()> {
        self.add_edge_pair(origin, target, EP::from(transform), |id| {
            FP::from(id.clone())
        })
    }

    pub fn update_transform(
        &mut self,
        origin: &FrameId,
        target: &FrameId,
        transform: Transform,
    ) -> GraphResult<()> {
        self.update_edge_pair(origin, target, transform)
    }

    pub fn remove_transform(&mut self, origin: &FrameId, target: &FrameId) -> GraphResult<()> {
        self.remove_edge_pair(origin, target)
    }
}

mod tests;
