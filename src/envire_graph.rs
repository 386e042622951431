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

//! EnvireGraph module.
//!
//! `EnvireGraph` wraps a `Graph<Frame, Edge>` and adds the item index:
//! attaching/detaching typed items to frames, typed lookup, and a filtered
//! copy constructor. It derefs to the underlying `Graph` so every frame and
//! transform operation is available unchanged.
//!
//! A subscriber wired up through `subscribe()` must not mutate the graph
//! it is watching from inside its own `on_event` (see
//! `EventPublisher::notify`); doing so through a shared
//! `Rc<RefCell<EnvireGraph>>` back-reference hits `RefCell`'s reentrant
//! double-borrow panic rather than returning a `GraphError`.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::events::{Event, SubscriberHandle};
use crate::frame::Frame;
use crate::graph::traversal::{breadth_first_traversal, GraphVisitor};
use crate::graph::Graph;
use crate::ids::{type_tag_name_of, type_tag_of, FrameId, TypeTag, VertexHandle};
use crate::item::{Item, ItemHandle};

#[derive(Default)]
pub struct EnvireGraph {
    graph: Graph<Frame, Edge>,
}

impl Deref for EnvireGraph {
    type Target = Graph<Frame, Edge>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl DerefMut for EnvireGraph {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.graph
    }
}

impl EnvireGraph {
    pub fn new() -> Self {
        EnvireGraph::default()
    }

    /// Attaches `item` to `frame_id`. Fails if the frame is unknown, or if
    /// the item is already attached somewhere (`FrameAlreadySet`).
    pub fn add_item_to_frame<T: Clone + 'static>(
        &mut self,
        frame_id: &FrameId,
        item: Item<T>,
    ) -> GraphResult<()> {
        if let Some(current) = item.frame() {
            return Err(GraphError::FrameAlreadySet(current));
        }
        if !self.graph.contains_frame(frame_id) {
            return Err(GraphError::UnknownFrame(frame_id.clone()));
        }

        let tag = type_tag_of::<T>();
        let type_name = type_tag_name_of::<T>();
        let uuid = item.uuid();
        item.set_frame(Some(frame_id.clone()));

        let handle: Rc<dyn ItemHandle> = Rc::new(item);
        self.graph
            .frame_mut(frame_id)
            .expect("presence just checked")
            .insert_item(tag, Rc::clone(&handle));

        self.graph.publisher().notify(&Event::ItemAddedToFrame {
            frame: frame_id.clone(),
            uuid,
            type_tag: tag,
            type_name,
            item: handle,
        });
        Ok(())
    }

    /// Detaches `item` from whichever frame its back-reference names.
    /// Fails with `UnknownItem` if the item isn't attached, or isn't
    /// actually present in that frame's list.
    pub fn remove_item_from_frame<T: Clone + 'static>(&mut self, item: &Item<T>) -> GraphResult<()> {
        let frame_id = item
            .frame()
            .ok_or_else(|| GraphError::UnknownItem(FrameId::new("")))?;

        let tag = type_tag_of::<T>();
        let type_name = type_tag_name_of::<T>();
        let uuid = item.uuid();

        let removed = self
            .graph
            .frame_mut(&frame_id)?
            .remove_item(tag, uuid)
            .ok_or_else(|| GraphError::UnknownItem(frame_id.clone()))?;
        removed.set_frame(None);

        self.graph.publisher().notify(&Event::ItemRemovedFromFrame {
            frame: frame_id,
            uuid,
            type_tag: tag,
            type_name,
            item: removed,
        });
        Ok(())
    }

    /// Removes every item attached to `frame_id`, emitting one event per
    /// item. Identical in effect to `clear_frame`.
    pub fn remove_items_from_frame(&mut self, frame_id: &FrameId) -> GraphResult<usize> {
        self.clear_frame(frame_id)
    }

    pub fn clear_frame(&mut self, frame_id: &FrameId) -> GraphResult<usize> {
        let drained = self.graph.frame_mut(frame_id)?.drain_all();
        let count = drained.len();
        for handle in drained {
            handle.set_frame(None);
            self.graph.publisher().notify(&Event::ItemRemovedFromFrame {
                frame: frame_id.clone(),
                uuid: handle.uuid(),
                type_tag: handle.type_tag(),
                type_name: handle.type_tag_name(),
                item: Rc::clone(&handle),
            });
        }
        Ok(count)
    }

    /// Every item of type `T` attached to `frame_id`, as fresh shared
    /// handles onto the same underlying payloads.
    pub fn items_of_frame<T: Clone + 'static>(&self, frame_id: &FrameId) -> GraphResult<Vec<Item<T>>> {
        let tag = type_tag_of::<T>();
        let frame = self.graph.frame(frame_id)?;
        Ok(frame
            .items_of_tag(tag)
            .iter()
            .map(|handle| {
                handle
                    .as_any()
                    .downcast_ref::<Item<T>>()
                    .expect("type tag match implies this handle is an Item<T>")
                    .share()
            })
            .collect())
    }

    pub fn item_count_of_frame<T: Clone + 'static>(&self, frame_id: &FrameId) -> GraphResult<usize> {
        Ok(self.graph.frame(frame_id)?.item_count_of_tag(type_tag_of::<T>()))
    }

    pub fn total_item_count(&self, frame_id: &FrameId) -> GraphResult<usize> {
        Ok(self.graph.frame(frame_id)?.total_item_count())
    }

    pub fn contains_items<T: Clone + 'static>(&self, frame_id: &FrameId) -> GraphResult<bool> {
        Ok(self.graph.frame(frame_id)?.contains_tag(type_tag_of::<T>()))
    }

    /// Duplicates the graph structurally (frames, edges copied verbatim)
    /// while filtering item lists. `keep == true` retains only items whose
    /// type tag is in `type_tags`; `keep == false` drops them. Item clones
    /// retain their original uuid — the copy is a snapshot, not a new set of
    /// entities.
    pub fn filtered_copy(&self, type_tags: &HashSet<TypeTag>, keep: bool) -> EnvireGraph {
        let mut copy = EnvireGraph::new();

        for id in self.graph.frame_ids() {
            let original = self.graph.frame(id).expect("frame_ids only yields present frames");
            copy.graph
                .add_frame_with(id.clone(), original.structural_clone())
                .expect("fresh graph cannot already contain this frame");
        }

        for (origin, target) in self.graph.forward_edge_frame_pairs() {
            if origin.as_str() > target.as_str() {
                continue;
            }
            let edge = self
                .graph
                .get_edge(&origin, &target)
                .expect("pair came from forward_edge_frame_pairs")
                .clone();
            copy.graph
                .add_edge_pair(&origin, &target, edge, |_| {
                    unreachable!("both frames were pre-populated above")
                })
                .expect("fresh structural copy cannot already have this edge");
        }

        for id in self.graph.frame_ids() {
            let original = self.graph.frame(id).expect("frame_ids only yields present frames");
            let new_frame = copy.graph.frame_mut(id).expect("frame copied above");
            for tag in original.type_tags() {
                let matches = type_tags.contains(&tag);
                if matches != keep {
                    continue;
                }
                for handle in original.items_of_tag(tag) {
                    let cloned = handle.clone_payload_into();
                    cloned.set_frame(Some(id.clone()));
                    new_frame.insert_item(tag, cloned);
                }
            }
        }

        copy
    }

    /// Subscribes `subscriber`; if `publish_current_state`, immediately
    /// replays a `FrameAdded`/`EdgeAdded`/`ItemAddedToFrame` sequence that
    /// brings it up to date, delivered only to this subscriber.
    pub fn subscribe(&mut self, subscriber: SubscriberHandle, publish_current_state: bool) {
        if publish_current_state {
            self.replay_current_state(&subscriber, true);
        }
        self.graph.subscribe(subscriber);
    }

    /// Unsubscribes `subscriber`; if `unpublish_current_state`, first
    /// replays the inverse sequence (items removed, edges removed, frames
    /// removed) to it alone.
    pub fn unsubscribe(&mut self, subscriber: &SubscriberHandle, unpublish_current_state: bool) {
        if unpublish_current_state {
            self.replay_current_state(subscriber, false);
        }
        self.graph.unsubscribe(subscriber);
    }

    fn replay_current_state(&self, subscriber: &SubscriberHandle, adding: bool) {
        #[derive(Default)]
        struct OrderRecorder {
            vertices: Vec<VertexHandle>,
        }
        impl GraphVisitor for OrderRecorder {
            fn reset(&mut self) {
                self.vertices.clear();
            }
            fn visit_vertex(&mut self, vertex: VertexHandle) {
                self.vertices.push(vertex);
            }
            fn visit_edge(&mut self, _from: VertexHandle, _to: VertexHandle) {}
            fn should_terminate(&self) -> bool {
                false
            }
        }

        let mut all_ids: Vec<FrameId> = self.graph.frame_ids().cloned().collect();
        all_ids.sort();

        let mut visited: HashSet<FrameId> = HashSet::new();
        let mut components: Vec<Vec<FrameId>> = Vec::new();

        for root in &all_ids {
            if visited.contains(root) {
                continue;
            }
            let root_handle = self.graph.vertex_of(root).expect("came from frame_ids");
            let mut recorder = OrderRecorder::default();
            breadth_first_traversal(&self.graph, root_handle, &mut recorder);

            let component: Vec<FrameId> = recorder
                .vertices
                .iter()
                .map(|&v| self.graph.frame_id_of(v).expect("visited vertex exists").clone())
                .collect();
            for id in &component {
                visited.insert(id.clone());
            }
            components.push(component);
        }

        if adding {
            for component in &components {
                for id in component {
                    subscriber
                        .borrow_mut()
                        .on_event(&Event::FrameAdded { frame: id.clone() });
                }
                let mut edges: Vec<(FrameId, FrameId)> = self
                    .graph
                    .forward_edge_frame_pairs()
                    .into_iter()
                    .filter(|(o, _)| component.contains(o))
                    .collect();
                edges.sort();
                for (origin, target) in edges {
                    subscriber
                        .borrow_mut()
                        .on_event(&Event::EdgeAdded { origin, target });
                }
                for id in component {
                    let frame = self.graph.frame(id).expect("component frame exists");
                    for handle in frame.all_items() {
                        subscriber.borrow_mut().on_event(&Event::ItemAddedToFrame {
                            frame: id.clone(),
                            uuid: handle.uuid(),
                            type_tag: handle.type_tag(),
                            type_name: handle.type_tag_name(),
                            item: Rc::clone(handle),
                        });
                    }
                }
            }
        } else {
            for component in components.iter().rev() {
                for id in component {
                    let frame = self.graph.frame(id).expect("component frame exists");
                    for handle in frame.all_items() {
                        subscriber.borrow_mut().on_event(&Event::ItemRemovedFromFrame {
                            frame: id.clone(),
                            uuid: handle.uuid(),
                            type_tag: handle.type_tag(),
                            type_name: handle.type_tag_name(),
                            item: Rc::clone(handle),
                        });
                    }
                }
                let mut edges: Vec<(FrameId, FrameId)> = self
                    .graph
                    .forward_edge_frame_pairs()
                    .into_iter()
                    .filter(|(o, _)| component.contains(o))
                    .collect();
                edges.sort();
                for (origin, target) in edges {
                    subscriber
                        .borrow_mut()
                        .on_event(&Event::EdgeRemoved { origin, target });
                }
                for id in component.iter().rev() {
                    subscriber
                        .borrow_mut()
                        .on_event(&Event::FrameRemoved { frame: id.clone() });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    #[derive(Clone, Debug, PartialEq)]
    struct Sensor {
        reading: f64,
    }

    fn graph_with_two_frames() -> EnvireGraph {
        let mut g = EnvireGraph::new();
        g.add_frame(FrameId::new("a")).unwrap();
        g.add_frame(FrameId::new("b")).unwrap();
        g
    }

    #[test]
    fn add_then_look_up_item() {
        let mut g = graph_with_two_frames();
        let item = Item::new(Sensor { reading: 1.5 });
        g.add_item_to_frame(&FrameId::new("a"), item.share()).unwrap();

        let items = g.items_of_frame::<Sensor>(&FrameId::new("a")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get().reading, 1.5);
        assert_eq!(g.item_count_of_frame::<Sensor>(&FrameId::new("b")).unwrap(), 0);
    }

    #[test]
    fn add_item_to_unknown_frame_fails() {
        let mut g = EnvireGraph::new();
        let item = Item::new(Sensor { reading: 1.0 });
        let err = g
            .add_item_to_frame(&FrameId::new("ghost"), item)
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownFrame(FrameId::new("ghost")));
    }

    #[test]
    fn add_item_twice_is_rejected() {
        let mut g = graph_with_two_frames();
        let item = Item::new(Sensor { reading: 1.0 });
        g.add_item_to_frame(&FrameId::new("a"), item.share()).unwrap();

        let err = g
            .add_item_to_frame(&FrameId::new("b"), item)
            .unwrap_err();
        assert_eq!(err, GraphError::FrameAlreadySet(FrameId::new("a")));
    }

    #[test]
    fn remove_item_detaches_and_clears_back_reference() {
        let mut g = graph_with_two_frames();
        let item = Item::new(Sensor { reading: 1.0 });
        g.add_item_to_frame(&FrameId::new("a"), item.share()).unwrap();

        g.remove_item_from_frame(&item).unwrap();
        assert_eq!(item.frame(), None);
        assert_eq!(g.total_item_count(&FrameId::new("a")).unwrap(), 0);

        let err = g.remove_item_from_frame(&item).unwrap_err();
        assert_eq!(err, GraphError::UnknownItem(FrameId::new("")));
    }

    #[test]
    fn clear_frame_removes_every_item() {
        let mut g = graph_with_two_frames();
        g.add_item_to_frame(&FrameId::new("a"), Item::new(Sensor { reading: 1.0 }))
            .unwrap();
        g.add_item_to_frame(&FrameId::new("a"), Item::new(Sensor { reading: 2.0 }))
            .unwrap();

        let removed = g.clear_frame(&FrameId::new("a")).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(g.total_item_count(&FrameId::new("a")).unwrap(), 0);
    }

    #[test]
    fn filtered_copy_keeps_only_requested_types() {
        #[derive(Clone)]
        struct Other(i32);

        let mut g = graph_with_two_frames();
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), Transform::identity())
            .unwrap();
        g.add_item_to_frame(&FrameId::new("a"), Item::new(Sensor { reading: 1.0 }))
            .unwrap();
        g.add_item_to_frame(&FrameId::new("a"), Item::new(Other(7)))
            .unwrap();

        let mut keep = HashSet::new();
        keep.insert(type_tag_of::<Sensor>());
        let copy = g.filtered_copy(&keep, true);

        assert_eq!(copy.item_count_of_frame::<Sensor>(&FrameId::new("a")).unwrap(), 1);
        assert_eq!(copy.item_count_of_frame::<Other>(&FrameId::new("a")).unwrap(), 0);
        assert!(copy.contains_frame(&FrameId::new("b")));
        assert!(copy.get_edge(&FrameId::new("a"), &FrameId::new("b")).is_ok());

        // the original is untouched
        assert_eq!(g.total_item_count(&FrameId::new("a")).unwrap(), 2);
    }

    #[test]
    fn filtered_copy_preserves_item_uuid() {
        let mut g = graph_with_two_frames();
        let item = Item::new(Sensor { reading: 3.0 });
        let uuid = item.uuid();
        g.add_item_to_frame(&FrameId::new("a"), item).unwrap();

        let keep = HashSet::new();
        let copy = g.filtered_copy(&keep, false);
        let copied_items = copy.items_of_frame::<Sensor>(&FrameId::new("a")).unwrap();
        assert_eq!(copied_items[0].uuid(), uuid);
    }

    #[test]
    fn subscribe_with_replay_delivers_existing_state() {
        use crate::events::Subscriber;
        use std::cell::RefCell;

        struct Recorder(Rc<RefCell<Vec<Event>>>);
        impl Subscriber for Recorder {
            fn on_event(&mut self, event: &Event) {
                self.0.borrow_mut().push(event.clone());
            }
        }

        let mut g = graph_with_two_frames();
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), Transform::identity())
            .unwrap();
        g.add_item_to_frame(&FrameId::new("a"), Item::new(Sensor { reading: 1.0 }))
            .unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder: SubscriberHandle = Rc::new(RefCell::new(Recorder(Rc::clone(&seen))));
        g.subscribe(recorder, true);

        let events = seen.borrow();
        assert!(events.iter().any(|e| matches!(e, Event::FrameAdded { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::EdgeAdded { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::ItemAddedToFrame { .. })));
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn mutating_the_graph_from_on_event_panics() {
        use crate::events::Subscriber;
        use std::cell::RefCell;

        struct SelfMutating(Rc<RefCell<EnvireGraph>>);
        impl Subscriber for SelfMutating {
            fn on_event(&mut self, _event: &Event) {
                self.0
                    .borrow_mut()
                    .add_frame(FrameId::new("reentrant"))
                    .unwrap();
            }
        }

        let graph = Rc::new(RefCell::new(EnvireGraph::new()));
        let subscriber: SubscriberHandle = Rc::new(RefCell::new(SelfMutating(Rc::clone(&graph))));
        graph.borrow_mut().subscribe(subscriber, false);

        // Still holding the outer `borrow_mut()` when `on_event` fires its
        // own `borrow_mut()` on the same `RefCell` is what panics; this is
        // the documented, accepted failure mode for recursive mutation.
        graph.borrow_mut().add_frame(FrameId::new("a")).unwrap();
    }
}
