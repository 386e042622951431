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

//! Event module.
//!
//! Each variant carries the minimum a subscriber needs to reconstruct the
//! change without re-querying the graph. `EdgeModified` carries both the
//! forward and inverse frame pairs; since this graph keys an edge pair by
//! the unordered `{origin, target}` set, that is just `(origin, target)`
//! itself and its swap, so the variant carries one ordered pair and readers
//! may derive the inverse from it. The item variants carry the type-erased
//! item handle itself alongside its metadata: by the time a subscriber sees
//! `ItemRemovedFromFrame`, the item's frame back-reference is already
//! cleared, so re-querying the graph for the payload is not an option.

use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::ids::{FrameId, TypeTag};
use crate::item::ItemHandle;

#[derive(Clone)]
pub enum Event {
    FrameAdded {
        frame: FrameId,
    },
    FrameRemoved {
        frame: FrameId,
    },
    EdgeAdded {
        origin: FrameId,
        target: FrameId,
    },
    EdgeModified {
        origin: FrameId,
        target: FrameId,
    },
    EdgeRemoved {
        origin: FrameId,
        target: FrameId,
    },
    ItemAddedToFrame {
        frame: FrameId,
        uuid: Uuid,
        type_tag: TypeTag,
        type_name: &'static str,
        item: Rc<dyn ItemHandle>,
    },
    ItemRemovedFromFrame {
        frame: FrameId,
        uuid: Uuid,
        type_tag: TypeTag,
        type_name: &'static str,
        item: Rc<dyn ItemHandle>,
    },
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::FrameAdded { frame } => f.debug_struct("FrameAdded").field("frame", frame).finish(),
            Event::FrameRemoved { frame } => {
                f.debug_struct("FrameRemoved").field("frame", frame).finish()
            }
            Event::EdgeAdded { origin, target } => f
                .debug_struct("EdgeAdded")
                .field("origin", origin)
                .field("target", target)
                .finish(),
            Event::EdgeModified { origin, target } => f
                .debug_struct("EdgeModified")
                .field("origin", origin)
                .field("target", target)
                .finish(),
            Event::EdgeRemoved { origin, target } => f
                .debug_struct("EdgeRemoved")
                .field("origin", origin)
                .field("target", target)
                .finish(),
            Event::ItemAddedToFrame {
                frame, uuid, type_name, ..
            } => f
                .debug_struct("ItemAddedToFrame")
                .field("frame", frame)
                .field("uuid", uuid)
                .field("type_name", type_name)
                .finish(),
            Event::ItemRemovedFromFrame {
                frame, uuid, type_name, ..
            } => f
                .debug_struct("ItemRemovedFromFrame")
                .field("frame", frame)
                .field("uuid", uuid)
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// Coalescing order: entities are expected to move strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventStage {
    Added,
    Modified,
    Removed,
}

/// Identity of the logical entity an event is about, used for coalescing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Frame(FrameId),
    Edge(FrameId, FrameId),
    Item(Uuid),
}

impl Event {
    pub fn stage(&self) -> EventStage {
        match self {
            Event::FrameAdded { .. } | Event::EdgeAdded { .. } | Event::ItemAddedToFrame { .. } => {
                EventStage::Added
            }
            Event::EdgeModified { .. } => EventStage::Modified,
            Event::FrameRemoved { .. }
            | Event::EdgeRemoved { .. }
            | Event::ItemRemovedFromFrame { .. } => EventStage::Removed,
        }
    }

    pub fn entity_key(&self) -> EntityKey {
        match self {
            Event::FrameAdded { frame } | Event::FrameRemoved { frame } => {
                EntityKey::Frame(frame.clone())
            }
            Event::EdgeAdded { origin, target }
            | Event::EdgeModified { origin, target }
            | Event::EdgeRemoved { origin, target } => {
                // unordered pair: normalize by string order so {a,b} == {b,a}
                if origin.as_str() <= target.as_str() {
                    EntityKey::Edge(origin.clone(), target.clone())
                } else {
                    EntityKey::Edge(target.clone(), origin.clone())
                }
            }
            Event::ItemAddedToFrame { uuid, .. } | Event::ItemRemovedFromFrame { uuid, .. } => {
                EntityKey::Item(*uuid)
            }
        }
    }
}
