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

//! Dispatcher module.
//!
//! Fans a single `Event` stream out into one ordered callback list per event
//! kind. Gated by an `enabled` flag so a consumer can pause delivery without
//! unsubscribing. Item events are fanned out with the type-erased item
//! handle attached; a caller after a specific payload type still has to
//! downcast it (via `ItemHandle::as_any`), same as the original's untyped
//! dispatcher — `ItemDispatcher<T>` exists precisely to avoid that.

use std::rc::Rc;

use crate::ids::FrameId;
use crate::item::ItemHandle;

use super::event::Event;
use super::subscriber::Subscriber;

type FrameCallback = Box<dyn FnMut(&FrameId)>;
type EdgeCallback = Box<dyn FnMut(&FrameId, &FrameId)>;
type ItemCallback = Box<dyn FnMut(&FrameId, &Rc<dyn ItemHandle>)>;

#[derive(Default)]
pub struct Dispatcher {
    enabled: bool,
    frame_added: Vec<FrameCallback>,
    frame_removed: Vec<FrameCallback>,
    edge_added: Vec<EdgeCallback>,
    edge_modified: Vec<EdgeCallback>,
    edge_removed: Vec<EdgeCallback>,
    item_added: Vec<ItemCallback>,
    item_removed: Vec<ItemCallback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn add_frame_added_callback(&mut self, cb: impl FnMut(&FrameId) + 'static) {
        self.frame_added.push(Box::new(cb));
    }

    pub fn add_frame_removed_callback(&mut self, cb: impl FnMut(&FrameId) + 'static) {
        self.frame_removed.push(Box::new(cb));
    }

    pub fn add_edge_added_callback(&mut self, cb: impl FnMut(&FrameId, &FrameId) + 'static) {
        self.edge_added.push(Box::new(cb));
    }

    pub fn add_edge_modified_callback(&mut self, cb: impl FnMut(&FrameId, &FrameId) + 'static) {
        self.edge_modified.push(Box::new(cb));
    }

    pub fn add_edge_removed_callback(&mut self, cb: impl FnMut(&FrameId, &FrameId) + 'static) {
        self.edge_removed.push(Box::new(cb));
    }

    pub fn add_item_added_callback(&mut self, cb: impl FnMut(&FrameId, &Rc<dyn ItemHandle>) + 'static) {
        self.item_added.push(Box::new(cb));
    }

    pub fn add_item_removed_callback(&mut self, cb: impl FnMut(&FrameId, &Rc<dyn ItemHandle>) + 'static) {
        self.item_removed.push(Box::new(cb));
    }
}

impl Subscriber for Dispatcher {
    fn on_event(&mut self, event: &Event) {
        if !self.enabled {
            return;
        }

        match event {
            Event::FrameAdded { frame } => {
                for cb in &mut self.frame_added {
                    cb(frame);
                }
            }
            Event::FrameRemoved { frame } => {
                for cb in &mut self.frame_removed {
                    cb(frame);
                }
            }
            Event::EdgeAdded { origin, target } => {
                for cb in &mut self.edge_added {
                    cb(origin, target);
                }
            }
            Event::EdgeModified { origin, target } => {
                for cb in &mut self.edge_modified {
                    cb(origin, target);
                }
            }
            Event::EdgeRemoved { origin, target } => {
                for cb in &mut self.edge_removed {
                    cb(origin, target);
                }
            }
            Event::ItemAddedToFrame { frame, item, .. } => {
                for cb in &mut self.item_added {
                    cb(frame, item);
                }
            }
            Event::ItemRemovedFromFrame { frame, item, .. } => {
                for cb in &mut self.item_removed {
                    cb(frame, item);
                }
            }
        }
    }
}
