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

//! Event queue module.
//!
//! Buffers events for later, batched delivery via `flush`, coalescing
//! redundant entries per entity under the assumed `Added -> Modified* ->
//! Removed` lifecycle:
//!
//! - a newer `Modified` replaces a queued `Modified` for the same entity;
//! - a newer `Removed` discards every queued event for the entity; if a
//!   queued `Added` existed for it, the pair annihilates and neither is
//!   delivered.

use std::collections::VecDeque;

use super::event::{Event, EventStage};
use super::subscriber::Subscriber;

#[derive(Default)]
pub struct EventQueue {
    buffered: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue::default()
    }

    pub fn len(&self) -> usize {
        self.buffered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    fn push(&mut self, event: Event) {
        let key = event.entity_key();

        match event.stage() {
            EventStage::Removed => {
                let had_added = self
                    .buffered
                    .iter()
                    .any(|e| e.entity_key() == key && e.stage() == EventStage::Added);
                self.buffered.retain(|e| e.entity_key() != key);
                if !had_added {
                    self.buffered.push_back(event);
                }
            }
            EventStage::Modified => {
                self.buffered
                    .retain(|e| !(e.entity_key() == key && e.stage() == EventStage::Modified));
                self.buffered.push_back(event);
            }
            EventStage::Added => {
                self.buffered.push_back(event);
            }
        }
    }

    /// Replays every buffered event, in arrival order, to `process`, then
    /// empties the queue.
    pub fn flush(&mut self, mut process: impl FnMut(&Event)) {
        for event in self.buffered.drain(..) {
            process(&event);
        }
    }
}

impl Subscriber for EventQueue {
    fn on_event(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::ids::{type_tag_of, FrameId};
    use crate::item::Item;

    #[test]
    fn add_then_remove_annihilates() {
        let mut queue = EventQueue::new();
        let item = Item::new(3_i32);
        let uuid = item.uuid();
        let frame = FrameId::new("f");

        queue.on_event(&Event::ItemAddedToFrame {
            frame: frame.clone(),
            uuid,
            type_tag: type_tag_of::<i32>(),
            type_name: "i32",
            item: Rc::new(item.share()),
        });
        queue.on_event(&Event::ItemRemovedFromFrame {
            frame,
            uuid,
            type_tag: type_tag_of::<i32>(),
            type_name: "i32",
            item: Rc::new(item),
        });

        assert!(queue.is_empty());

        let mut calls = 0;
        queue.flush(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn repeated_modify_coalesces_to_latest() {
        let mut queue = EventQueue::new();
        let a = FrameId::new("a");
        let b = FrameId::new("b");

        queue.on_event(&Event::EdgeModified {
            origin: a.clone(),
            target: b.clone(),
        });
        queue.on_event(&Event::EdgeModified {
            origin: a.clone(),
            target: b.clone(),
        });

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn remove_without_add_is_delivered() {
        let mut queue = EventQueue::new();
        let frame = FrameId::new("f");
        queue.on_event(&Event::FrameRemoved {
            frame: frame.clone(),
        });
        assert_eq!(queue.len(), 1);

        let mut delivered = Vec::new();
        queue.flush(|e| delivered.push(e.clone()));
        assert_eq!(delivered.len(), 1);
    }
}
