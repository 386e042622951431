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

//! Typed item dispatcher module.
//!
//! A `Subscriber` that filters `ItemAddedToFrame` / `ItemRemovedFromFrame`
//! events down to a single payload type `T`, comparing the event's type tag
//! against `T`'s, and fans them out to per-kind callback lists with a typed
//! view of the item itself — not just its uuid — since for a removed item
//! the frame back-reference is already cleared by the time the callback
//! fires, so a callback that only got the uuid would have no way to recover
//! the payload.

use std::marker::PhantomData;

use crate::ids::{type_tag_of, FrameId};
use crate::item::{Item, ItemHandle};

use super::event::Event;
use super::subscriber::Subscriber;

type ItemCallback<T> = Box<dyn FnMut(&FrameId, Item<T>)>;

pub struct ItemDispatcher<T: Clone + 'static> {
    enabled: bool,
    added: Vec<ItemCallback<T>>,
    removed: Vec<ItemCallback<T>>,
    _marker: PhantomData<T>,
}

impl<T: Clone + 'static> ItemDispatcher<T> {
    pub fn new() -> Self {
        ItemDispatcher {
            enabled: true,
            added: Vec::new(),
            removed: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn add_item_added_callback(&mut self, cb: impl FnMut(&FrameId, Item<T>) + 'static) {
        self.added.push(Box::new(cb));
    }

    pub fn add_item_removed_callback(&mut self, cb: impl FnMut(&FrameId, Item<T>) + 'static) {
        self.removed.push(Box::new(cb));
    }
}

impl<T: Clone + 'static> Default for ItemDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Subscriber for ItemDispatcher<T> {
    fn on_event(&mut self, event: &Event) {
        if !self.enabled {
            return;
        }

        let tag = type_tag_of::<T>();

        match event {
            Event::ItemAddedToFrame {
                frame,
                type_tag,
                item,
                ..
            } if *type_tag == tag => {
                let typed = item
                    .as_any()
                    .downcast_ref::<Item<T>>()
                    .expect("type tag match implies this handle is an Item<T>")
                    .share();
                for cb in &mut self.added {
                    cb(frame, typed.share());
                }
            }
            Event::ItemRemovedFromFrame {
                frame,
                type_tag,
                item,
                ..
            } if *type_tag == tag => {
                let typed = item
                    .as_any()
                    .downcast_ref::<Item<T>>()
                    .expect("type tag match implies this handle is an Item<T>")
                    .share();
                for cb in &mut self.removed {
                    cb(frame, typed.share());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::ids::type_tag_name_of;

    #[test]
    fn only_matching_type_is_delivered() {
        let mut dispatcher: ItemDispatcher<i32> = ItemDispatcher::new();
        let seen = Rc::new(std::cell::RefCell::new(0));
        let seen2 = Rc::clone(&seen);
        dispatcher.add_item_added_callback(move |_, _| *seen2.borrow_mut() += 1);

        let wrong_type = Item::new(1_i64);
        dispatcher.on_event(&Event::ItemAddedToFrame {
            frame: FrameId::new("a"),
            uuid: wrong_type.uuid(),
            type_tag: type_tag_of::<i64>(),
            type_name: type_tag_name_of::<i64>(),
            item: Rc::new(wrong_type),
        });
        assert_eq!(*seen.borrow(), 0);

        let matching = Item::new(7_i32);
        dispatcher.on_event(&Event::ItemAddedToFrame {
            frame: FrameId::new("a"),
            uuid: matching.uuid(),
            type_tag: type_tag_of::<i32>(),
            type_name: type_tag_name_of::<i32>(),
            item: Rc::new(matching),
        });
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn callback_receives_the_typed_payload() {
        let mut dispatcher: ItemDispatcher<i32> = ItemDispatcher::new();
        let seen = Rc::new(std::cell::RefCell::new(None));
        let seen2 = Rc::clone(&seen);
        dispatcher.add_item_added_callback(move |_, item| *seen2.borrow_mut() = Some(item.get()));

        let item = Item::new(99_i32);
        dispatcher.on_event(&Event::ItemAddedToFrame {
            frame: FrameId::new("a"),
            uuid: item.uuid(),
            type_tag: type_tag_of::<i32>(),
            type_name: type_tag_name_of::<i32>(),
            item: Rc::new(item),
        });

        assert_eq!(*seen.borrow(), Some(99));
    }
}
