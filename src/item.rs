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

//! Item module.
//!
//! An `Item<T>` is a reference-shared, typed payload that may live inside at
//! most one frame at a time. Multiple `Item<T>` handles may observe the same
//! underlying payload; the payload is dropped when the last handle is.
//!
//! Frames store items type-erased, keyed by the payload's `TypeTag`, so that
//! a frame can hold an arbitrary mix of payload types without a closed enum.
//! `std::any::Any` recovers the static type at the call site.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;

use uuid::Uuid;

use crate::ids::{type_tag_name_of, type_tag_of, FrameId, TypeTag};

struct ItemInner<T> {
    uuid: Uuid,
    payload: T,
    timestamp: SystemTime,
    frame: Option<FrameId>,
}

/// A type-erased handle to an item, as stored inside a `Frame`'s item index.
///
/// Implemented only by `Item<T>`; recovered through `as_any` + downcast.
pub trait ItemHandle: Any {
    fn uuid(&self) -> Uuid;
    fn type_tag(&self) -> TypeTag;
    fn type_tag_name(&self) -> &'static str;
    fn frame(&self) -> Option<FrameId>;
    fn set_frame(&self, frame: Option<FrameId>);
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Rc<dyn ItemHandle>;
    fn clone_payload_into(&self) -> Rc<dyn ItemHandle>;
}

/// A shared handle to a typed payload attached (or attachable) to a frame.
pub struct Item<T: Clone + 'static> {
    inner: Rc<RefCell<ItemInner<T>>>,
}

impl<T: Clone + 'static> Item<T> {
    pub fn new(payload: T) -> Self {
        Item {
            inner: Rc::new(RefCell::new(ItemInner {
                uuid: Uuid::new_v4(),
                payload,
                timestamp: SystemTime::now(),
                frame: None,
            })),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.inner.borrow().uuid
    }

    pub fn timestamp(&self) -> SystemTime {
        self.inner.borrow().timestamp
    }

    pub fn touch(&self) {
        self.inner.borrow_mut().timestamp = SystemTime::now();
    }

    pub fn frame(&self) -> Option<FrameId> {
        self.inner.borrow().frame.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().payload)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut().payload)
    }

    pub fn get(&self) -> T {
        self.inner.borrow().payload.clone()
    }

    pub fn set(&self, payload: T) {
        self.inner.borrow_mut().payload = payload;
        self.touch();
    }

    /// A new handle sharing the same underlying payload slot.
    pub fn share(&self) -> Self {
        Item {
            inner: Rc::clone(&self.inner),
        }
    }

    /// A fully independent item: new uuid, new slot, cloned payload, detached
    /// from any frame. Used by `EnvireGraph`'s filtered-copy constructor.
    pub fn deep_clone(&self) -> Self {
        let inner = self.inner.borrow();
        Item {
            inner: Rc::new(RefCell::new(ItemInner {
                uuid: inner.uuid,
                payload: inner.payload.clone(),
                timestamp: inner.timestamp,
                frame: inner.frame.clone(),
            })),
        }
    }
}

impl<T: Clone + 'static> Clone for Item<T> {
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<T: Clone + 'static> ItemHandle for Item<T> {
    fn uuid(&self) -> Uuid {
        self.inner.borrow().uuid
    }

    fn type_tag(&self) -> TypeTag {
        type_tag_of::<T>()
    }

    fn type_tag_name(&self) -> &'static str {
        type_tag_name_of::<T>()
    }

    fn frame(&self) -> Option<FrameId> {
        self.inner.borrow().frame.clone()
    }

    fn set_frame(&self, frame: Option<FrameId>) {
        self.inner.borrow_mut().frame = frame;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Rc<dyn ItemHandle> {
        Rc::new(self.share())
    }

    fn clone_payload_into(&self) -> Rc<dyn ItemHandle> {
        Rc::new(self.deep_clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handles_observe_same_payload() {
        let a = Item::new(7_i32);
        let b = a.share();
        a.set(9);
        assert_eq!(b.get(), 9);
    }

    #[test]
    fn deep_clone_is_independent() {
        let a = Item::new(String::from("x"));
        let b = a.deep_clone();
        a.set(String::from("y"));
        assert_eq!(b.get(), "x");
        assert_eq!(a.uuid(), b.uuid());
    }

    #[test]
    fn type_tag_distinguishes_payload_types() {
        let a = Item::new(1_i32);
        let b = Item::new(1_i64);
        assert_ne!(
            ItemHandle::type_tag(&a),
            ItemHandle::type_tag(&b)
        );
    }
}
