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

//! Frame module.
//!
//! A `Frame` is a named vertex datum: a frame name, a stable uuid, and an
//! item index keyed by runtime payload type. Insertion order is preserved
//! within each type's list.

use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::ids::{FrameId, TypeTag};
use crate::item::ItemHandle;

pub struct Frame {
    name: FrameId,
    uuid: Uuid,
    items: HashMap<TypeTag, Vec<Rc<dyn ItemHandle>>>,
}

impl Frame {
    pub fn new(name: FrameId) -> Self {
        Frame {
            name,
            uuid: Uuid::new_v4(),
            items: HashMap::new(),
        }
    }

    pub fn name(&self) -> &FrameId {
        &self.name
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub(crate) fn insert_item(&mut self, tag: TypeTag, handle: Rc<dyn ItemHandle>) {
        self.items.entry(tag).or_default().push(handle);
    }

    pub(crate) fn remove_item(&mut self, tag: TypeTag, uuid: Uuid) -> Option<Rc<dyn ItemHandle>> {
        let list = self.items.get_mut(&tag)?;
        let pos = list.iter().position(|h| h.uuid() == uuid)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            self.items.remove(&tag);
        }
        Some(removed)
    }

    pub(crate) fn items_of_tag(&self, tag: TypeTag) -> &[Rc<dyn ItemHandle>] {
        self.items.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn all_items(&self) -> impl Iterator<Item = &Rc<dyn ItemHandle>> {
        self.items.values().flatten()
    }

    pub(crate) fn contains_tag(&self, tag: TypeTag) -> bool {
        self.items.get(&tag).map(|v| !v.is_empty()).unwrap_or(false)
    }

    pub fn item_count_of_tag(&self, tag: TypeTag) -> usize {
        self.items.get(&tag).map(Vec::len).unwrap_or(0)
    }

    pub fn total_item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Drains every item, returning them for event emission by the caller.
    pub(crate) fn drain_all(&mut self) -> Vec<Rc<dyn ItemHandle>> {
        let mut all = Vec::new();
        for (_, mut list) in self.items.drain() {
            all.append(&mut list);
        }
        all
    }

    pub(crate) fn type_tags(&self) -> Vec<TypeTag> {
        self.items.keys().copied().collect()
    }

    /// Copies frame identity without any items; `EnvireGraph`'s filtered
    /// copy constructor populates the item index itself, tag by tag.
    pub(crate) fn structural_clone(&self) -> Frame {
        Frame {
            name: self.name.clone(),
            uuid: self.uuid,
            items: HashMap::new(),
        }
    }
}

impl Clone for Frame {
    /// Structural clone used by `EnvireGraph`'s filtered copy: item payloads
    /// are deep-cloned, keeping their original uuid per the documented
    /// "filtered copy preserves item identity" policy.
    fn clone(&self) -> Self {
        let mut items = HashMap::new();
        for (tag, list) in &self.items {
            let cloned: Vec<Rc<dyn ItemHandle>> =
                list.iter().map(|h| h.clone_payload_into()).collect();
            items.insert(*tag, cloned);
        }
        Frame {
            name: self.name.clone(),
            uuid: self.uuid,
            items,
        }
    }
}

/// What a frame-property type must expose to participate in the generic
/// graph skeleton.
pub trait FrameProps {
    fn frame_id(&self) -> &FrameId;
}

impl FrameProps for Frame {
    fn frame_id(&self) -> &FrameId {
        &self.name
    }
}

impl From<FrameId> for Frame {
    fn from(id: FrameId) -> Self {
        Frame::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::type_tag_of;
    use crate::item::Item;

    #[test]
    fn insert_and_count() {
        let mut f = Frame::new(FrameId::new("a"));
        let item = Item::new(3_i32);
        f.insert_item(type_tag_of::<i32>(), Rc::new(item.clone()));
        assert_eq!(f.total_item_count(), 1);
        assert_eq!(f.item_count_of_tag(type_tag_of::<i32>()), 1);
        assert_eq!(f.item_count_of_tag(type_tag_of::<i64>()), 0);
    }

    #[test]
    fn remove_drops_from_index() {
        let mut f = Frame::new(FrameId::new("a"));
        let item = Item::new(3_i32);
        let uuid = item.uuid();
        f.insert_item(type_tag_of::<i32>(), Rc::new(item));
        assert!(f.remove_item(type_tag_of::<i32>(), uuid).is_some());
        assert_eq!(f.total_item_count(), 0);
    }
}
