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

//! A directed graph of coordinate frames connected by rigid-body transforms.
//!
//! `Graph` owns the frame/edge structure and transform queries; `EnvireGraph`
//! layers typed per-frame item storage on top. Every mutation is observable
//! through an `EventPublisher`, reachable via `Graph::subscribe`.

pub mod edge;
pub mod envire_graph;
pub mod error;
pub mod events;
pub mod frame;
pub mod graph;
pub mod ids;
pub mod item;
pub mod transform;
pub mod utility;

pub use edge::Edge;
pub use envire_graph::EnvireGraph;
pub use error::{GraphError, GraphResult};
pub use events::{Dispatcher, Event, EventPublisher, EventQueue, ItemDispatcher, Subscriber, SubscriberHandle};
pub use frame::Frame;
pub use graph::{Graph, TreeView};
pub use ids::{FrameId, TypeTag, VertexHandle};
pub use item::Item;
pub use transform::Transform;
