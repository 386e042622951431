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

//! Edge module.
//!
//! Every logical edge is stored as a pair of directed `Edge`s whose
//! transforms are exact inverses of one another; `Graph` is responsible for
//! keeping the pair consistent.

use std::time::SystemTime;

use crate::transform::Transform;

#[derive(Debug, Clone)]
pub struct Edge {
    pub transform: Transform,
    pub timestamp: SystemTime,
}

impl Edge {
    pub fn new(transform: Transform) -> Self {
        Edge {
            transform,
            timestamp: SystemTime::now(),
        }
    }

    pub fn inverse(&self) -> Self {
        Edge {
            transform: self.transform.inverse(),
            timestamp: self.timestamp,
        }
    }
}

/// What an edge-property type must expose to participate in the generic
/// graph skeleton.
pub trait EdgeProps: Clone {
    fn transform(&self) -> &Transform;
    fn inverse_props(&self) -> Self;
    fn timestamp(&self) -> SystemTime;
    fn with_transform(&self, transform: Transform) -> Self;
}

impl EdgeProps for Edge {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn inverse_props(&self) -> Self {
        self.inverse()
    }

    fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    fn with_transform(&self, transform: Transform) -> Self {
        Edge {
            transform,
            timestamp: SystemTime::now(),
        }
    }
}

impl From<Transform> for Edge {
    fn from(transform: Transform) -> Self {
        Edge::new(transform)
    }
}
