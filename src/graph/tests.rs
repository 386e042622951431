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

#[cfg(test)]
mod tests {
    use crate::edge::Edge;
    use crate::error::GraphError;
    use crate::frame::Frame;
    use crate::graph::Graph;
    use crate::ids::FrameId;
    use crate::transform::Transform;
    use nalgebra::Vector3;

    fn graph() -> Graph<Frame, Edge> {
        Graph::new()
    }

    #[test]
    fn empty_graph_has_no_vertices() {
        let g = graph();
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn add_frame_rejects_duplicate() {
        let mut g = graph();
        g.add_frame(FrameId::new("a")).unwrap();
        let err = g.add_frame(FrameId::new("a")).unwrap_err();
        assert_eq!(err, GraphError::FrameAlreadyExists(FrameId::new("a")));
    }

    #[test]
    fn add_frame_rejects_empty_id() {
        let mut g = graph();
        let err = g.add_frame(FrameId::new("")).unwrap_err();
        assert!(matches!(err, GraphError::InvalidFrameId(_)));
    }

    #[test]
    fn build_and_query_path() {
        // a -> b -> c, query the composed transform.
        let mut g = graph();
        g.add_frame(FrameId::new("a")).unwrap();
        g.add_frame(FrameId::new("b")).unwrap();
        g.add_frame(FrameId::new("c")).unwrap();

        let ab = Transform::new(Vector3::new(1.0, 0.0, 0.0), Default::default());
        let bc = Transform::new(Vector3::new(0.0, 1.0, 0.0), Default::default());
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), ab)
            .unwrap();
        g.add_transform(&FrameId::new("b"), &FrameId::new("c"), bc)
            .unwrap();

        let ac = g
            .get_transitive_transform(&FrameId::new("a"), &FrameId::new("c"))
            .unwrap();
        assert!((ac.translation - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-9);

        let ca = g
            .get_transitive_transform(&FrameId::new("c"), &FrameId::new("a"))
            .unwrap();
        assert!((ca.translation - Vector3::new(-1.0, -1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn reject_duplicate_edge() {
        // Scenario 2.
        let mut g = graph();
        let t = Transform::new(Vector3::new(1.0, 0.0, 0.0), Default::default());
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), t.clone())
            .unwrap();

        let t2 = Transform::new(Vector3::new(2.0, 0.0, 0.0), Default::default());
        let err = g
            .add_transform(&FrameId::new("a"), &FrameId::new("b"), t2)
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::EdgeAlreadyExists(FrameId::new("a"), FrameId::new("b"))
        );

        let stored = g.get_transform(&FrameId::new("a"), &FrameId::new("b")).unwrap();
        assert!((stored.translation - t.translation).norm() < 1e-12);
    }

    #[test]
    fn remove_isolated_vs_connected_frame() {
        // Scenario 3.
        let mut g = graph();
        g.add_transform(
            &FrameId::new("a"),
            &FrameId::new("b"),
            Transform::identity(),
        )
        .unwrap();

        let err = g.remove_frame(&FrameId::new("a")).unwrap_err();
        assert_eq!(err, GraphError::FrameStillConnected(FrameId::new("a")));

        g.remove_transform(&FrameId::new("a"), &FrameId::new("b"))
            .unwrap();
        assert!(g.remove_frame(&FrameId::new("a")).is_ok());
    }

    #[test]
    fn edge_pair_invariant_holds() {
        let mut g = graph();
        let t = Transform::new(Vector3::new(1.0, 2.0, 3.0), Default::default());
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), t.clone())
            .unwrap();

        let forward = g.get_transform(&FrameId::new("a"), &FrameId::new("b")).unwrap();
        let backward = g.get_transform(&FrameId::new("b"), &FrameId::new("a")).unwrap();
        assert!(backward.approx_eq(&forward.inverse(), 1e-9));
    }

    #[test]
    fn update_transform_updates_both_directions() {
        let mut g = graph();
        g.add_transform(
            &FrameId::new("a"),
            &FrameId::new("b"),
            Transform::new(Vector3::new(1.0, 0.0, 0.0), Default::default()),
        )
        .unwrap();

        let updated = Transform::new(Vector3::new(5.0, 0.0, 0.0), Default::default());
        g.update_transform(&FrameId::new("a"), &FrameId::new("b"), updated.clone())
            .unwrap();

        let forward = g.get_transform(&FrameId::new("a"), &FrameId::new("b")).unwrap();
        assert!((forward.translation - updated.translation).norm() < 1e-12);

        let backward = g.get_transform(&FrameId::new("b"), &FrameId::new("a")).unwrap();
        assert!(backward.approx_eq(&updated.inverse(), 1e-9));
    }

    #[test]
    fn unreachable_transform_is_an_error() {
        let mut g = graph();
        g.add_frame(FrameId::new("a")).unwrap();
        g.add_frame(FrameId::new("isolated")).unwrap();

        let err = g
            .get_transitive_transform(&FrameId::new("a"), &FrameId::new("isolated"))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownTransform(FrameId::new("a"), FrameId::new("isolated"))
        );
    }

    #[test]
    fn identity_transform_to_self() {
        let mut g = graph();
        g.add_frame(FrameId::new("a")).unwrap();
        let t = g
            .get_transitive_transform(&FrameId::new("a"), &FrameId::new("a"))
            .unwrap();
        assert!(t.approx_eq(&Transform::identity(), 1e-12));
    }

    #[test]
    fn tree_view_orders_children_deterministically() {
        let mut g = graph();
        g.add_transform(&FrameId::new("root"), &FrameId::new("z"), Transform::identity())
            .unwrap();
        g.add_transform(&FrameId::new("root"), &FrameId::new("a"), Transform::identity())
            .unwrap();

        let tree = g.get_tree(&FrameId::new("root")).unwrap();
        let children = tree.children_of(&FrameId::new("root"));
        assert_eq!(children, &[FrameId::new("a"), FrameId::new("z")]);
    }

    #[test]
    fn tree_view_reports_depth_per_vertex() {
        let mut g = graph();
        g.add_transform(&FrameId::new("root"), &FrameId::new("a"), Transform::identity())
            .unwrap();
        g.add_transform(&FrameId::new("a"), &FrameId::new("b"), Transform::identity())
            .unwrap();

        let tree = g.get_tree(&FrameId::new("root")).unwrap();
        assert_eq!(tree.depth_of(&FrameId::new("root")), Some(0));
        assert_eq!(tree.depth_of(&FrameId::new("a")), Some(1));
        assert_eq!(tree.depth_of(&FrameId::new("b")), Some(2));
        assert_eq!(tree.depth_of(&FrameId::new("ghost")), None);
    }
}
