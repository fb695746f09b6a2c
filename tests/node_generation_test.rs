// Grid construction properties across every pavement type
use pavement_nodes::{
    boundary_levels, build_layers, generate, generate_nodes, Layer, NodeRequest, PavementError,
    PavementType, XProfile, HALF_LANE_X, SUBGRADE_ALLOWANCE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_and_contiguous_ids() {
        for pavement in PavementType::ALL {
            let request = NodeRequest::with_defaults(pavement);
            let grid = generate_nodes(request).expect("defaults are valid");

            let n = pavement.layer_count();
            let m = HALF_LANE_X.len();
            assert_eq!(grid.len(), m * (n + 2), "{pavement}");
            assert_eq!(grid.levels().len(), n + 2);

            for (idx, node) in grid.nodes().iter().enumerate() {
                assert_eq!(node.id as usize, idx + 1);
                assert_eq!(node.z, 0.0);
            }
            println!("✓ {}: {} nodes", pavement, grid.len());
        }
    }

    #[test]
    fn test_levels_follow_thicknesses() {
        let thicknesses = [0.04, 0.07, 0.18, 0.25];
        let layers = build_layers(PavementType::Flexible, &thicknesses).unwrap();
        let levels = boundary_levels(&layers);

        assert_eq!(levels[0], 0.0);
        for (k, t) in thicknesses.iter().enumerate() {
            assert_eq!(levels[k + 1], levels[k] - t);
        }
        assert_eq!(levels[5], levels[4] - SUBGRADE_ALLOWANCE);
    }

    #[test]
    fn test_three_layer_scenario() {
        let layers: Vec<Layer> = ["Surface", "Base", "Subbase"]
            .iter()
            .zip([0.05, 0.15, 0.20])
            .enumerate()
            .map(|(i, (name, t))| Layer::new(*name, t, i).unwrap())
            .collect();
        let profile = XProfile::new(vec![0.0, 1.0, 2.0]).unwrap();
        let grid = generate(&layers, &profile);

        assert_eq!(grid.levels(), &[0.0, -0.05, -0.2, -0.4, -1.9]);
        assert_eq!(grid.len(), 15);
        assert_eq!(grid.nodes()[14].id, 15);
    }

    #[test]
    fn test_rows_run_left_to_right_top_to_bottom() {
        let grid = generate_nodes(NodeRequest::with_defaults(PavementType::SemiRigid)).unwrap();
        let mut previous_y = f64::INFINITY;
        for row in grid.rows() {
            let xs: Vec<f64> = row.iter().map(|n| n.x).collect();
            assert_eq!(xs, HALF_LANE_X.to_vec());
            assert!(row[0].y < previous_y);
            previous_y = row[0].y;
        }
    }

    #[test]
    fn test_negative_thickness_rejected() {
        let request = NodeRequest::new(PavementType::SemiRigid, vec![0.08, -0.2, 0.2]);
        match generate_nodes(request) {
            Err(PavementError::InvalidThickness { layer, value }) => {
                assert_eq!(layer, "Cement-Treated Base");
                assert_eq!(value, -0.2);
            }
            other => panic!("expected InvalidThickness, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let err = build_layers(PavementType::Rigid, &[0.0, 0.2]).unwrap_err();
        assert_eq!(err.layer(), Some("Concrete Slab"));
    }

    #[test]
    fn test_wrong_layer_count_rejected() {
        let request = NodeRequest::new(PavementType::Flexible, vec![0.05, 0.1]);
        assert!(matches!(
            generate_nodes(request),
            Err(PavementError::LayerCountMismatch { expected: 4, found: 2, .. })
        ));
    }
}
