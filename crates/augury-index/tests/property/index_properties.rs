use augury_index::normalize::{l2_norm, l2_normalize};
use augury_index::{IdMap, VectorMatrix};
use proptest::prelude::*;

fn vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, dim)
}

proptest! {
    #[test]
    fn normalized_vectors_are_unit_or_zero(v in (1usize..64).prop_flat_map(vector)) {
        let n = l2_normalize(&v, 1e-12);
        let norm = l2_norm(&n);
        prop_assert!(norm < 1e-6 || (norm - 1.0).abs() < 1e-5, "norm {}", norm);
    }

    #[test]
    fn matrix_bytes_parse_back(rows in 0usize..16, dim in 1usize..12, seed in any::<u32>()) {
        let data: Vec<f32> = (0..rows * dim)
            .map(|i| ((i as u32).wrapping_mul(2654435761) ^ seed) as f32 / u32::MAX as f32)
            .collect();
        let matrix = VectorMatrix::from_flat(data, dim).unwrap();
        let parsed = VectorMatrix::from_bytes(&matrix.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(parsed, matrix);
    }

    #[test]
    fn any_truncation_is_rejected(rows in 1usize..8, dim in 1usize..8, cut in 1usize..4) {
        let matrix = VectorMatrix::from_flat(vec![0.5; rows * dim], dim).unwrap();
        let bytes = matrix.to_bytes().unwrap();
        prop_assert!(VectorMatrix::from_bytes(&bytes[..bytes.len() - cut]).is_err());
    }

    #[test]
    fn id_map_json_preserves_row_order(n in 0usize..200) {
        let ids: Vec<String> = (0..n).map(|i| format!("c{}", n - i)).collect();
        let map = IdMap::new(ids.clone()).unwrap();
        let parsed = IdMap::from_json_bytes(&map.to_json_bytes().unwrap()).unwrap();
        prop_assert_eq!(parsed.as_slice(), ids.as_slice());
    }
}
