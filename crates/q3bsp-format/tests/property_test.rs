#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Property tests over randomly sized synthetic maps

mod common;

use common::{SyntheticMap, vis};
use proptest::prelude::*;
use q3bsp_format::{BspMap, ErrorKind, LumpKind};

fn fixed_kind() -> impl Strategy<Value = LumpKind> {
    prop::sample::select(
        LumpKind::ALL
            .into_iter()
            .filter(|k| k.is_fixed_record() && *k != LumpKind::Lightmaps)
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn count_is_length_over_record_size(kind in fixed_kind(), records in 0usize..16) {
        let size = kind.record_size().unwrap();
        let data = SyntheticMap::new()
            .with_lump(kind, vec![0u8; size * records])
            .to_bytes();
        let map = BspMap::from_bytes(data).unwrap();

        prop_assert_eq!(map.count(kind), records);
        prop_assert_eq!(map.count(kind), map.descriptor(kind).length as usize / size);
        prop_assert!(map.record_at(kind, records).is_err());
        if records > 0 {
            prop_assert!(map.record_at(kind, records - 1).is_ok());
        }
    }

    #[test]
    fn partial_record_is_rejected(kind in fixed_kind(), records in 0usize..4, extra in 1usize..8) {
        let size = kind.record_size().unwrap();
        let data = SyntheticMap::new()
            .with_lump(kind, vec![0u8; size * records + extra])
            .to_bytes();
        let err = BspMap::from_bytes(data).unwrap_err();

        prop_assert_eq!(err.kind(), ErrorKind::MisalignedLumpSize);
        prop_assert_eq!(err.lump(), Some(kind));
    }

    #[test]
    fn entity_text_is_lump_plus_terminator(text in "[ -~\n]{0,256}") {
        let data = SyntheticMap::new()
            .with_lump(LumpKind::Entities, text.as_bytes().to_vec())
            .to_bytes();
        let map = BspMap::from_bytes(data).unwrap();
        let entities = map.entities_text();

        prop_assert_eq!(entities.as_bytes_with_nul().len(), text.len() + 1);
        prop_assert_eq!(entities.as_bytes(), text.as_bytes());
        prop_assert_eq!(entities.as_bytes_with_nul().last(), Some(&0u8));
    }

    #[test]
    fn vis_payload_must_fit(count in 0u32..8, size in 0u32..8, present in 0usize..64) {
        let payload = vec![0xA5u8; present];
        let data = SyntheticMap::new()
            .with_lump(LumpKind::VisData, vis(count, size, &payload))
            .to_bytes();
        let needed = (count * size) as usize;

        match BspMap::from_bytes(data) {
            Ok(map) => {
                prop_assert!(needed <= present);
                let vis = map.vis_data();
                prop_assert_eq!(vis.byte_len(), 8 + needed);
                prop_assert_eq!(map.count(LumpKind::VisData), count as usize);
            }
            Err(err) => {
                prop_assert!(needed > present);
                prop_assert_eq!(err.kind(), ErrorKind::LumpOutOfBounds);
            }
        }
    }
}
