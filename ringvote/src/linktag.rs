use crate::*;
use num_bigint::BigUint;

/// A link-tag pair extracted from an accepted signature. Two signatures
/// from the same signing secret carry the same pair, whoever the signer
/// hides behind in the ring.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkTag {
    #[serde(with = "biguint_decimal")]
    pub hsx: BigUint,

    #[serde(with = "biguint_decimal")]
    pub hsy: BigUint,
}

/// Record `tag` in the topic's seen-set unless an identical pair is
/// already present. Returns `false`, without mutating, when the tag was
/// seen before.
///
/// The read-check-append runs inside a single submit invocation, which the
/// host ledger serializes per key; hosts with optimistic concurrency must
/// surface read/write conflicts on the tag-set key rather than merge.
pub fn record_if_new<S: StateStore>(store: &mut S, topic: &str, tag: LinkTag) -> Result<bool, Error> {
    let mut seen: Vec<LinkTag> = match store.get(&link_tag_key(topic))? {
        Some(packed) => serde_json::from_slice(&packed)
            .map_err(|_| Error::StorageFailure(format!("corrupt link-tag set for {}", topic)))?,
        None => Vec::new(),
    };

    if seen.contains(&tag) {
        return Ok(false);
    }

    seen.push(tag);
    let packed = serde_json::to_vec(&seen).expect("ringvote: unexpected error packing link tags");
    store.put(&link_tag_key(topic), packed)?;
    Ok(true)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn tag(hsx: u32, hsy: u32) -> LinkTag {
        LinkTag {
            hsx: BigUint::from(hsx),
            hsy: BigUint::from(hsy),
        }
    }

    #[test]
    fn first_sighting_is_new() {
        let mut store = MemStore::new();
        assert!(record_if_new(&mut store, "T1", tag(1, 2)).unwrap());
        assert!(record_if_new(&mut store, "T1", tag(3, 4)).unwrap());
    }

    #[test]
    fn repeated_pair_is_rejected_without_mutation() {
        let mut store = MemStore::new();
        assert!(record_if_new(&mut store, "T1", tag(1, 2)).unwrap());

        let before = store.get("T1_HARRAY").unwrap();
        assert!(!record_if_new(&mut store, "T1", tag(1, 2)).unwrap());
        assert_eq!(store.get("T1_HARRAY").unwrap(), before);

        // Differing in one coordinate is a different signer
        assert!(record_if_new(&mut store, "T1", tag(1, 3)).unwrap());
    }

    #[test]
    fn tag_sets_are_topic_scoped() {
        let mut store = MemStore::new();
        assert!(record_if_new(&mut store, "T1", tag(1, 2)).unwrap());
        assert!(record_if_new(&mut store, "T2", tag(1, 2)).unwrap());
    }
}
