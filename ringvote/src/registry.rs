use crate::*;
use num_bigint::BigUint;

/// A voter's public-key record for one topic.
///
/// Doubles as the `initPublicKey` operation payload; the raw payload bytes
/// are what gets stored, so a later `getPublicKey` returns the registration
/// exactly as it was submitted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PublicKeyRecord {
    pub topic: String,
    pub uid: String,

    #[serde(with = "biguint_decimal")]
    pub x: BigUint,

    #[serde(with = "biguint_decimal")]
    pub y: BigUint,
}

impl PublicKeyRecord {
    /// The affine point handed to the ring-signature verifier.
    pub fn point(&self) -> CurvePoint {
        CurvePoint {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

/// One key-ring entry. The ring for a topic is an ordered, append-only
/// list of these, one per registered voter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RingEntry {
    pub uid: String,
}

/// `getPublicKey` operation payload.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetPublicKeyRequest {
    pub topic: String,
    pub uid: String,
}

/// `getKeyRing` operation payload.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetKeyRingRequest {
    pub topic: String,
}

/// Register a voter's public key and extend the topic's key ring.
///
/// Only admitted while the topic is in `prepare`. The record write and the
/// ring append commit as one unit: every read and validation happens before
/// the first write, and the host ledger commits the invocation's writes
/// atomically, so a failure never leaves the ring inconsistent with the
/// stored keys.
///
/// Re-registering an existing uid overwrites the record without appending
/// a duplicate ring entry.
pub fn register_public_key<S: StateStore>(
    store: &mut S,
    record: &PublicKeyRecord,
    raw: &[u8],
) -> Result<(), Error> {
    check_stage(store, &record.topic, Stage::Prepare)?;

    let mut ring = read_key_ring(store, &record.topic)?.unwrap_or_default();
    let already_listed = ring.iter().any(|entry| entry.uid == record.uid);

    store.put(&public_key_key(&record.topic, &record.uid), raw.to_vec())?;

    if !already_listed {
        ring.push(RingEntry {
            uid: record.uid.clone(),
        });
        let packed =
            serde_json::to_vec(&ring).expect("ringvote: unexpected error packing key ring");
        store.put(&key_ring_key(&record.topic), packed)?;
    }

    tracing::info!(topic = %record.topic, uid = %record.uid, "public key registered");
    Ok(())
}

/// Read the raw registration payload for one voter.
pub fn get_public_key<S: StateStore>(store: &S, topic: &str, uid: &str) -> Result<Vec<u8>, Error> {
    store
        .get(&public_key_key(topic, uid))?
        .ok_or_else(|| Error::KeyNotFound {
            topic: topic.to_string(),
            uid: uid.to_string(),
        })
}

/// Read the topic's key ring in registration order.
///
/// Fails if no key was ever registered for the topic.
pub fn get_key_ring<S: StateStore>(store: &S, topic: &str) -> Result<Vec<RingEntry>, Error> {
    read_key_ring(store, topic)?.ok_or_else(|| Error::KeyRingNotFound(topic.to_string()))
}

pub(crate) fn read_key_ring<S: StateStore>(
    store: &S,
    topic: &str,
) -> Result<Option<Vec<RingEntry>>, Error> {
    match store.get(&key_ring_key(topic))? {
        Some(packed) => {
            let ring = serde_json::from_slice(&packed)
                .map_err(|_| Error::StorageFailure(format!("corrupt key ring for {}", topic)))?;
            Ok(Some(ring))
        }
        None => Ok(None),
    }
}
