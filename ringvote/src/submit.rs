use crate::*;

/// `submit` operation payload. The signature is kept as a raw JSON value
/// and decoded in a second step so that a malformed signature structure is
/// reported as such rather than as a generally malformed request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubmitRequest {
    pub topic: String,
    pub msg: String,
    pub sig: serde_json::Value,

    #[serde(rename = "keyIndex")]
    pub key_index: Vec<RingEntry>,
}

impl SubmitRequest {
    /// Decode the ring-signature structure, failing closed on a missing
    /// field or an unparsable numeral.
    pub fn signature(&self) -> Result<RingSignature, Error> {
        serde_json::from_value(self.sig.clone())
            .map_err(|err| Error::MalformedSignature(err.to_string()))
    }
}

/// What became of a submission that cleared verification.
///
/// `AlreadySubmitted` never reaches the transaction's caller: surfacing a
/// repeated link tag would reveal that some ring member tried to submit
/// twice, which combined with other side channels can deanonymize the
/// signer. The dispatcher maps both outcomes to the same success payload;
/// operators observe rejections on the audit channel only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    AlreadySubmitted,
}

/// Verify a ballot and record it anonymously.
///
/// Admitted only while the topic is in `start`. `key_index` is the
/// caller-declared ring, which need not equal the full key ring; every
/// entry must resolve to a registered key under the topic. Nothing is
/// written unless the signature verifies and its link tag is new.
pub fn submit<S: StateStore, V: RingVerifier>(
    store: &mut S,
    verifier: &V,
    request: &SubmitRequest,
    raw: &[u8],
) -> Result<SubmitOutcome, Error> {
    check_stage(store, &request.topic, Stage::Start)?;

    // Resolve the declared ring into concrete public keys
    let mut ring = Vec::with_capacity(request.key_index.len());
    for entry in &request.key_index {
        let packed = store
            .get(&public_key_key(&request.topic, &entry.uid))?
            .ok_or_else(|| Error::UnknownVoter {
                topic: request.topic.clone(),
                uid: entry.uid.clone(),
            })?;
        let record: PublicKeyRecord = serde_json::from_slice(&packed).map_err(|_| {
            Error::StorageFailure(format!("corrupt public key record for {}", entry.uid))
        })?;
        ring.push(record.point());
    }

    let signature = request.signature()?;
    signature.validate_shape()?;

    if !verifier.verify(&ring, request.msg.as_bytes(), &signature) {
        return Err(Error::SignatureInvalid);
    }

    if !record_if_new(store, &request.topic, signature.link_tag())? {
        // Audit channel only; the caller sees an ordinary success.
        tracing::warn!(
            topic = %request.topic,
            "submission rejected: the signer already submitted for this topic"
        );
        return Ok(SubmitOutcome::AlreadySubmitted);
    }

    store.put(&submission_key(&request.topic), raw.to_vec())?;
    tracing::info!(topic = %request.topic, "submission accepted");
    Ok(SubmitOutcome::Accepted)
}

/// The last accepted submission payload for a topic, if any.
pub fn get_submission<S: StateStore>(store: &S, topic: &str) -> Result<Option<Vec<u8>>, Error> {
    store.get(&submission_key(topic))
}
