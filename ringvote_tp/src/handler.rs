use crate::ApplyError;
use ringvote::*;

/// Routes named operations from the host ledger to the voting core.
///
/// The host's transport, ordering and consensus sit outside this crate;
/// it hands each transaction to `apply` with the operation name, the
/// single JSON argument object, and a state context scoped to the
/// invocation.
pub struct VotingTransactionHandler<V: RingVerifier> {
    family_name: String,
    family_versions: Vec<String>,
    verifier: V,
}

impl<V: RingVerifier> VotingTransactionHandler<V> {
    pub fn new(verifier: V) -> Self {
        VotingTransactionHandler {
            family_name: String::from("ringvote"),
            family_versions: vec![String::from("1.0")],
            verifier,
        }
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_versions(&self) -> &[String] {
        &self.family_versions
    }

    /// Apply one named operation against the invocation's state context.
    ///
    /// Returns the operation's success payload, possibly empty. A `submit`
    /// whose link tag was seen before returns the same empty payload as an
    /// accepted one; the distinction lives on the audit channel only.
    pub fn apply<S: StateStore>(
        &self,
        operation: &str,
        payload: &[u8],
        store: &mut S,
    ) -> Result<Vec<u8>, ApplyError> {
        tracing::debug!(operation, "applying operation");

        match operation {
            "setStage" => {
                let config: TopicConfig = decode_payload(payload)?;
                set_stage(store, &config)?;
                Ok(Vec::new())
            }
            "initPublicKey" => {
                let record: PublicKeyRecord = decode_payload(payload)?;
                register_public_key(store, &record, payload)?;
                Ok(b"SUCCESS".to_vec())
            }
            "getPublicKey" => {
                let request: GetPublicKeyRequest = decode_payload(payload)?;
                let record = get_public_key(store, &request.topic, &request.uid)?;
                Ok(record)
            }
            "getKeyRing" => {
                let request: GetKeyRingRequest = decode_payload(payload)?;
                let ring = get_key_ring(store, &request.topic)?;
                Ok(serde_json::to_vec(&ring)
                    .expect("ringvote: unexpected error packing key ring"))
            }
            "submit" => {
                let request: SubmitRequest = decode_payload(payload)?;
                submit(store, &self.verifier, &request, payload)?;
                Ok(Vec::new())
            }
            _ => Err(ApplyError::InvalidTransaction(format!(
                "invalid operation name: {}",
                operation
            ))),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn handler() -> VotingTransactionHandler<fn(&[CurvePoint], &[u8], &RingSignature) -> bool> {
        fn accept_all(_: &[CurvePoint], _: &[u8], _: &RingSignature) -> bool {
            true
        }
        VotingTransactionHandler::new(accept_all)
    }

    fn apply(
        handler: &VotingTransactionHandler<fn(&[CurvePoint], &[u8], &RingSignature) -> bool>,
        store: &mut MemStore,
        operation: &str,
        payload: &str,
    ) -> Result<Vec<u8>, ApplyError> {
        handler.apply(operation, payload.as_bytes(), store)
    }

    #[test]
    fn routes_the_operation_surface() {
        let handler = handler();
        let mut store = MemStore::new();

        apply(&handler, &mut store, "setStage", r#"{"topic":"T1","stage":"prepare"}"#).unwrap();

        let key_payload = r#"{"topic":"T1","uid":"a","x":"101","y":"102"}"#;
        let reply = apply(&handler, &mut store, "initPublicKey", key_payload).unwrap();
        assert_eq!(reply, b"SUCCESS".to_vec());
        apply(
            &handler,
            &mut store,
            "initPublicKey",
            r#"{"topic":"T1","uid":"b","x":"201","y":"202"}"#,
        )
        .unwrap();

        // The stored record is the registration payload, byte for byte
        let reply = apply(
            &handler,
            &mut store,
            "getPublicKey",
            r#"{"topic":"T1","uid":"a"}"#,
        )
        .unwrap();
        assert_eq!(reply, key_payload.as_bytes().to_vec());

        let reply = apply(&handler, &mut store, "getKeyRing", r#"{"topic":"T1"}"#).unwrap();
        let ring: Vec<RingEntry> = serde_json::from_slice(&reply).unwrap();
        let uids: Vec<String> = ring.into_iter().map(|entry| entry.uid).collect();
        assert_eq!(uids, vec!["a", "b"]);

        apply(&handler, &mut store, "setStage", r#"{"topic":"T1","stage":"start"}"#).unwrap();
        let ballot = r#"{"topic":"T1","msg":"candidate-7","sig":{"hsx":"11","hsy":"22","c":["1","2"],"t":["3","4"]},"keyIndex":[{"uid":"a"},{"uid":"b"}]}"#;
        let reply = apply(&handler, &mut store, "submit", ballot).unwrap();
        assert!(reply.is_empty());
        assert_eq!(
            get_submission(&store, "T1").unwrap().unwrap(),
            ballot.as_bytes().to_vec()
        );
    }

    #[test]
    fn double_submission_looks_like_success() {
        let handler = handler();
        let mut store = MemStore::new();

        apply(&handler, &mut store, "setStage", r#"{"topic":"T1","stage":"prepare"}"#).unwrap();
        apply(
            &handler,
            &mut store,
            "initPublicKey",
            r#"{"topic":"T1","uid":"a","x":"101","y":"102"}"#,
        )
        .unwrap();
        apply(&handler, &mut store, "setStage", r#"{"topic":"T1","stage":"start"}"#).unwrap();

        let first = r#"{"topic":"T1","msg":"candidate-7","sig":{"hsx":"11","hsy":"22","c":["1"],"t":["3"]},"keyIndex":[{"uid":"a"}]}"#;
        let second = r#"{"topic":"T1","msg":"candidate-3","sig":{"hsx":"11","hsy":"22","c":["5"],"t":["6"]},"keyIndex":[{"uid":"a"}]}"#;

        assert!(apply(&handler, &mut store, "submit", first).unwrap().is_empty());

        // Identical reply for the dropped duplicate
        assert!(apply(&handler, &mut store, "submit", second).unwrap().is_empty());
        assert_eq!(
            get_submission(&store, "T1").unwrap().unwrap(),
            first.as_bytes().to_vec()
        );
    }

    #[test]
    fn malformed_payloads_are_invalid_transactions() {
        let handler = handler();
        let mut store = MemStore::new();

        let err = apply(&handler, &mut store, "setStage", "not json").unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        // Missing required field
        let err = apply(&handler, &mut store, "setStage", r#"{"topic":"T1"}"#).unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        // Unrecognized stage string
        let err = apply(
            &handler,
            &mut store,
            "setStage",
            r#"{"topic":"T1","stage":"frozen"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        // Unparsable key coordinate
        apply(&handler, &mut store, "setStage", r#"{"topic":"T1","stage":"prepare"}"#).unwrap();
        let err = apply(
            &handler,
            &mut store,
            "initPublicKey",
            r#"{"topic":"T1","uid":"a","x":"12a34","y":"102"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        let err = apply(&handler, &mut store, "tally", "{}").unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
    }

    #[test]
    fn verifier_rejections_surface() {
        fn reject_all(_: &[CurvePoint], _: &[u8], _: &RingSignature) -> bool {
            false
        }
        let handler: VotingTransactionHandler<fn(&[CurvePoint], &[u8], &RingSignature) -> bool> =
            VotingTransactionHandler::new(reject_all);
        let mut store = MemStore::new();

        handler
            .apply(
                "setStage",
                br#"{"topic":"T1","stage":"prepare"}"#,
                &mut store,
            )
            .unwrap();
        handler
            .apply(
                "initPublicKey",
                br#"{"topic":"T1","uid":"a","x":"101","y":"102"}"#,
                &mut store,
            )
            .unwrap();
        handler
            .apply("setStage", br#"{"topic":"T1","stage":"start"}"#, &mut store)
            .unwrap();

        let ballot = br#"{"topic":"T1","msg":"candidate-7","sig":{"hsx":"11","hsy":"22","c":["1"],"t":["3"]},"keyIndex":[{"uid":"a"}]}"#;
        let err = handler.apply("submit", ballot, &mut store).unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
        assert!(get_submission(&store, "T1").unwrap().is_none());
    }

    #[test]
    fn handler_metadata() {
        let handler = handler();
        assert_eq!(handler.family_name(), "ringvote");
        assert_eq!(handler.family_versions().to_vec(), vec!["1.0"]);
    }
}
