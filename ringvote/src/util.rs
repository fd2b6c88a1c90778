use crate::Error;
use serde::de::DeserializeOwned;

/// Decode a JSON operation payload into its typed request, failing with
/// `MalformedInput` on missing fields or undecodable values.
pub fn decode_payload<T: DeserializeOwned>(payload: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(payload).map_err(|err| Error::MalformedInput(err.to_string()))
}
