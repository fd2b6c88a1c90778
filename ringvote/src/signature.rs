use crate::*;
use num_bigint::BigUint;

/// An affine public-key point on the deployment's curve (NIST P-256 in the
/// reference deployment). Coordinates travel as base-10 decimal strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    #[serde(with = "biguint_decimal")]
    pub x: BigUint,

    #[serde(with = "biguint_decimal")]
    pub y: BigUint,
}

/// A linkable ring signature, as produced by the external signer.
///
/// `(hsx, hsy)` is the link tag: deterministic for a given signing secret,
/// identical across every signature that secret produces, and the basis of
/// double-submission detection. `c` and `t` are the per-member challenge
/// and response scalars.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RingSignature {
    #[serde(with = "biguint_decimal")]
    pub hsx: BigUint,

    #[serde(with = "biguint_decimal")]
    pub hsy: BigUint,

    #[serde(with = "biguint_decimal_vec")]
    pub c: Vec<BigUint>,

    #[serde(with = "biguint_decimal_vec")]
    pub t: Vec<BigUint>,
}

impl RingSignature {
    /// Structural checks performed before the signature reaches the
    /// verifier. Cryptographic validity is the verifier's job.
    pub fn validate_shape(&self) -> Result<(), Error> {
        if self.c.is_empty() {
            return Err(Error::MalformedSignature(String::from(
                "empty challenge sequence",
            )));
        }
        if self.c.len() != self.t.len() {
            return Err(Error::MalformedSignature(format!(
                "challenge/response length mismatch: {} vs {}",
                self.c.len(),
                self.t.len()
            )));
        }
        Ok(())
    }

    /// The double-submission fingerprint carried by this signature.
    pub fn link_tag(&self) -> LinkTag {
        LinkTag {
            hsx: self.hsx.clone(),
            hsy: self.hsy.clone(),
        }
    }
}

/// Contract required from the external linkable-ring-signature primitive.
///
/// The verifier is trusted to enforce ring membership and
/// knowledge-of-one-secret-key semantics; the core never re-derives that
/// proof. `ring` is exactly the caller-declared key index, resolved to
/// concrete points, in order.
pub trait RingVerifier {
    fn verify(&self, ring: &[CurvePoint], message: &[u8], signature: &RingSignature) -> bool;
}

impl<F> RingVerifier for F
where
    F: Fn(&[CurvePoint], &[u8], &RingSignature) -> bool,
{
    fn verify(&self, ring: &[CurvePoint], message: &[u8], signature: &RingSignature) -> bool {
        self(ring, message, signature)
    }
}
