//! Protocol transcript and key schedule (spec.md §4.3).
//!
//! Two distinct length-prefixing helpers are defined here because they
//! have different rules about empty fields: the MHF input helper drops
//! empty strings entirely (no prefix at all), while the transcript
//! helper only drops the two identity fields when empty and is
//! unconditional for every other field. Mixing the two up would
//! silently desynchronize the two endpoints' transcripts.

extern crate alloc;
use alloc::vec::Vec;

use crate::group::Group as _;
use crate::suite::CipherSuite;
use zeroize::Zeroize;

/// Length-prefixed concatenation used as the input to the MHF
/// (spec.md §3, "Concat helper"). Empty byte strings are skipped
/// entirely, including their length prefix.
pub(crate) fn concat_skip_empty(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        if !part.is_empty() {
            out.extend_from_slice(&(part.len() as u64).to_le_bytes());
            out.extend_from_slice(part);
        }
    }
    out
}

fn append_len_prefixed(buf: &mut Vec<u8>, field: &[u8]) {
    buf.extend_from_slice(&(field.len() as u64).to_le_bytes());
    buf.extend_from_slice(field);
}

/// Build TT per spec.md §4.3: identities are omitted entirely (not even
/// a zero-length prefix) when empty; every other field is unconditional.
pub(crate) fn build_tt(
    id_a: &[u8],
    id_b: &[u8],
    m: &[u8],
    n: &[u8],
    x: &[u8],
    y: &[u8],
    z: &[u8],
    v: &[u8],
    w0: &[u8],
) -> Vec<u8> {
    let mut tt = Vec::new();
    if !id_a.is_empty() {
        append_len_prefixed(&mut tt, id_a);
    }
    if !id_b.is_empty() {
        append_len_prefixed(&mut tt, id_b);
    }
    append_len_prefixed(&mut tt, m);
    append_len_prefixed(&mut tt, n);
    append_len_prefixed(&mut tt, x);
    append_len_prefixed(&mut tt, y);
    append_len_prefixed(&mut tt, z);
    append_len_prefixed(&mut tt, v);
    append_len_prefixed(&mut tt, w0);
    tt
}

/// `Ka`, `KcA`, `KcB` — zeroized on drop. `Ke` lives outside this struct
/// since it is handed to the caller, not destroyed internally (spec.md
/// §9 "Ownership").
#[derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub(crate) struct SensitiveKeys {
    pub ka: Vec<u8>,
    pub kc_a: Vec<u8>,
    pub kc_b: Vec<u8>,
}

/// `Ke` plus the zeroizing remainder of the key schedule.
pub(crate) struct KeySchedule {
    pub ke: Vec<u8>,
    pub sensitive: SensitiveKeys,
}

/// Hash TT, split the digest into `Ke || Ka`, then derive `KcA || KcB`
/// from `Ka` via the suite's KDF with the fixed `"ConfirmationKeys"`
/// info string (spec.md §4.3).
pub(crate) fn derive_keys<S: CipherSuite>(
    suite: &S,
    id_a: &[u8],
    id_b: &[u8],
    x: &[u8],
    y: &[u8],
    z: &[u8],
    v: &[u8],
    w0: &[u8],
) -> KeySchedule {
    let m = S::Group::element_to_bytes(&S::Group::m());
    let n = S::Group::element_to_bytes(&S::Group::n());
    let tt = build_tt(id_a, id_b, &m, &n, x, y, z, v, w0);

    let mut digest = suite.hash_digest(&tt);
    let half = digest.len() / 2;
    let ke = digest[..half].to_vec();
    let ka = digest[half..].to_vec();
    digest.zeroize();

    let mut kc = suite.derive_key(&[], &ka, b"ConfirmationKeys");
    let kc_half = kc.len() / 2;
    let kc_a = kc[..kc_half].to_vec();
    let kc_b = kc[kc_half..].to_vec();
    kc.zeroize();

    KeySchedule {
        ke,
        sensitive: SensitiveKeys { ka, kc_a, kc_b },
    }
}
