//! Encoding normalization to marked UTF-8.

use crate::artifacts::{unique_name, ArtifactStore};
use crate::encoding::{encode_utf8_bom, SourceEncoding};
use crate::error::ProcessResult;

/// Decode `bytes` under the candidate encodings and rewrite them as UTF-8
/// with a leading byte-order marker.
///
/// Canonicalizes arbitrary source encodings into one interoperable target;
/// the content is otherwise untouched. Returns the artifact name.
pub fn to_utf8_bom(bytes: &[u8], store: &dyn ArtifactStore) -> ProcessResult<String> {
    let (_, text) = SourceEncoding::decode(bytes)?;
    let name = unique_name("fixed", "csv");
    store.put(&name, &encode_utf8_bom(&text))
}
